//! Test utilities for verinfo unit tests.
//!
//! Besides fixtures, this module has small readers for the literals the
//! backends emit, so tests can check values by parsing them back instead of
//! matching exact text.

pub mod fixtures;

use crate::core::language::TargetLanguage;
use crate::core::ticks::Ticks;

pub use fixtures::*;

/// Parse a C#/F# regular string literal, including the quotes.
pub fn parse_c_like_string_literal(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::new();
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let code = u32::from_str_radix(&hex, 16).ok()?;
                    out.push(char::from_u32(code)?);
                }
                _ => return None,
            },
            '"' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}

/// VB lexes the typographic and full-width quotes the same as `"`.
fn is_vb_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201C}' | '\u{201D}' | '\u{FF02}')
}

/// Parse a VB string expression: quoted segments joined by `& ChrW(n) &`.
pub fn parse_vb_string_literal(literal: &str) -> Option<String> {
    let mut out = String::new();
    let mut rest = literal.trim();

    loop {
        rest = rest.strip_prefix(is_vb_quote)?;
        loop {
            let end = rest.find(is_vb_quote)?;
            out.push_str(&rest[..end]);
            rest = rest[end..].strip_prefix(is_vb_quote)?;
            match rest.strip_prefix(is_vb_quote) {
                Some(after) => {
                    out.push('"');
                    rest = after;
                }
                None => break,
            }
        }

        rest = rest.trim_start();
        if rest.is_empty() {
            return Some(out);
        }

        rest = rest.strip_prefix("& ChrW(")?;
        let close = rest.find(')')?;
        let code: u32 = rest[..close].parse().ok()?;
        out.push(char::from_u32(code)?);
        rest = rest[close + 1..].trim_start().strip_prefix('&')?.trim_start();
    }
}

/// Find the initializer expression of a generated member.
pub fn extract_member_literal(language: TargetLanguage, code: &str, name: &str) -> Option<String> {
    let marker = match language {
        TargetLanguage::VisualBasic => format!(" {} As ", name),
        _ => format!(" {} = ", name),
    };

    let line = code.lines().find(|l| l.contains(&marker))?;
    let after_name = &line[line.find(&marker)? + 1..];
    let expr = &after_name[after_name.find(" = ")? + 3..];
    Some(expr.trim_end().trim_end_matches(';').to_string())
}

/// Read the tick count back out of a generated `System.DateTime` constructor,
/// requiring the UTC kind marker.
pub fn parse_datetime_ticks(expr: &str) -> Option<Ticks> {
    if !expr.contains("System.DateTimeKind.Utc") {
        return None;
    }
    let start = expr.find("System.DateTime(")? + "System.DateTime(".len();
    let end = start + expr[start..].find("L,")?;
    expr[start..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_c_like() {
        assert_eq!(parse_c_like_string_literal(r#""a\"b""#).as_deref(), Some("a\"b"));
        assert_eq!(parse_c_like_string_literal(r#""bad"quote""#), None);
        assert_eq!(parse_c_like_string_literal("unquoted"), None);
    }

    #[test]
    fn test_parse_vb() {
        assert_eq!(parse_vb_string_literal(r#""a""b""#).as_deref(), Some("a\"b"));
        assert_eq!(
            parse_vb_string_literal("\"x\" & ChrW(10) & \"y\"").as_deref(),
            Some("x\ny")
        );
        assert_eq!(parse_vb_string_literal("\"open"), None);
        // A raw typographic quote ends the literal early
        assert_eq!(parse_vb_string_literal("\"a\u{201C}b\""), None);
    }

    #[test]
    fn test_extract_member() {
        let cs = "    internal const string AssemblyVersion = \"1.2.3\";\n";
        assert_eq!(
            extract_member_literal(TargetLanguage::CSharp, cs, "AssemblyVersion").as_deref(),
            Some("\"1.2.3\"")
        );

        let vb = "    Friend Const IsPublicRelease As Boolean = True\n";
        assert_eq!(
            extract_member_literal(TargetLanguage::VisualBasic, vb, "IsPublicRelease").as_deref(),
            Some("True")
        );
    }

    #[test]
    fn test_parse_datetime() {
        assert_eq!(
            parse_datetime_ticks("new System.DateTime(42L, System.DateTimeKind.Utc)"),
            Some(Ticks(42))
        );
        assert_eq!(
            parse_datetime_ticks("new System.DateTime(42L, System.DateTimeKind.Local)"),
            None
        );
    }
}
