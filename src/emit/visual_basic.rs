//! Visual Basic backend.
//!
//! VB has no `#if A || B` nesting shortcut for optional attributes on a
//! single declaration, so the class header is emitted three times under an
//! `#If`/`#ElseIf`/`#Else` chain: both markers, only `GeneratedCode`, or
//! neither. The coverage symbols are checked first because every target that
//! defines them also defines a generated-code symbol.

use crate::core::field::AttributeKind;
use crate::core::language::TargetLanguage;
use crate::core::ticks::Ticks;
use crate::emit::{
    symbol_condition, CodeWriter, EmitterOptions, SyntaxEmitter, COVERAGE_SYMBOLS,
    EXCLUDE_FROM_COVERAGE_ATTRIBUTE, GENERATED_CODE_ATTRIBUTE, GENERATED_CODE_SYMBOLS,
    THIS_ASSEMBLY_CLASS,
};

const SUPPRESSED_WARNINGS: &[&str] = &["CA2243"];

/// Characters VB accepts as a string delimiter besides `"`.
const ALTERNATE_QUOTES: [char; 3] = ['\u{201C}', '\u{201D}', '\u{FF02}'];

/// Quote a string as a VB constant expression.
///
/// ASCII quotes are doubled. Line terminators, control characters and the
/// typographic quote forms cannot appear raw inside a VB literal, so they
/// are spliced in with `ChrW`.
pub fn vb_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\"\""),
            c if c.is_control()
                || matches!(c, '\u{2028}' | '\u{2029}')
                || ALTERNATE_QUOTES.contains(&c) =>
            {
                out.push_str(&format!("\" & ChrW({}) & \"", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Emits Visual Basic.
#[derive(Debug)]
pub struct VisualBasicEmitter {
    out: CodeWriter,
    options: EmitterOptions,
}

impl VisualBasicEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        VisualBasicEmitter {
            out: CodeWriter::new(),
            options,
        }
    }

    fn generated_code_attribute(&self) -> String {
        format!(
            "<{}({},{})>",
            GENERATED_CODE_ATTRIBUTE,
            vb_string_literal(&self.options.tool_name),
            vb_string_literal(&self.options.tool_version)
        )
    }

    fn class_declaration() -> String {
        format!("Partial Friend NotInheritable Class {}", THIS_ASSEMBLY_CLASS)
    }
}

impl SyntaxEmitter for VisualBasicEmitter {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::VisualBasic
    }

    fn add_comment(&mut self, text: &str) {
        self.out.comment("'", text);
    }

    fn add_blank_line(&mut self) {
        self.out.blank();
    }

    fn add_analysis_suppressions(&mut self) {
        self.out
            .line(format!("#Disable Warning {}", SUPPRESSED_WARNINGS.join(", ")));
    }

    fn start_assembly_attributes(&mut self) {}

    fn declare_attribute(&mut self, kind: AttributeKind, value: &str) {
        self.out.line(format!(
            "<Assembly: {}({})>",
            kind.type_name(),
            vb_string_literal(value)
        ));
    }

    fn end_assembly_attributes(&mut self) {
        self.out.blank();
    }

    fn start_this_assembly_class(&mut self) {
        if let Some(ns) = &self.options.namespace {
            self.out.line(format!("Namespace {}", ns));
        }
        let generated = self.generated_code_attribute();

        self.out
            .line(format!("#If {} Then", symbol_condition(COVERAGE_SYMBOLS, "Or")));
        self.out.line(&generated);
        self.out.line(format!("<{}>", EXCLUDE_FROM_COVERAGE_ATTRIBUTE));
        self.out.line(Self::class_declaration());
        self.out.line(format!(
            "#ElseIf {} Then",
            symbol_condition(GENERATED_CODE_SYMBOLS, "Or")
        ));
        self.out.line(&generated);
        self.out.line(Self::class_declaration());
        self.out.line("#Else");
        self.out.line(Self::class_declaration());
        self.out.line("#End If");
    }

    fn add_string_member(&mut self, name: &str, value: &str) {
        self.out.line(format!(
            "    Friend Const {} As String = {}",
            name,
            vb_string_literal(value)
        ));
    }

    fn add_bool_member(&mut self, name: &str, value: bool) {
        let literal = if value { "True" } else { "False" };
        self.out
            .line(format!("    Friend Const {} As Boolean = {}", name, literal));
    }

    fn add_timestamp_member(&mut self, name: &str, value: Ticks) {
        self.out.line(format!(
            "    Friend Shared ReadOnly {} As System.DateTime = New System.DateTime({}L, System.DateTimeKind.Utc)",
            name, value
        ));
    }

    fn end_this_assembly_class(&mut self) {
        self.out.line("End Class");
        if self.options.namespace.is_some() {
            self.out.line("End Namespace");
        }
    }

    fn code(&self) -> &str {
        self.out.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::parse_vb_string_literal;

    fn emitter(namespace: Option<&str>) -> VisualBasicEmitter {
        VisualBasicEmitter::new(
            EmitterOptions::new("verinfo", "1.0.0").with_namespace(namespace.map(String::from)),
        )
    }

    #[test]
    fn test_vb_literal() {
        assert_eq!(vb_string_literal("1.2.3"), "\"1.2.3\"");
        assert_eq!(vb_string_literal(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(vb_string_literal("a\nb"), "\"a\" & ChrW(10) & \"b\"");
        assert_eq!(vb_string_literal(r"C:\path"), r#""C:\path""#);
        assert_eq!(
            vb_string_literal("\u{201C}Acme\u{201D}"),
            "\"\" & ChrW(8220) & \"Acme\" & ChrW(8221) & \"\""
        );
        assert_eq!(vb_string_literal("x\u{2028}y"), "\"x\" & ChrW(8232) & \"y\"");
    }

    #[test]
    fn test_vb_literal_round_trip() {
        for value in [
            "",
            "plain",
            "\"\"",
            "line\r\nbreak",
            "\"edge\n",
            "a\u{201C}b",
            "\u{201D}\u{FF02}",
            "para\u{2029}sep\u{2028}",
        ] {
            let literal = vb_string_literal(value);
            assert_eq!(parse_vb_string_literal(&literal).as_deref(), Some(value));
        }
    }

    #[test]
    fn test_tripartite_guard() {
        let mut e = emitter(None);
        e.start_this_assembly_class();

        let expected = "\
#If NETFRAMEWORK Or NETCOREAPP Or NETSTANDARD2_0 Or NETSTANDARD2_1 Then
<System.CodeDom.Compiler.GeneratedCode(\"verinfo\",\"1.0.0\")>
<System.Diagnostics.CodeAnalysis.ExcludeFromCodeCoverage>
Partial Friend NotInheritable Class ThisAssembly
#ElseIf NETSTANDARD Or NETFRAMEWORK Or NETCOREAPP Then
<System.CodeDom.Compiler.GeneratedCode(\"verinfo\",\"1.0.0\")>
Partial Friend NotInheritable Class ThisAssembly
#Else
Partial Friend NotInheritable Class ThisAssembly
#End If
";
        assert_eq!(e.code(), expected);
    }

    #[test]
    fn test_members_and_namespace() {
        let mut e = emitter(Some("Contoso"));
        e.declare_attribute(AttributeKind::FileVersion, "1.2.3.4");
        e.start_this_assembly_class();
        e.add_string_member("AssemblyVersion", "1.2.3");
        e.add_bool_member("IsPublicRelease", true);
        e.add_timestamp_member("GitCommitDate", Ticks(637_450_560_000_000_000));
        e.end_this_assembly_class();

        let code = e.code();
        assert!(code.contains("<Assembly: System.Reflection.AssemblyFileVersionAttribute(\"1.2.3.4\")>"));
        assert!(code.contains("Namespace Contoso\n"));
        assert!(code.contains("    Friend Const AssemblyVersion As String = \"1.2.3\""));
        assert!(code.contains("    Friend Const IsPublicRelease As Boolean = True"));
        assert!(code.contains("New System.DateTime(637450560000000000L, System.DateTimeKind.Utc)"));
        assert!(code.ends_with("End Class\nEnd Namespace\n"));
    }
}
