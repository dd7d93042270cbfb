//! Source emission for the supported target syntaxes.
//!
//! Every backend implements [`SyntaxEmitter`]. The driver calls the methods
//! in a fixed order (see `ops::generate`), so all backends produce
//! structurally parallel files for the same field set:
//!
//! 1. `add_comment` (banner), `add_blank_line`
//! 2. `add_analysis_suppressions`, `add_blank_line`
//! 3. `start_assembly_attributes`, `declare_attribute`*, `end_assembly_attributes`
//! 4. optionally `start_this_assembly_class`, `add_member`*, `end_this_assembly_class`
//! 5. `code`

pub mod csharp;
pub mod fsharp;
pub mod registry;
pub mod visual_basic;

use crate::core::field::{AttributeKind, Field, FieldValue};
use crate::core::language::TargetLanguage;
use crate::core::ticks::Ticks;

pub use csharp::CSharpEmitter;
pub use fsharp::FSharpEmitter;
pub use registry::{BackendInfo, EmitterRegistry};
pub use visual_basic::VisualBasicEmitter;

/// Name of the generated constants holder.
pub const THIS_ASSEMBLY_CLASS: &str = "ThisAssembly";

/// Symbols under which `GeneratedCode` is available.
pub const GENERATED_CODE_SYMBOLS: &[&str] = &["NETSTANDARD", "NETFRAMEWORK", "NETCOREAPP"];

/// Symbols under which `ExcludeFromCodeCoverage` is available. Every target
/// defining one of these also defines one of [`GENERATED_CODE_SYMBOLS`].
pub const COVERAGE_SYMBOLS: &[&str] = &[
    "NETFRAMEWORK",
    "NETCOREAPP",
    "NETSTANDARD2_0",
    "NETSTANDARD2_1",
];

pub const GENERATED_CODE_ATTRIBUTE: &str = "System.CodeDom.Compiler.GeneratedCode";
pub const EXCLUDE_FROM_COVERAGE_ATTRIBUTE: &str =
    "System.Diagnostics.CodeAnalysis.ExcludeFromCodeCoverage";

/// Options shared by all backends.
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    /// Namespace for the constants class, already resolved by the driver.
    pub namespace: Option<String>,
    /// Tool name recorded in the banner and `GeneratedCode` attribute.
    pub tool_name: String,
    /// Tool version recorded in the banner and `GeneratedCode` attribute.
    pub tool_version: String,
}

impl EmitterOptions {
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        EmitterOptions {
            namespace: None,
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
        }
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }
}

/// Renders the generation call sequence into one target syntax.
pub trait SyntaxEmitter {
    /// Language this emitter renders.
    fn language(&self) -> TargetLanguage;

    /// Add a (possibly multi-line) comment.
    fn add_comment(&mut self, text: &str);

    fn add_blank_line(&mut self);

    /// Suppress analysis warnings that generated attributes trigger.
    fn add_analysis_suppressions(&mut self);

    fn start_assembly_attributes(&mut self);

    fn declare_attribute(&mut self, kind: AttributeKind, value: &str);

    fn end_assembly_attributes(&mut self);

    fn start_this_assembly_class(&mut self);

    fn add_string_member(&mut self, name: &str, value: &str);

    fn add_bool_member(&mut self, name: &str, value: bool);

    fn add_timestamp_member(&mut self, name: &str, value: Ticks);

    fn end_this_assembly_class(&mut self);

    /// Text accumulated so far.
    fn code(&self) -> &str;

    /// Emit one field as a member of the constants class.
    fn add_member(&mut self, field: &Field) {
        match &field.value {
            FieldValue::String(s) => self.add_string_member(&field.name, s),
            FieldValue::Bool(b) => self.add_bool_member(&field.name, *b),
            FieldValue::Timestamp(t) => self.add_timestamp_member(&field.name, *t),
        }
    }
}

/// Line-oriented text accumulator used by the backends.
#[derive(Debug, Clone, Default)]
pub struct CodeWriter {
    buf: String,
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter { buf: String::new() }
    }

    /// Append one line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append each line of `text` behind a comment prefix.
    pub fn comment(&mut self, prefix: &str, text: &str) {
        for line in text.lines() {
            if line.is_empty() {
                self.line(prefix);
            } else {
                self.line(format!("{} {}", prefix, line));
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

/// Banner placed at the top of every generated file.
pub fn header_text(tool_name: &str, tool_version: &str) -> String {
    format!(
        "------------------------------------------------------------------------------\n\
         <auto-generated>\n\
         \x20   This code was generated by {} {}.\n\
         \n\
         \x20   Changes to this file may cause incorrect behavior and will be lost if\n\
         \x20   the code is regenerated.\n\
         </auto-generated>\n\
         ------------------------------------------------------------------------------",
        tool_name, tool_version
    )
}

/// Join preprocessor symbols with a disjunction operator.
pub fn symbol_condition(symbols: &[&str], or: &str) -> String {
    symbols.join(&format!(" {} ", or))
}

/// Quote a string using backslash escapes, valid for both C# and F#
/// regular string literals.
pub fn c_like_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                out.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
