//! C# backend.

use crate::core::field::AttributeKind;
use crate::core::language::TargetLanguage;
use crate::core::ticks::Ticks;
use crate::emit::{
    c_like_string_literal, symbol_condition, CodeWriter, EmitterOptions, SyntaxEmitter,
    COVERAGE_SYMBOLS, EXCLUDE_FROM_COVERAGE_ATTRIBUTE, GENERATED_CODE_ATTRIBUTE,
    GENERATED_CODE_SYMBOLS, THIS_ASSEMBLY_CLASS,
};

const SUPPRESSED_WARNINGS: &[&str] = &["CA2243"];

/// Emits C#.
///
/// The constants class is wrapped in a namespace block only when a
/// namespace was given.
#[derive(Debug)]
pub struct CSharpEmitter {
    out: CodeWriter,
    options: EmitterOptions,
}

impl CSharpEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        CSharpEmitter {
            out: CodeWriter::new(),
            options,
        }
    }
}

impl SyntaxEmitter for CSharpEmitter {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::CSharp
    }

    fn add_comment(&mut self, text: &str) {
        self.out.comment("//", text);
    }

    fn add_blank_line(&mut self) {
        self.out.blank();
    }

    fn add_analysis_suppressions(&mut self) {
        self.out
            .line(format!("#pragma warning disable {}", SUPPRESSED_WARNINGS.join(", ")));
    }

    fn start_assembly_attributes(&mut self) {}

    fn declare_attribute(&mut self, kind: AttributeKind, value: &str) {
        self.out.line(format!(
            "[assembly: {}({})]",
            kind.type_name(),
            c_like_string_literal(value)
        ));
    }

    fn end_assembly_attributes(&mut self) {
        self.out.blank();
    }

    fn start_this_assembly_class(&mut self) {
        if let Some(ns) = &self.options.namespace {
            self.out.line(format!("namespace {} {{", ns));
        }
        self.out
            .line(format!("#if {}", symbol_condition(GENERATED_CODE_SYMBOLS, "||")));
        self.out.line(format!(
            "[{}({},{})]",
            GENERATED_CODE_ATTRIBUTE,
            c_like_string_literal(&self.options.tool_name),
            c_like_string_literal(&self.options.tool_version)
        ));
        self.out.line("#endif");
        self.out
            .line(format!("#if {}", symbol_condition(COVERAGE_SYMBOLS, "||")));
        self.out.line(format!("[{}]", EXCLUDE_FROM_COVERAGE_ATTRIBUTE));
        self.out.line("#endif");
        self.out
            .line(format!("internal static partial class {} {{", THIS_ASSEMBLY_CLASS));
    }

    fn add_string_member(&mut self, name: &str, value: &str) {
        self.out.line(format!(
            "    internal const string {} = {};",
            name,
            c_like_string_literal(value)
        ));
    }

    fn add_bool_member(&mut self, name: &str, value: bool) {
        let literal = if value { "true" } else { "false" };
        self.out
            .line(format!("    internal const bool {} = {};", name, literal));
    }

    fn add_timestamp_member(&mut self, name: &str, value: Ticks) {
        self.out.line(format!(
            "    internal static readonly System.DateTime {} = new System.DateTime({}L, System.DateTimeKind.Utc);",
            name, value
        ));
    }

    fn end_this_assembly_class(&mut self) {
        self.out.line("}");
        if self.options.namespace.is_some() {
            self.out.line("}");
        }
    }

    fn code(&self) -> &str {
        self.out.as_str()
    }
}
