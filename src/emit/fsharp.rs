//! F# backend.
//!
//! F# needs a namespace declaration before any attribute, and assembly
//! attributes must be attached to a top-level `do()`. The namespace is
//! therefore opened by `start_assembly_attributes`, and `do()` closes both
//! the attribute section and the class section.

use crate::core::field::AttributeKind;
use crate::core::language::TargetLanguage;
use crate::core::ticks::Ticks;
use crate::emit::{
    c_like_string_literal, symbol_condition, CodeWriter, EmitterOptions, SyntaxEmitter,
    COVERAGE_SYMBOLS, EXCLUDE_FROM_COVERAGE_ATTRIBUTE, GENERATED_CODE_ATTRIBUTE,
    GENERATED_CODE_SYMBOLS, THIS_ASSEMBLY_CLASS,
};

const SUPPRESSED_WARNINGS: &[&str] = &["CA2243"];

/// Namespace used when neither an explicit nor a root namespace is known.
pub const DEFAULT_NAMESPACE: &str = "AssemblyInfo";

/// Emits F#.
#[derive(Debug)]
pub struct FSharpEmitter {
    out: CodeWriter,
    options: EmitterOptions,
    members: usize,
}

impl FSharpEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        FSharpEmitter {
            out: CodeWriter::new(),
            options,
            members: 0,
        }
    }

    fn namespace(&self) -> &str {
        self.options
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    fn member(&mut self, name: &str, expr: &str) {
        self.members += 1;
        self.out
            .line(format!("  static member internal {} = {}", name, expr));
    }
}

impl SyntaxEmitter for FSharpEmitter {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::FSharp
    }

    fn add_comment(&mut self, text: &str) {
        self.out.comment("//", text);
    }

    fn add_blank_line(&mut self) {
        self.out.blank();
    }

    fn add_analysis_suppressions(&mut self) {
        let codes: Vec<String> = SUPPRESSED_WARNINGS
            .iter()
            .map(|code| format!("\"{}\"", code))
            .collect();
        self.out.line(format!("#nowarn {}", codes.join(" ")));
    }

    fn start_assembly_attributes(&mut self) {
        let ns = self.namespace().to_string();
        self.out.line(format!("namespace {}", ns));
    }

    fn declare_attribute(&mut self, kind: AttributeKind, value: &str) {
        self.out.line(format!(
            "[<assembly: {}({})>]",
            kind.type_name(),
            c_like_string_literal(value)
        ));
    }

    fn end_assembly_attributes(&mut self) {
        self.out.line("do()");
        self.out.blank();
    }

    fn start_this_assembly_class(&mut self) {
        self.out
            .line(format!("#if {}", symbol_condition(GENERATED_CODE_SYMBOLS, "||")));
        self.out.line(format!(
            "[<{}({},{})>]",
            GENERATED_CODE_ATTRIBUTE,
            c_like_string_literal(&self.options.tool_name),
            c_like_string_literal(&self.options.tool_version)
        ));
        self.out.line("#endif");
        self.out
            .line(format!("#if {}", symbol_condition(COVERAGE_SYMBOLS, "||")));
        self.out.line(format!("[<{}>]", EXCLUDE_FROM_COVERAGE_ATTRIBUTE));
        self.out.line("#endif");
        self.out
            .line(format!("type internal {}() =", THIS_ASSEMBLY_CLASS));
    }

    fn add_string_member(&mut self, name: &str, value: &str) {
        self.member(name, &c_like_string_literal(value));
    }

    fn add_bool_member(&mut self, name: &str, value: bool) {
        self.member(name, if value { "true" } else { "false" });
    }

    fn add_timestamp_member(&mut self, name: &str, value: Ticks) {
        self.member(
            name,
            &format!("new System.DateTime({}L, System.DateTimeKind.Utc)", value),
        );
    }

    fn end_this_assembly_class(&mut self) {
        if self.members == 0 {
            self.out.line("  class end");
        }
        self.out.line("do()");
    }

    fn code(&self) -> &str {
        self.out.as_str()
    }
}
