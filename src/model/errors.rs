//! Per-field diagnostics.
//!
//! None of these abort generation. The offending field is dropped and the
//! problem is reported after the run.

use serde::Serialize;
use thiserror::Error;

use crate::core::language::TargetLanguage;
use crate::util::diagnostic::Diagnostic;

/// Configuration error for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldError {
    #[error("field `{name}` is already defined")]
    DuplicateName { name: String },

    #[error("field `{name}` specifies more than one value kind ({})", .kinds.join(", "))]
    AmbiguousKind {
        name: String,
        kinds: Vec<&'static str>,
    },

    #[error("field `{name}` does not specify a value kind")]
    MissingKind { name: String },

    #[error("`{name}` is not a valid field name")]
    InvalidName { name: String },

    #[error("`{name}` is a reserved word in {language}")]
    ReservedName {
        name: String,
        language: TargetLanguage,
    },

    #[error("field `{name}` has invalid boolean value '{value}'")]
    InvalidBoolean { name: String, value: String },

    #[error("field `{name}` has invalid tick count '{value}'")]
    InvalidTicks { name: String, value: String },
}

impl FieldError {
    /// Name of the offending field.
    pub fn field_name(&self) -> &str {
        match self {
            FieldError::DuplicateName { name }
            | FieldError::AmbiguousKind { name, .. }
            | FieldError::MissingKind { name }
            | FieldError::InvalidName { name }
            | FieldError::ReservedName { name, .. }
            | FieldError::InvalidBoolean { name, .. }
            | FieldError::InvalidTicks { name, .. } => name,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_context("the field was not emitted");
        match self {
            FieldError::DuplicateName { .. } => diag
                .with_suggestion("Rename the field; built-in field names cannot be reused"),
            FieldError::AmbiguousKind { .. } | FieldError::MissingKind { .. } => {
                diag.with_suggestion("Set exactly one of `string`, `boolean` or `ticks`")
            }
            FieldError::InvalidName { .. } => diag.with_suggestion(
                "Use letters, digits and underscores, not starting with a digit",
            ),
            FieldError::ReservedName { .. } => {
                diag.with_suggestion("Pick a name that is not a keyword of the target language")
            }
            FieldError::InvalidBoolean { .. } => {
                diag.with_suggestion("Use `true` or `false`")
            }
            FieldError::InvalidTicks { .. } => diag.with_suggestion(
                "Use an integer count of 100ns intervals since 0001-01-01T00:00:00Z",
            ),
        }
    }
}

/// Non-error notice about a dropped field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldWarning {
    #[error("field `{name}` has an empty value and was not emitted")]
    EmptyValueDropped { name: String },
}

impl FieldWarning {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FieldWarning::EmptyValueDropped { .. } => Diagnostic::warning(self.to_string())
                .with_suggestion("Set `emit-if-empty = true` to emit it anyway"),
        }
    }
}

/// All diagnostics collected while building a field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDiagnostics {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
}

impl FieldDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Diagnostics in reporting order: errors, then warnings.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(FieldError::to_diagnostic)
            .chain(self.warnings.iter().map(FieldWarning::to_diagnostic))
            .collect()
    }
}
