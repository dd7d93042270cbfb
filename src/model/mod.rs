//! The field model: which named facts get emitted, with which values.

pub mod builder;
pub mod errors;

pub use builder::{build_fields, names, FieldSet};
pub use errors::{FieldDiagnostics, FieldError, FieldWarning};
