//! Core data types.

pub mod field;
pub mod language;
pub mod request;
pub mod ticks;

pub use field::{AttributeKind, Field, FieldValue};
pub use language::{LanguageParseError, TargetLanguage};
pub use request::{AdditionalField, BuildInfo, GenerationRequest, KeyReference};
pub use ticks::Ticks;
