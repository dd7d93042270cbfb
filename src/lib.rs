//! verinfo - build-time version metadata for .NET assemblies
//!
//! This crate turns version facts computed during a build (versions, commit
//! id and date, release flags, strong-name key identity) into a source file
//! for C#, Visual Basic or F#: assembly attributes plus a `ThisAssembly`
//! constants class.

pub mod core;
pub mod emit;
pub mod key;
pub mod model;
pub mod ops;
pub mod util;

/// Test utilities for verinfo unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides sample requests, a fixed key source, and readers for the
/// literals the backends emit.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    AdditionalField, BuildInfo, Field, FieldValue, GenerationRequest, TargetLanguage, Ticks,
};
pub use emit::{EmitterRegistry, SyntaxEmitter};
pub use key::{KeyInfo, KeySource, StrongNameKeySource};
pub use model::{build_fields, FieldSet};
pub use ops::{generate_to_file, GenerateError, GeneratedCode, Generator};
