//! Command implementations

pub mod completions;
pub mod generate;
pub mod key_info;
pub mod languages;

/// A failure the command has already reported through the shell.
///
/// `main` exits non-zero without printing it again.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AlreadyReported(pub String);
