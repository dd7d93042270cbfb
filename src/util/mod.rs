//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod shell;

pub use config::Config;
pub use diagnostic::Diagnostic;
pub use fs::{write_atomic_with_retry, RetryPolicy, WriteOutcome};
pub use shell::Shell;
