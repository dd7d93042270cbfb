//! Filesystem utilities.
//!
//! Generated files are often written while other build processes (parallel
//! project builds, IDE design-time builds) hold them open, so writes are
//! atomic and retried on transient errors.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// How often and how long to retry a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,

    /// Delay between attempts, in milliseconds
    pub delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            attempts,
            delay_ms: delay.as_millis() as u64,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 10,
            delay_ms: 100,
        }
    }
}

/// What a write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already had the requested content and was left alone.
    Unchanged,
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Whether an I/O error is worth retrying.
pub fn is_transient(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    if cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33)) {
        return true;
    }
    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::Interrupted
            | io::ErrorKind::TimedOut
            | io::ErrorKind::ResourceBusy
    )
}

/// Run `op` until it succeeds, fails with a non-transient error, or runs
/// out of attempts.
pub fn retry_io<T>(policy: &RetryPolicy, mut op: impl FnMut() -> io::Result<T>) -> io::Result<T> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts && is_transient(&e) => {
                tracing::debug!(
                    "transient I/O error (attempt {}/{}): {}",
                    attempt,
                    attempts,
                    e
                );
                thread::sleep(policy.delay());
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write `contents` to `path` atomically, creating parent directories and
/// retrying transient failures.
///
/// An existing file with identical content is not touched, so incremental
/// builds see an unchanged timestamp.
pub fn write_atomic_with_retry(
    path: &Path,
    contents: &str,
    policy: &RetryPolicy,
) -> Result<WriteOutcome> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            tracing::debug!("{} is up to date", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
    }

    retry_io(policy, || write_atomic(path, contents))
        .with_context(|| format!("failed to write file: {}", path.display()))?;

    Ok(WriteOutcome::Written)
}
