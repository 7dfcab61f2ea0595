//! Error types for the splitcast-core library.
//!
//! Per-file failures (`ProbeFailed`, `SplitFailed`) and per-batch failures
//! (`UploadFailed`) are isolated by the pipeline: they are logged and the
//! remaining files or batches continue. `DependencyNotFound` is fatal at
//! startup, before any processing begins.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for splitcast.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed part suffix in stem '{0}'")]
    MalformedPartSuffix(String),

    #[error("Probe failed for {0}: {1}")]
    ProbeFailed(String, String),

    #[error("Split failed for {0}: {1}")]
    SplitFailed(String, String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Archive extraction failed for {0}: {1}")]
    ExtractFailed(String, String),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command '{cmd}' failed ({status}): {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("No processable files found in input directory")]
    NoFilesFound,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for splitcast operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Creates a `CommandStart` error for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Creates a `CommandFailed` error from an exit status and captured stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}
