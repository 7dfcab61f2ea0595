//! Interactions with external command-line tools and the file system.
//!
//! Splitcast shells out to ffmpeg (splitting) and ffprobe (probing). This
//! module defines the trait seams for those interactions so the pipeline can
//! be exercised without the real binaries, plus the startup dependency check.

use crate::error::{CoreError, CoreResult};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// FFmpeg split command construction and execution.
pub mod ffmpeg;

/// Traits and implementations for spawning ffmpeg processes.
pub mod ffmpeg_executor;

/// Media probing via ffprobe.
pub mod ffprobe_executor;

pub use ffmpeg::{SplitParams, run_split, segment_output_pattern};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{CrateFfprobeExecutor, MediaProber};

/// Checks that a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output; only the ability
/// to start matters.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the command is not on PATH
/// * `CoreError::CommandStart` - the command exists but failed to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks every external tool the pipeline needs. Fatal when any is missing;
/// called once before processing starts.
pub fn check_dependencies() -> CoreResult<()> {
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    Ok(())
}

/// Trait for abstracting file metadata access.
///
/// Decouples the pipeline's size reporting from direct file system access so
/// tests can inject fixed sizes.
pub trait FileMetadataProvider {
    /// Gets the size of the file at the given path in bytes.
    fn get_size(&self, path: &Path) -> CoreResult<u64>;
}

/// Standard implementation of [`FileMetadataProvider`] using `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct StdFsMetadataProvider;

impl FileMetadataProvider for StdFsMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        Ok(std::fs::metadata(path)?.len())
    }
}
