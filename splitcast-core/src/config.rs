//! Configuration for a splitcast batch run.

use crate::error::{CoreError, CoreResult};
use crate::grouping::MAX_BATCH_SIZE;
use crate::planner::DEFAULT_TARGET_SIZE_MB;
use std::path::PathBuf;

/// Default output directory for split files, relative to the working
/// directory. Doubles as the handoff surface between the splitter and the
/// uploader.
pub const DEFAULT_OUTPUT_DIR: &str = "split_videos";

/// Configuration for the split-and-upload pipeline.
///
/// Created by the consumer (typically splitcast-cli) and passed into the
/// pipeline functions. `output_dir` is created on demand and removed again
/// once every file in it has been delivered.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing input videos, images, and archives.
    pub input_dir: PathBuf,

    /// Directory where split and copied files are placed pending upload.
    pub output_dir: PathBuf,

    /// Maximum desired size of one output segment, in MB.
    pub target_size_mb: f64,

    /// Maximum number of files per upload message.
    pub batch_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with default sizing for the given directories.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` when the target size is not positive
    /// or the batch size is outside `1..=MAX_BATCH_SIZE`, and
    /// `CoreError::PathError` when the input directory does not exist.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::PathError(format!(
                "Input directory not found: {}",
                self.input_dir.display()
            )));
        }
        if !self.target_size_mb.is_finite() || self.target_size_mb <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "target size must be positive, got {}",
                self.target_size_mb
            )));
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(CoreError::InvalidInput(format!(
                "batch size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }
        Ok(())
    }
}
