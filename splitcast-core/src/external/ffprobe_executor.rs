//! FFprobe integration for extracting duration and bitrate.
//!
//! Probing reads the container-level `format.duration` and `format.bit_rate`
//! fields, matching what the segment planner needs. Any probe failure is a
//! per-file `ProbeFailed`: the caller logs it and moves on to the next file.

use crate::error::{CoreError, CoreResult};
use crate::planner::MediaDescriptor;
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Trait for probing media files.
///
/// The pipeline is generic over this seam so tests can supply canned
/// descriptors instead of invoking a real ffprobe.
pub trait MediaProber {
    /// Probes the file at `input_path` for duration and average bitrate.
    fn probe(&self, input_path: &Path) -> CoreResult<MediaDescriptor>;
}

/// Implementation of [`MediaProber`] using the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for CrateFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaDescriptor> {
        log::debug!("Running ffprobe on: {}", input_path.display());

        let filename = input_path.display().to_string();
        let metadata =
            ffprobe(input_path).map_err(|err| map_ffprobe_error(&filename, &err))?;

        let duration_secs = metadata
            .format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| {
                CoreError::ProbeFailed(
                    filename.clone(),
                    "missing or unparsable format duration".to_string(),
                )
            })?;

        let bitrate_bps = metadata
            .format
            .bit_rate
            .as_deref()
            .and_then(|b| b.parse::<f64>().ok())
            .ok_or_else(|| {
                CoreError::ProbeFailed(
                    filename.clone(),
                    "missing or unparsable format bit rate".to_string(),
                )
            })?;

        Ok(MediaDescriptor {
            duration_secs,
            bitrate_bps,
        })
    }
}

fn map_ffprobe_error(filename: &str, err: &FfProbeError) -> CoreError {
    let cause = match err {
        FfProbeError::Io(io_err) => format!("failed to run ffprobe: {io_err}"),
        FfProbeError::Status(output) => format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ),
        FfProbeError::Deserialize(e) => format!("unparsable ffprobe output: {e}"),
        other => format!("unknown ffprobe error: {other:?}"),
    };
    CoreError::ProbeFailed(filename.to_string(), cause)
}
