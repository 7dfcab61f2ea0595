//! Segment planning: computing how many pieces a video must be split into.
//!
//! The planner estimates total file size from average bitrate and duration,
//! then derives the number of equal-duration segments needed to keep each
//! segment under a target size. The estimate assumes uniform bitrate across
//! the file; actual segment sizes after a stream-copy split can deviate near
//! keyframe boundaries. That imprecision is accepted and documented here
//! rather than corrected.

use crate::error::{CoreError, CoreResult};

/// Default target size for one output segment, in MB. Chosen to sit just
/// under a 10 MB per-attachment limit.
pub const DEFAULT_TARGET_SIZE_MB: f64 = 9.9;

/// Duration and average bitrate of one source video, as reported by probing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaDescriptor {
    /// Total duration in seconds.
    pub duration_secs: f64,
    /// Average bitrate in bits per second.
    pub bitrate_bps: f64,
}

impl MediaDescriptor {
    /// Plans the split for this media at the given target segment size.
    pub fn plan(&self, target_size_mb: f64) -> CoreResult<SegmentPlan> {
        plan_segments(self.duration_secs, self.bitrate_bps, target_size_mb)
    }
}

/// Result of segment planning: how many segments, and how long each one is.
///
/// Invariant: `segment_count >= 1` and
/// `segment_count as f64 * segment_duration_secs == duration_secs`
/// (within floating-point tolerance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPlan {
    /// Number of segments to produce.
    pub segment_count: u32,
    /// Duration of each segment in seconds.
    pub segment_duration_secs: f64,
}

impl SegmentPlan {
    /// Whether the plan is the trivial single-segment plan, i.e. the file is
    /// already expected to fit under the target size.
    #[must_use]
    pub fn is_single_segment(&self) -> bool {
        self.segment_count == 1
    }
}

/// Computes a [`SegmentPlan`] so that each segment's estimated size does not
/// exceed `target_size_mb`.
///
/// `estimated_bytes = bitrate_bps * duration_secs / 8` and
/// `segment_count = ceil(estimated_bytes / target_bytes)`, floored at 1: a
/// file already under the threshold still yields a (trivial) plan.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` when `duration_secs` or `target_size_mb`
/// is non-positive or non-finite, or when `bitrate_bps` is negative or
/// non-finite.
pub fn plan_segments(
    duration_secs: f64,
    bitrate_bps: f64,
    target_size_mb: f64,
) -> CoreResult<SegmentPlan> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "duration must be positive, got {duration_secs}"
        )));
    }
    if !bitrate_bps.is_finite() || bitrate_bps < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "bitrate must be non-negative, got {bitrate_bps}"
        )));
    }
    if !target_size_mb.is_finite() || target_size_mb <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "target size must be positive, got {target_size_mb}"
        )));
    }

    let estimated_bytes = bitrate_bps * duration_secs / 8.0;
    let target_bytes = target_size_mb * 1024.0 * 1024.0;

    // `as u32` saturates, so absurdly high estimates cap rather than wrap.
    let segment_count = ((estimated_bytes / target_bytes).ceil() as u32).max(1);
    let segment_duration_secs = duration_secs / f64::from(segment_count);

    Ok(SegmentPlan {
        segment_count,
        segment_duration_secs,
    })
}
