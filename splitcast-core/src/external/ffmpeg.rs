//! FFmpeg split command construction and execution.
//!
//! The split is a stream copy through ffmpeg's segment muxer: no re-encode,
//! equal-duration segments named `<stem>_part_NNN.<ext>` with a zero-padded
//! 3-digit index. Forced keyframes at each segment boundary keep cuts close
//! to the planned duration.

use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use crate::grouping::PART_MARKER;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::{Path, PathBuf};

/// Parameters for one split invocation.
#[derive(Debug, Clone)]
pub struct SplitParams {
    /// Source video to split.
    pub input_path: PathBuf,
    /// Directory receiving the numbered part files.
    pub output_dir: PathBuf,
    /// Planned duration of each segment in seconds.
    pub segment_duration_secs: f64,
}

/// Builds the output naming pattern for a split: `<stem>_part_%03d.<ext>`
/// inside `output_dir`.
///
/// # Errors
///
/// Returns `CoreError::PathError` when the input path has no usable stem.
pub fn segment_output_pattern(input_path: &Path, output_dir: &Path) -> CoreResult<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            CoreError::PathError(format!("No file stem for {}", input_path.display()))
        })?;
    let ext = input_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");

    Ok(output_dir.join(format!("{stem}{PART_MARKER}%03d.{ext}")))
}

fn build_split_command(params: &SplitParams) -> CoreResult<FfmpegCommand> {
    let pattern = segment_output_pattern(&params.input_path, &params.output_dir)?;
    let duration = format!("{}", params.segment_duration_secs);
    let keyframe_expr = format!("expr:gte(t,n_forced*{})", params.segment_duration_secs);

    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner()
        .input(params.input_path.to_string_lossy())
        // Bare `-c copy` so subtitle and data streams are carried over too,
        // not just video and audio.
        .args(["-c", "copy"])
        .format("segment")
        .args(["-segment_time", &duration])
        .args(["-reset_timestamps", "1"])
        .args(["-force_key_frames", &keyframe_expr])
        .output(pattern.to_string_lossy());

    Ok(cmd)
}

/// Runs the segment split for one video and returns the created part files,
/// sorted by part index.
///
/// # Errors
///
/// Returns `CoreError::SplitFailed` when ffmpeg exits non-zero, carrying the
/// tail of its stderr output.
pub fn run_split<S: FfmpegSpawner>(spawner: &S, params: &SplitParams) -> CoreResult<Vec<PathBuf>> {
    let filename = crate::utils::get_filename_safe(&params.input_path)?;
    log::info!(
        "Splitting {} into ~{:.1}s segments",
        filename,
        params.segment_duration_secs
    );

    std::fs::create_dir_all(&params.output_dir)?;

    let cmd = build_split_command(params)?;
    let mut process = spawner.spawn(cmd)?;

    let mut error_lines: Vec<String> = Vec::new();
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                error_lines.push(message);
            }
            FfmpegEvent::Log(_, message) => {
                log::debug!("ffmpeg: {message}");
            }
            FfmpegEvent::Error(message) => {
                error_lines.push(message);
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        let stderr = error_lines.join("\n");
        log::error!("ffmpeg split failed for {filename}: {stderr}");
        return Err(CoreError::SplitFailed(
            filename,
            command_failed_error("ffmpeg", status, stderr).to_string(),
        ));
    }

    collect_split_parts(&params.input_path, &params.output_dir)
}

/// Collects the part files a split produced for `input_path`, sorted by name
/// (the zero-padded index makes lexical and numeric order coincide here).
fn collect_split_parts(input_path: &Path, output_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            CoreError::PathError(format!("No file stem for {}", input_path.display()))
        })?;
    let prefix = format!("{stem}{PART_MARKER}");

    let mut parts: Vec<PathBuf> = std::fs::read_dir(output_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let name = path.file_name()?.to_str()?;
            (path.is_file() && name.starts_with(&prefix)).then_some(path)
        })
        .collect();
    parts.sort();
    Ok(parts)
}
