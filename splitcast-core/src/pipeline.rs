//! Batch-run orchestration: split stage and upload stage.
//!
//! The two stages communicate only through the output directory. Splitting
//! fills it with part files and copied images; uploading drains it batch by
//! batch, deleting each batch's files after a successful send and removing
//! the directory once it is empty. A failed batch leaves its files in place,
//! so rerunning the tool over the same directory retries exactly what was
//! not delivered.
//!
//! Per-file and per-batch failures are isolated: logged, counted, and never
//! allowed to abort processing of sibling files or batches. Only the startup
//! dependency check is fatal.
//!
//! The tool assumes single-instance operation per output directory; there is
//! no lock file guarding concurrent runs.

use crate::config::CoreConfig;
use crate::discovery::{self, Discovered};
use crate::error::{CoreError, CoreResult};
use crate::external::{
    FfmpegSpawner, FileMetadataProvider, MediaProber, SplitParams, check_dependencies, run_split,
};
use crate::extract::extract_archive;
use crate::grouping::{MAX_BATCH_SIZE, group_and_batch};
use crate::upload::Uploader;
use crate::utils::{format_bytes, format_duration, get_filename_safe};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Result of splitting (or copying) one input file.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub filename: String,
    pub input_size: u64,
    pub parts: usize,
}

/// Aggregate result of the split stage.
#[derive(Debug, Default)]
pub struct SplitSummary {
    pub outcomes: Vec<SplitOutcome>,
    pub images_copied: usize,
    pub files_failed: usize,
}

impl SplitSummary {
    /// Total number of part files created across all videos.
    #[must_use]
    pub fn parts_created(&self) -> usize {
        self.outcomes.iter().map(|o| o.parts).sum()
    }
}

/// Aggregate result of the upload stage.
#[derive(Debug, Default)]
pub struct UploadSummary {
    pub batches_sent: usize,
    pub batches_failed: usize,
    pub files_delivered: usize,
}

/// Splits every video in the input directory into the output directory and
/// copies images alongside. Archives are extracted into a staging directory
/// first and their contents processed like direct inputs.
///
/// # Errors
///
/// Fails fast on missing external tools, an invalid configuration, or an
/// input directory with nothing to process. Per-file probe and split
/// failures are logged and counted instead.
pub fn split_directory<S, P, M>(
    spawner: &S,
    prober: &P,
    metadata_provider: &M,
    config: &CoreConfig,
) -> CoreResult<SplitSummary>
where
    S: FfmpegSpawner,
    P: MediaProber,
    M: FileMetadataProvider,
{
    config.validate()?;
    info!("Checking for required external commands...");
    check_dependencies()?;

    let found = discovery::find_processable_files(&config.input_dir)?;
    split_files(spawner, prober, metadata_provider, config, found)
}

/// Split stage proper: processes an already-discovered set of files. Callers
/// that have not run the startup checks themselves should use
/// [`split_directory`] instead.
///
/// # Errors
///
/// Fails when the output or staging directory cannot be created. Per-file
/// probe and split failures are logged and counted instead.
pub fn split_files<S, P, M>(
    spawner: &S,
    prober: &P,
    metadata_provider: &M,
    config: &CoreConfig,
    mut found: Discovered,
) -> CoreResult<SplitSummary>
where
    S: FfmpegSpawner,
    P: MediaProber,
    M: FileMetadataProvider,
{
    std::fs::create_dir_all(&config.output_dir)?;

    // Staging area lives only as long as this run; extracted files that fail
    // to process are not retried from a stale extraction.
    let staging = if found.archives.is_empty() {
        None
    } else {
        Some(tempfile::TempDir::new()?)
    };

    let mut summary = SplitSummary::default();

    if let Some(staging) = &staging {
        for archive in std::mem::take(&mut found.archives) {
            match extract_archive(&archive, staging.path()) {
                Ok(_) => {}
                Err(e) => {
                    error!("{e}");
                    summary.files_failed += 1;
                }
            }
        }
        let extracted = discovery::scan_directory(staging.path())?;
        // Nested archives inside archives are not descended into.
        found.extend(Discovered {
            videos: extracted.videos,
            images: extracted.images,
            archives: Vec::new(),
        });
    }

    for video in &found.videos {
        match split_one_video(spawner, prober, metadata_provider, config, video) {
            Ok(outcome) => {
                info!(
                    "Created {} parts for {} ({})",
                    outcome.parts,
                    outcome.filename,
                    format_bytes(outcome.input_size)
                );
                summary.outcomes.push(outcome);
            }
            Err(e) => {
                error!("Failed to process {}: {e}", video.display());
                summary.files_failed += 1;
            }
        }
    }

    for image in &found.images {
        match copy_into(image, &config.output_dir) {
            Ok(()) => summary.images_copied += 1,
            Err(e) => {
                error!("Failed to copy {}: {e}", image.display());
                summary.files_failed += 1;
            }
        }
    }

    Ok(summary)
}

fn split_one_video<S, P, M>(
    spawner: &S,
    prober: &P,
    metadata_provider: &M,
    config: &CoreConfig,
    input_path: &Path,
) -> CoreResult<SplitOutcome>
where
    S: FfmpegSpawner,
    P: MediaProber,
    M: FileMetadataProvider,
{
    let filename = get_filename_safe(input_path)?;
    let input_size = metadata_provider.get_size(input_path)?;

    let descriptor = prober.probe(input_path)?;
    let plan = descriptor.plan(config.target_size_mb)?;
    info!(
        "Processing: {filename} ({}, {}) -> {} segment(s)",
        format_bytes(input_size),
        format_duration(descriptor.duration_secs),
        plan.segment_count
    );

    if plan.is_single_segment() {
        // Already under the target size; hand the file through unchanged.
        copy_into(input_path, &config.output_dir)?;
        return Ok(SplitOutcome {
            filename,
            input_size,
            parts: 1,
        });
    }

    let parts = run_split(
        spawner,
        &SplitParams {
            input_path: input_path.to_path_buf(),
            output_dir: config.output_dir.clone(),
            segment_duration_secs: plan.segment_duration_secs,
        },
    )?;

    Ok(SplitOutcome {
        filename,
        input_size,
        parts: parts.len(),
    })
}

fn copy_into(source: &Path, dest_dir: &Path) -> CoreResult<()> {
    let filename = get_filename_safe(source)?;
    std::fs::copy(source, dest_dir.join(filename))?;
    Ok(())
}

/// Uploads everything pending in the output directory, group by group and
/// batch by batch, strictly sequentially. Each batch's files are deleted
/// after its successful send; failed batches are retained for a rerun. The
/// output directory itself is removed once empty.
///
/// # Errors
///
/// Fails when `batch_size` is outside `1..=MAX_BATCH_SIZE`, when the output
/// directory cannot be read, or when its contents cannot be grouped; send
/// failures are counted in the summary instead.
pub async fn upload_directory<U: Uploader>(
    uploader: &U,
    output_dir: &Path,
    batch_size: usize,
) -> CoreResult<UploadSummary> {
    // A batch is one message; the platform rejects messages with more than
    // MAX_BATCH_SIZE attachments, so never hand the uploader a bigger one.
    if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
        return Err(CoreError::InvalidInput(format!(
            "batch size must be between 1 and {MAX_BATCH_SIZE}, got {batch_size}"
        )));
    }

    let mut summary = UploadSummary::default();

    if !output_dir.is_dir() {
        info!("No files to send: {} does not exist", output_dir.display());
        return Ok(summary);
    }

    let paths = pending_files(output_dir)?;
    if paths.is_empty() {
        info!("No files to send");
        return Ok(summary);
    }

    for group in group_and_batch(&paths, batch_size)? {
        info!(
            "Uploading group '{}' ({} batch(es))",
            group.base_name,
            group.batches.len()
        );
        for batch in group.batches {
            match uploader.send_batch(&batch).await {
                Ok(()) => {
                    summary.batches_sent += 1;
                    summary.files_delivered += batch.files.len();
                    for file in &batch.files {
                        if let Err(e) = std::fs::remove_file(&file.path) {
                            warn!("Could not delete {}: {e}", file.path.display());
                        }
                    }
                }
                Err(e) => {
                    // Files stay on disk; a rerun picks them up again.
                    error!("{e}");
                    summary.batches_failed += 1;
                }
            }
        }
    }

    remove_dir_if_empty(output_dir);
    Ok(summary)
}

/// Lists the files pending upload, sorted by filename for reproducible
/// group discovery order.
fn pending_files(output_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(output_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.is_file().then_some(path)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn remove_dir_if_empty(dir: &Path) {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => {
            if entries.next().is_none() {
                if let Err(e) = std::fs::remove_dir(dir) {
                    warn!("Could not remove empty output directory: {e}");
                } else {
                    info!("Removed empty output directory {}", dir.display());
                }
            }
        }
        Err(e) => warn!("Could not re-read output directory: {e}"),
    }
}
