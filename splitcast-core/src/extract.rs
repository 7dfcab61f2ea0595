//! ZIP archive extraction.
//!
//! Archives found in the input directory are unpacked into a staging
//! directory before their contents are scanned like any other input files.
//! Extraction failures are per-archive: logged by the caller, never fatal to
//! the run. Entry paths are sanitized so an archive cannot write outside the
//! destination directory.

use crate::error::{CoreError, CoreResult};
use crate::utils::get_filename_safe;
use std::fs;
use std::io;
use std::path::Path;

/// Extracts all entries of `archive_path` into `dest_dir`, returning the
/// number of files written.
///
/// Entries whose names escape the destination (absolute paths, `..`) are
/// skipped with a warning rather than extracted.
///
/// # Errors
///
/// Returns `CoreError::ExtractFailed` when the archive cannot be opened or
/// read.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> CoreResult<usize> {
    let archive_name = get_filename_safe(archive_path)?;
    log::info!("Extracting archive {archive_name}");

    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| CoreError::ExtractFailed(archive_name.clone(), e.to_string()))?;

    fs::create_dir_all(dest_dir)?;

    let mut extracted = 0usize;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| CoreError::ExtractFailed(archive_name.clone(), e.to_string()))?;

        let Some(relative) = entry.enclosed_name() else {
            log::warn!(
                "Skipping archive entry with unsafe path '{}' in {archive_name}",
                entry.name()
            );
            continue;
        };
        let out_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = fs::File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
        extracted += 1;
    }

    log::info!("Extracted {extracted} files from {archive_name}");
    Ok(extracted)
}
