//! File discovery module for finding media files to process.
//!
//! Scans the top level of the input directory and classifies files as
//! videos (split candidates), images (copied as-is), or ZIP archives
//! (extracted, then their contents rescanned). Subdirectories are not
//! searched.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Video extensions eligible for splitting (case-insensitive).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "flv", "wmv"];

/// Image extensions forwarded to the output directory unchanged.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Archive extensions extracted before processing.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// Classification of a discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Archive,
}

/// Classifies a path by extension. Returns `None` for anything splitcast
/// does not handle.
#[must_use]
pub fn classify(path: &Path) -> Option<MediaKind> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    if VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)) {
        Some(MediaKind::Video)
    } else if IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)) {
        Some(MediaKind::Image)
    } else if ARCHIVE_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)) {
        Some(MediaKind::Archive)
    } else {
        None
    }
}

/// Files found by one directory scan, partitioned by kind.
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    pub videos: Vec<PathBuf>,
    pub images: Vec<PathBuf>,
    pub archives: Vec<PathBuf>,
}

impl Discovered {
    /// Total number of discovered files across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.videos.len() + self.images.len() + self.archives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merges another scan's results into this one.
    pub fn extend(&mut self, other: Discovered) {
        self.videos.extend(other.videos);
        self.images.extend(other.images);
        self.archives.extend(other.archives);
    }
}

/// Scans the top level of `dir`, classifying every regular file.
///
/// Results are sorted by filename within each kind so that processing order
/// is reproducible across runs. An empty directory is not an error here; see
/// [`find_processable_files`] for the variant that is.
pub fn scan_directory(dir: &Path) -> CoreResult<Discovered> {
    let mut found = Discovered::default();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match classify(&path) {
            Some(MediaKind::Video) => found.videos.push(path),
            Some(MediaKind::Image) => found.images.push(path),
            Some(MediaKind::Archive) => found.archives.push(path),
            None => {}
        }
    }

    found.videos.sort();
    found.images.sort();
    found.archives.sort();
    Ok(found)
}

/// Finds files eligible for processing in the input directory.
///
/// # Errors
///
/// Returns `CoreError::NoFilesFound` when the directory contains no videos,
/// images, or archives.
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Discovered> {
    let found = scan_directory(input_dir)?;
    if found.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(found)
    }
}
