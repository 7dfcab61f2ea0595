//! Grouping and batching of output files for upload.
//!
//! Splitting one source video produces files named `<base>_part_NNN.<ext>`.
//! This module reconstructs the logical groups from a flat list of paths,
//! orders parts numerically within each group, and partitions each group into
//! batches no larger than the platform's per-message attachment limit.
//!
//! Part suffix grammar: the last occurrence of the literal `_part_` in a file
//! stem, followed by a decimal index. A stem containing the marker with a
//! non-numeric trailing token is malformed; the grouper logs the malformed
//! suffix and falls back to treating the whole stem as the base name.

use crate::error::{CoreError, CoreResult};
use log::warn;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maximum number of attachments the target platform accepts per message.
pub const MAX_BATCH_SIZE: usize = 10;

/// Literal token marking a split-part suffix in a file stem.
pub const PART_MARKER: &str = "_part_";

/// One file pending upload: its path plus the parsed base name and optional
/// part index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    /// Logical source name, with any part marker and index stripped.
    pub base_name: String,
    /// Index parsed from a `_part_NNN` suffix, when present.
    pub part_index: Option<u32>,
}

impl OutputFile {
    /// Parses an output file from its path.
    ///
    /// A malformed part suffix is not fatal: it is logged and the whole stem
    /// becomes the base name, so the file forms its own singleton group.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PathError` if the path has no file stem.
    pub fn parse(path: &Path) -> CoreResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                CoreError::PathError(format!("No file stem for {}", path.display()))
            })?;

        let (base_name, part_index) = match parse_part_suffix(stem) {
            Ok(Some((base, index))) => (base, Some(index)),
            Ok(None) => (stem.to_string(), None),
            Err(CoreError::MalformedPartSuffix(s)) => {
                warn!("Malformed part suffix in '{s}', treating whole stem as base name");
                (stem.to_string(), None)
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path: path.to_path_buf(),
            base_name,
            part_index,
        })
    }
}

/// Splits a stem into base name and part index at the last part marker.
///
/// Returns `Ok(None)` when the stem carries no marker, and
/// `Err(CoreError::MalformedPartSuffix)` when the marker is present but the
/// trailing token is not a valid non-negative integer.
pub fn parse_part_suffix(stem: &str) -> CoreResult<Option<(String, u32)>> {
    let Some(marker_at) = stem.rfind(PART_MARKER) else {
        return Ok(None);
    };

    let base = &stem[..marker_at];
    let suffix = &stem[marker_at + PART_MARKER.len()..];

    match suffix.parse::<u32>() {
        Ok(index) => Ok(Some((base.to_string(), index))),
        Err(_) => Err(CoreError::MalformedPartSuffix(stem.to_string())),
    }
}

/// All files sharing one base name, ordered by ascending part index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub base_name: String,
    pub files: Vec<OutputFile>,
}

impl FileGroup {
    /// Partitions the group into consecutive batches of at most `batch_size`
    /// files, preserving order. A group of `n` files yields
    /// `ceil(n / batch_size)` batches, the last possibly smaller.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` when `batch_size` is zero.
    pub fn into_batches(self, batch_size: usize) -> CoreResult<Vec<UploadBatch>> {
        if batch_size == 0 {
            return Err(CoreError::InvalidInput(
                "batch size must be at least 1".to_string(),
            ));
        }

        let mut batches = Vec::with_capacity(self.files.len().div_ceil(batch_size));
        let mut files = self.files.into_iter().peekable();
        while files.peek().is_some() {
            batches.push(UploadBatch {
                files: files.by_ref().take(batch_size).collect(),
            });
        }
        Ok(batches)
    }
}

/// A bounded-size slice of one group, sent as a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub files: Vec<OutputFile>,
}

/// One group's batches, keyed by the group's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchedGroup {
    pub base_name: String,
    pub batches: Vec<UploadBatch>,
}

/// Groups paths by base name, preserving first-seen group order.
///
/// Within each group, files with a part index are sorted ascending by index
/// (numeric, not lexical); files without an index keep arrival order. The
/// sort is stable, so the result is reproducible from the same input set.
pub fn group_files(paths: &[PathBuf]) -> CoreResult<Vec<FileGroup>> {
    let mut groups: Vec<FileGroup> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for path in paths {
        let file = OutputFile::parse(path)?;
        match by_name.get(&file.base_name) {
            Some(&slot) => groups[slot].files.push(file),
            None => {
                by_name.insert(file.base_name.clone(), groups.len());
                groups.push(FileGroup {
                    base_name: file.base_name.clone(),
                    files: vec![file],
                });
            }
        }
    }

    for group in &mut groups {
        group.files.sort_by_key(|f| f.part_index);
    }

    Ok(groups)
}

/// Groups paths by base name and partitions each group into upload batches.
pub fn group_and_batch(paths: &[PathBuf], batch_size: usize) -> CoreResult<Vec<BatchedGroup>> {
    group_files(paths)?
        .into_iter()
        .map(|group| {
            let base_name = group.base_name.clone();
            Ok(BatchedGroup {
                base_name,
                batches: group.into_batches(batch_size)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn parses_part_suffix() {
        assert_eq!(
            parse_part_suffix("movie_part_007").unwrap(),
            Some(("movie".to_string(), 7))
        );
        assert_eq!(parse_part_suffix("movie").unwrap(), None);
        // Last occurrence of the marker wins.
        assert_eq!(
            parse_part_suffix("clip_part_a_part_3").unwrap(),
            Some(("clip_part_a".to_string(), 3))
        );
    }

    #[test]
    fn rejects_malformed_part_suffix() {
        assert!(matches!(
            parse_part_suffix("weird_part_abc"),
            Err(CoreError::MalformedPartSuffix(_))
        ));
        assert!(matches!(
            parse_part_suffix("weird_part_"),
            Err(CoreError::MalformedPartSuffix(_))
        ));
        assert!(matches!(
            parse_part_suffix("weird_part_-3"),
            Err(CoreError::MalformedPartSuffix(_))
        ));
    }

    #[test]
    fn malformed_suffix_falls_back_to_singleton_group() {
        let groups = group_files(&paths(&["weird_part_abc.mp4"])).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].base_name, "weird_part_abc");
        assert_eq!(groups[0].files[0].part_index, None);
    }

    #[test]
    fn groups_parts_in_numeric_order_regardless_of_input_order() {
        let groups = group_files(&paths(&[
            "movie_part_002.mp4",
            "movie_part_000.mp4",
            "movie_part_001.mp4",
        ]))
        .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].base_name, "movie");
        let indices: Vec<_> = groups[0].files.iter().map(|f| f.part_index).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn part_indices_sort_numerically_not_lexically() {
        let groups = group_files(&paths(&["a_part_10.mp4", "a_part_9.mp4"])).unwrap();
        let indices: Vec<_> = groups[0].files.iter().map(|f| f.part_index).collect();
        assert_eq!(indices, vec![Some(9), Some(10)]);
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let groups = group_files(&paths(&[
            "beta_part_000.mp4",
            "alpha.jpg",
            "beta_part_001.mp4",
            "gamma.png",
        ]))
        .unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.base_name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma"]);
        assert_eq!(groups[0].files.len(), 2);
    }

    #[test]
    fn group_of_23_batches_into_10_10_3() {
        let names: Vec<String> = (0..23).map(|i| format!("big_part_{i:03}.mp4")).collect();
        let list: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();

        let batched = group_and_batch(&list, 10).unwrap();
        assert_eq!(batched.len(), 1);
        let sizes: Vec<_> = batched[0].batches.iter().map(|b| b.files.len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);

        // Every member appears exactly once, in order.
        let all: Vec<_> = batched[0]
            .batches
            .iter()
            .flat_map(|b| b.files.iter().map(|f| f.part_index.unwrap()))
            .collect();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(matches!(
            group_and_batch(&paths(&["movie_part_000.mp4"]), 0),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn unsplit_files_form_singleton_groups() {
        let batched = group_and_batch(&paths(&["cover.jpg", "notes.png"]), 10).unwrap();
        assert_eq!(batched.len(), 2);
        assert_eq!(batched[0].base_name, "cover");
        assert_eq!(batched[0].batches.len(), 1);
        assert_eq!(batched[0].batches[0].files.len(), 1);
    }
}
