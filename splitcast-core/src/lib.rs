//! Core library for splitting videos into size-bounded segments and
//! uploading them to a Discord channel in grouped batches.
//!
//! Splitting is a stream copy through ffmpeg's segment muxer; the segment
//! count comes from the pure [`planner`] module. Finished parts (and any
//! images) land in an output directory, from which the [`grouping`] module
//! reconstructs per-source groups and partitions them into upload batches of
//! at most ten files, the platform's per-message attachment limit.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use splitcast_core::{CoreConfig, pipeline};
//! use splitcast_core::external::{CrateFfprobeExecutor, SidecarSpawner, StdFsMetadataProvider};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/videos"),
//!     PathBuf::from("split_videos"),
//! );
//!
//! let summary = pipeline::split_directory(
//!     &SidecarSpawner,
//!     &CrateFfprobeExecutor::new(),
//!     &StdFsMetadataProvider,
//!     &config,
//! ).unwrap();
//! println!("Created {} parts", summary.parts_created());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod extract;
pub mod grouping;
pub mod pipeline;
pub mod planner;
pub mod upload;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, DEFAULT_OUTPUT_DIR};
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use grouping::{
    BatchedGroup, FileGroup, MAX_BATCH_SIZE, OutputFile, PART_MARKER, UploadBatch, group_and_batch,
    group_files,
};
pub use pipeline::{SplitSummary, UploadSummary, split_directory, split_files, upload_directory};
pub use planner::{DEFAULT_TARGET_SIZE_MB, MediaDescriptor, SegmentPlan, plan_segments};
pub use upload::{DiscordUploader, Uploader};
pub use utils::{format_bytes, format_duration};
