//! Implementation of the 'upload' subcommand.
//!
//! Constructs the Discord client once and drains the output directory
//! through it, batch by batch.

use crate::error::CliResult;

use splitcast_core::pipeline::{self, UploadSummary};
use splitcast_core::upload::DiscordUploader;

use std::path::Path;

/// Uploads everything pending in `output_dir` to the configured channel.
pub async fn execute(
    output_dir: &Path,
    token: &str,
    channel_id: u64,
    batch_size: usize,
) -> CliResult<UploadSummary> {
    let uploader = DiscordUploader::new(token, channel_id)?;
    pipeline::upload_directory(&uploader, output_dir, batch_size).await
}
