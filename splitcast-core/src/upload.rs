//! Discord upload client.
//!
//! Delivery needs nothing from the gateway: the client is an http-only
//! Serenity handle bound to one channel, constructed once and passed by
//! reference into the upload calls. Each [`UploadBatch`] becomes exactly one
//! message carrying all of the batch's files as attachments.

use crate::error::{CoreError, CoreResult};
use crate::grouping::UploadBatch;
use crate::utils::get_filename_safe;
use async_trait::async_trait;
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::http::Http;
use serenity::model::id::ChannelId;

/// Trait for sending upload batches.
///
/// The pipeline depends on this seam rather than on Serenity directly, so
/// tests can record sends without a network connection.
#[async_trait]
pub trait Uploader {
    /// Sends one batch as a single message. On error the batch's files must
    /// be left untouched on disk.
    async fn send_batch(&self, batch: &UploadBatch) -> CoreResult<()>;
}

/// Implementation of [`Uploader`] backed by the Discord REST API.
pub struct DiscordUploader {
    http: Http,
    channel_id: ChannelId,
}

impl DiscordUploader {
    /// Creates an uploader bound to one channel.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` when the token is empty or the
    /// channel id is zero.
    pub fn new(token: &str, channel_id: u64) -> CoreResult<Self> {
        if token.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Discord token must not be empty".to_string(),
            ));
        }
        if channel_id == 0 {
            return Err(CoreError::InvalidInput(
                "Discord channel id must not be zero".to_string(),
            ));
        }

        Ok(Self {
            http: Http::new(token),
            channel_id: ChannelId::new(channel_id),
        })
    }
}

#[async_trait]
impl Uploader for DiscordUploader {
    async fn send_batch(&self, batch: &UploadBatch) -> CoreResult<()> {
        let mut attachments = Vec::with_capacity(batch.files.len());
        for file in &batch.files {
            let attachment = CreateAttachment::path(&file.path).await.map_err(|e| {
                CoreError::UploadFailed(format!(
                    "could not read attachment {}: {e}",
                    file.path.display()
                ))
            })?;
            attachments.push(attachment);
        }

        let filenames: Vec<String> = batch
            .files
            .iter()
            .map(|f| get_filename_safe(&f.path).unwrap_or_else(|_| "<unnamed>".to_string()))
            .collect();

        self.channel_id
            .send_files(&self.http, attachments, CreateMessage::new())
            .await
            .map_err(|e| {
                CoreError::UploadFailed(format!(
                    "sending [{}] failed: {e}",
                    filenames.join(", ")
                ))
            })?;

        log::info!("Sent {} files in one message", batch.files.len());
        Ok(())
    }
}
