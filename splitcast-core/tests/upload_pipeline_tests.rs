use async_trait::async_trait;
use splitcast_core::error::{CoreError, CoreResult};
use splitcast_core::grouping::UploadBatch;
use splitcast_core::pipeline::upload_directory;
use splitcast_core::upload::Uploader;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;

/// Records every batch it is asked to send; optionally fails all sends.
#[derive(Default)]
struct RecordingUploader {
    sent: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl Uploader for RecordingUploader {
    async fn send_batch(&self, batch: &UploadBatch) -> CoreResult<()> {
        if self.fail {
            return Err(CoreError::UploadFailed("simulated network failure".into()));
        }
        let names = batch
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        self.sent.lock().unwrap().push(names);
        Ok(())
    }
}

fn touch(dir: &Path, name: &str) {
    File::create(dir.join(name)).unwrap();
}

#[tokio::test]
async fn uploads_groups_in_batches_and_cleans_up() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("split_videos");
    std::fs::create_dir(&output_dir).unwrap();

    for i in 0..12 {
        touch(&output_dir, &format!("movie_part_{i:03}.mp4"));
    }
    touch(&output_dir, "cover.jpg");

    let uploader = RecordingUploader::default();
    let summary = upload_directory(&uploader, &output_dir, 10).await.unwrap();

    assert_eq!(summary.batches_sent, 3); // 10 + 2 for the movie, 1 for the image
    assert_eq!(summary.batches_failed, 0);
    assert_eq!(summary.files_delivered, 13);

    let sent = uploader.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    // Group order is discovery order (sorted filenames): "cover" before "movie".
    assert_eq!(sent[0], vec!["cover.jpg"]);
    assert_eq!(sent[1].len(), 10);
    assert_eq!(sent[1][0], "movie_part_000.mp4");
    assert_eq!(sent[1][9], "movie_part_009.mp4");
    assert_eq!(
        sent[2],
        vec!["movie_part_010.mp4", "movie_part_011.mp4"]
    );

    // Delivered files are deleted and the emptied directory removed.
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn failed_batches_retain_their_files() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("split_videos");
    std::fs::create_dir(&output_dir).unwrap();
    touch(&output_dir, "movie_part_000.mp4");
    touch(&output_dir, "movie_part_001.mp4");

    let uploader = RecordingUploader {
        fail: true,
        ..Default::default()
    };
    let summary = upload_directory(&uploader, &output_dir, 10).await.unwrap();

    assert_eq!(summary.batches_sent, 0);
    assert_eq!(summary.batches_failed, 1);
    assert_eq!(summary.files_delivered, 0);

    // A rerun must be able to pick these up again.
    assert!(output_dir.join("movie_part_000.mp4").exists());
    assert!(output_dir.join("movie_part_001.mp4").exists());
    assert!(output_dir.exists());
}

#[tokio::test]
async fn missing_output_directory_is_a_no_op() {
    let dir = tempdir().unwrap();
    let uploader = RecordingUploader::default();
    let summary = upload_directory(&uploader, &dir.path().join("nothing_here"), 10)
        .await
        .unwrap();
    assert_eq!(summary.batches_sent, 0);
    assert!(uploader.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_batch_size_is_rejected_before_any_send() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("split_videos");
    std::fs::create_dir(&output_dir).unwrap();
    for i in 0..15 {
        touch(&output_dir, &format!("movie_part_{i:03}.mp4"));
    }

    let uploader = RecordingUploader::default();
    let result = upload_directory(&uploader, &output_dir, 50).await;

    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    // The uploader never sees a batch bigger than a single message allows.
    assert!(uploader.sent.lock().unwrap().is_empty());
    assert!(output_dir.join("movie_part_000.mp4").exists());
}

#[tokio::test]
async fn upload_rejects_zero_batch_size() {
    let dir = tempdir().unwrap();
    let uploader = RecordingUploader::default();
    let result = upload_directory(&uploader, dir.path(), 0).await;
    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
}

#[tokio::test]
async fn parts_sort_numerically_across_batches() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("out");
    std::fs::create_dir(&output_dir).unwrap();
    // Unpadded indices: lexical order would put 10 before 9.
    touch(&output_dir, "a_part_10.mp4");
    touch(&output_dir, "a_part_9.mp4");

    let uploader = RecordingUploader::default();
    upload_directory(&uploader, &output_dir, 10).await.unwrap();

    let sent = uploader.sent.lock().unwrap();
    assert_eq!(sent[0], vec!["a_part_9.mp4", "a_part_10.mp4"]);
}
