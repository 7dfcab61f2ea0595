use splitcast_core::discovery::{MediaKind, classify, find_processable_files, scan_directory};
use splitcast_core::error::CoreError;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn classify_recognizes_known_extensions() {
    assert_eq!(classify(Path::new("a.mp4")), Some(MediaKind::Video));
    assert_eq!(classify(Path::new("a.MKV")), Some(MediaKind::Video));
    assert_eq!(classify(Path::new("a.jpeg")), Some(MediaKind::Image));
    assert_eq!(classify(Path::new("a.PNG")), Some(MediaKind::Image));
    assert_eq!(classify(Path::new("a.zip")), Some(MediaKind::Archive));
    assert_eq!(classify(Path::new("a.txt")), None);
    assert_eq!(classify(Path::new("no_extension")), None);
}

#[test]
fn scan_classifies_top_level_files_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("video1.mp4"))?;
    File::create(input_dir.join("video2.MOV"))?;
    File::create(input_dir.join("picture.jpg"))?;
    File::create(input_dir.join("bundle.zip"))?;
    File::create(input_dir.join("notes.txt"))?;
    fs::create_dir(input_dir.join("subdir"))?;
    File::create(input_dir.join("subdir").join("nested.mp4"))?;

    let found = scan_directory(input_dir)?;
    assert_eq!(found.videos.len(), 2);
    assert_eq!(found.images.len(), 1);
    assert_eq!(found.archives.len(), 1);
    assert_eq!(found.len(), 4);

    // Sorted by filename for reproducible processing order.
    let names: Vec<_> = found
        .videos
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["video1.mp4", "video2.MOV"]);
    Ok(())
}

#[test]
fn empty_directory_is_no_files_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("readme.md"))?;

    assert!(matches!(
        find_processable_files(dir.path()),
        Err(CoreError::NoFilesFound)
    ));
    Ok(())
}
