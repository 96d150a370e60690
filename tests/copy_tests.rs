//! Tests for single-file copy

use pkgsync::executor::copy_file;
use pkgsync::LinkError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn create_test_file(path: &Path, content: &[u8]) {
    let mut file = fs::File::create(path).expect("Failed to create test file");
    file.write_all(content).expect("Failed to write test content");
    file.flush().expect("Failed to flush");
}

#[test]
fn test_copy_basic_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    let content = b"Hello, pkgsync! This is a test file.";
    create_test_file(&src_path, content);

    let dest_path = root.join("dest.txt");
    let bytes_copied = copy_file(&src_path, &dest_path).expect("copy_file should succeed");

    assert_eq!(bytes_copied, content.len() as u64);
    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), content);
}

#[test]
fn test_copy_creates_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");

    let dest_path = root.join("a/b/c/dest.txt");
    copy_file(&src_path, &dest_path).expect("copy_file should create parent directories");

    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        b"test content"
    );
}

#[test]
fn test_copy_overwrites_newer_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"old but authoritative");
    let old = SystemTime::now() - Duration::from_secs(7200);
    filetime::set_file_mtime(&src_path, filetime::FileTime::from_system_time(old))
        .expect("Failed to set mtime");

    let dest_path = root.join("dest.txt");
    create_test_file(&dest_path, b"newer destination edit");

    copy_file(&src_path, &dest_path).expect("copy_file should overwrite");

    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        b"old but authoritative"
    );
}

#[test]
fn test_copy_preserves_mtime() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");
    let mtime = SystemTime::now() - Duration::from_secs(3600);
    filetime::set_file_mtime(&src_path, filetime::FileTime::from_system_time(mtime))
        .expect("Failed to set mtime");

    let dest_path = root.join("dest.txt");
    copy_file(&src_path, &dest_path).expect("copy_file should succeed");

    let src_mtime = fs::metadata(&src_path)
        .and_then(|m| m.modified())
        .expect("Failed to get src mtime");
    let dest_mtime = fs::metadata(&dest_path)
        .and_then(|m| m.modified())
        .expect("Failed to get dest mtime");

    let diff = match src_mtime.duration_since(dest_mtime) {
        Ok(d) => d,
        Err(e) => e.duration(),
    };
    assert!(diff < Duration::from_secs(2), "mtime should be preserved (diff: {:?})", diff);
}

#[test]
fn test_copy_leaves_no_part_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");
    let out = root.join("out");
    copy_file(&src_path, &out.join("dest.txt")).expect("copy_file should succeed");

    let names: Vec<String> = fs::read_dir(&out)
        .expect("Failed to list out dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["dest.txt".to_string()]);
}

#[test]
fn test_copy_missing_source_is_copy_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let err = copy_file(&root.join("missing.txt"), &root.join("dest.txt"))
        .expect_err("missing source must fail");
    assert!(matches!(err, LinkError::Copy { .. }));
    assert_eq!(err.path(), Some(root.join("missing.txt").as_path()));
}

#[test]
#[cfg(unix)]
fn test_copy_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("cli.js");
    create_test_file(&src_path, b"#!/usr/bin/env node\n");
    fs::set_permissions(&src_path, fs::Permissions::from_mode(0o755))
        .expect("Failed to set permissions");

    let dest_path = root.join("bin/cli.js");
    copy_file(&src_path, &dest_path).expect("copy_file should succeed");

    let mode = fs::metadata(&dest_path)
        .expect("Failed to get dest metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755, "Permissions should be preserved");
}

#[test]
#[cfg(unix)]
fn test_copy_recreates_symlink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    create_test_file(&root.join("target.txt"), b"target");
    std::os::unix::fs::symlink("target.txt", root.join("link.txt")).expect("create symlink");

    let dest_path = root.join("out/link.txt");
    copy_file(&root.join("link.txt"), &dest_path).expect("copy_file should succeed");
    // Second copy replaces the existing link
    copy_file(&root.join("link.txt"), &dest_path).expect("copy_file should overwrite link");

    let meta = fs::symlink_metadata(&dest_path).expect("read link metadata");
    assert!(meta.file_type().is_symlink());
    assert_eq!(
        fs::read_link(&dest_path).expect("read link"),
        Path::new("target.txt")
    );
}
