use std::fs;
use std::path::Path;

use fsinspect::{dir, file, FileInfo, InspectError};

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

#[test]
fn test_file_size_matches_length() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("data.bin");
    write(&path, &[7u8; 4096]);

    assert_eq!(file::size(&path), 4096);
    assert_eq!(FileInfo::capture(&path).size, 4096);
}

#[test]
fn test_md5_is_deterministic_and_content_sensitive() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    write(&a, b"first fixture");
    write(&b, b"second fixture");

    let first = file::md5(&a);
    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(file::md5(&a), first);
    assert_ne!(file::md5(&b), first);
}

#[test]
fn test_sentinels_on_missing_paths() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("nope");

    assert_eq!(file::size(&missing), 0);
    assert_eq!(file::md5(&missing), "");
    assert_eq!(dir::size(&missing), 0);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_reports_false() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("secret");
    write(&path, b"x");
    assert!(file::is_readable(&path));

    fs::set_permissions(&path, fs::Permissions::from_mode(0o000))
        .expect("Failed to change permissions");
    // Privileged users bypass permission bits.
    if fs::File::open(&path).is_err() {
        assert!(!file::is_readable(&path));
        assert_eq!(file::md5(&path), "");
    }
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644))
        .expect("Failed to restore permissions");
}

#[test]
fn test_directory_size_is_sum_of_nested_files() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temp_dir.path().join("tree");
    write(&root.join("one"), &[0u8; 10]);
    write(&root.join("a/two"), &[0u8; 20]);
    write(&root.join("a/b/c/three"), &[0u8; 30]);
    write(&root.join("a/b/.four"), &[0u8; 40]);

    assert_eq!(dir::size(&root), 100);
}

#[test]
fn test_directory_emptiness_follows_contents() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temp_dir.path().join("d");
    fs::create_dir(&root).expect("Failed to create dir");
    assert!(dir::is_empty(&root));
    assert!(dir::is_readable(&root));

    write(&root.join("zero"), b"");
    assert!(!dir::is_empty(&root));

    fs::remove_file(root.join("zero")).expect("Failed to remove file");
    assert!(dir::is_empty(&root));
}

#[test]
fn test_copy_overwrites_and_creates_destination() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    write(&src.join("A"), b"x");
    write(&src.join("sub/B"), b"y");

    dir::copy(&src, &dst).expect("First copy should succeed");
    assert_eq!(fs::read_to_string(dst.join("A")).expect("Failed to read A"), "x");
    assert_eq!(fs::read_to_string(dst.join("sub/B")).expect("Failed to read B"), "y");

    write(&dst.join("A"), b"stale and longer");
    dir::copy(&src, &dst).expect("Second copy should succeed");
    assert_eq!(fs::read_to_string(dst.join("A")).expect("Failed to read A"), "x");
}

#[test]
fn test_copy_errors_are_descriptive() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing");

    let err = dir::copy(&missing, temp_dir.path().join("dst")).expect_err("Copy should fail");
    assert!(matches!(err, InspectError::SourceNotFound { .. }));
    assert!(err.to_string().contains("missing"));

    let err = dir::copy("", temp_dir.path().join("dst")).expect_err("Copy should fail");
    assert!(err.to_string().contains("source path is empty"));

    let src = temp_dir.path().join("src");
    fs::create_dir(&src).expect("Failed to create src");
    let err = dir::copy(&src, "").expect_err("Copy should fail");
    assert!(err.to_string().contains("destination path is empty"));
}

#[test]
fn test_copy_failure_keeps_files_already_copied() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    for name in ["f0", "f1", "f2", "f3"] {
        write(&src.join(name), name.as_bytes());
    }
    // One target is a non-empty directory, so replacing it fails.
    write(&dst.join("f2/blocker"), b"");

    let err = dir::copy(&src, &dst).expect_err("Copy should fail");
    assert!(matches!(err, InspectError::RemoveFailed { .. }));

    // Entries are visited by name: f0 and f1 land before the failure, f3 never does.
    assert_eq!(fs::read_to_string(dst.join("f0")).expect("Failed to read f0"), "f0");
    assert_eq!(fs::read_to_string(dst.join("f1")).expect("Failed to read f1"), "f1");
    assert!(!dst.join("f3").exists());
    assert!(dst.join("f2/blocker").exists());
}
