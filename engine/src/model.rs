//! Core data model.
//!
//! All types here are transient snapshots: nothing is cached or persisted,
//! and every operation re-reads the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Byte count returned by the size operations (`0` doubles as the failure sentinel).
pub type SizeResult = i64;

/// Lowercase hexadecimal content digest (empty string doubles as the failure sentinel).
pub type HashResult = String;

/// Snapshot of a single filesystem entry at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Absolute path of the entry
    pub path: PathBuf,

    /// True if anything exists at `path` (a dangling symlink counts)
    pub exists: bool,

    /// True if the entry itself is a symbolic link
    pub is_symlink: bool,

    /// True if the entry resolves to a regular file (links are followed)
    pub is_file: bool,

    /// True if the entry resolves to a directory (links are followed)
    pub is_dir: bool,

    /// Length reported by the filesystem, links followed; 0 when unreadable.
    ///
    /// For a symbolic link this is the target's length, whereas
    /// [`crate::file::size`] reports the link itself (0 outside Windows).
    pub size: u64,
}

impl FileInfo {
    /// Capture the current state of `path`.
    ///
    /// Never fails: a missing path yields a snapshot with every flag false.
    pub fn capture<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        let link_metadata = fs::symlink_metadata(&path).ok();
        let is_symlink = link_metadata
            .as_ref()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        let metadata = fs::metadata(&path).ok();

        FileInfo {
            exists: link_metadata.is_some(),
            is_symlink,
            is_file: metadata.as_ref().map(|m| m.is_file()).unwrap_or(false),
            is_dir: metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false),
            size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
            path,
        }
    }

    /// File name component, or the full path when there is none.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_regular_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("data.bin");
        fs::write(&path, b"12345").expect("Failed to write file");

        let info = FileInfo::capture(&path);
        assert!(info.exists);
        assert!(info.is_file);
        assert!(!info.is_dir);
        assert!(!info.is_symlink);
        assert_eq!(info.size, 5);
        assert!(info.path.is_absolute());
        assert_eq!(info.display_name(), "data.bin");
    }

    #[test]
    fn test_capture_missing_path() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let info = FileInfo::capture(temp_dir.path().join("missing"));

        assert!(!info.exists);
        assert!(!info.is_file);
        assert!(!info.is_dir);
        assert_eq!(info.size, 0);
    }

    #[test]
    fn test_capture_directory() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let info = FileInfo::capture(temp_dir.path());

        assert!(info.exists);
        assert!(info.is_dir);
        assert!(!info.is_file);
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_symlink_follows_for_kind() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let target = temp_dir.path().join("target.txt");
        fs::write(&target, b"abc").expect("Failed to write target");
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).expect("Failed to create symlink");

        let info = FileInfo::capture(&link);
        assert!(info.is_symlink);
        assert!(info.is_file);
        assert_eq!(info.size, 3);
        assert_eq!(crate::file::size(&link), 0);
    }
}
