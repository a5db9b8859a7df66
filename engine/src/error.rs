//! Error types for the inspection engine.
//!
//! `InspectError` is returned by every fail-fast operation (directory copy,
//! the `try_*` size and hash variants). The sentinel operations (`size`,
//! `md5`) never surface it; they log it and fall back to `0` or an empty
//! string.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while inspecting or copying filesystem entries.
///
/// Every variant that wraps an `io::Error` names the path it failed on, so
/// the message alone is enough to locate the offending entry.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Path argument is empty or otherwise unusable
    #[error("Invalid path: {} ({reason})", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// Source directory does not exist
    #[error("Source directory not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Failed to create a directory (or one of its parents)
    #[error("Failed to create directory: {}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to enumerate a directory
    #[error("Failed to enumerate directory: {}", .path.display())]
    EnumerationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to open a file for reading
    #[error("Failed to open file: {}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read failed, or returned no bytes before end of file
    #[error("Failed to read file: {}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An existing destination file could not be removed before overwrite
    #[error("Failed to replace existing file: {}", .path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying a single file failed
    #[error("Failed to copy {} to {}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The background task panicked, or the pool could not accept it
    #[error("Worker task failed: {task}")]
    WorkerFailed { task: String },
}

impl InspectError {
    /// Extract the OS error code from this error, if available.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::DirectoryCreationFailed { source, .. }
            | Self::EnumerationFailed { source, .. }
            | Self::OpenFailed { source, .. }
            | Self::ReadError { source, .. }
            | Self::RemoveFailed { source, .. }
            | Self::CopyFailed { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// Build an `EnumerationFailed` from a `walkdir` error.
    pub(crate) fn from_walk(root: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
        Self::EnumerationFailed { path, source }
    }
}
