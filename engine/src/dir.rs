//! Directory-level queries and recursive copy.
//!
//! Tree walks use `walkdir` without following symbolic links. Hidden entries
//! are included; `.` and `..` never appear.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::InspectError;
use crate::file;
use crate::model::SizeResult;
use crate::worker;

/// Whether the directory at `path` can be enumerated.
pub fn is_readable<P: AsRef<Path>>(path: P) -> bool {
    fs::read_dir(path.as_ref()).is_ok()
}

/// Whether the directory at `path` has no entries.
///
/// A directory that cannot be enumerated is reported as empty; use
/// [`try_is_empty`] to tell the two apart.
pub fn is_empty<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    try_is_empty(path).unwrap_or_else(|e| {
        debug!(path = %path.display(), error = %e, "unreadable directory treated as empty");
        true
    })
}

/// Whether the directory at `path` has no entries, or why that is unknown.
pub fn try_is_empty<P: AsRef<Path>>(path: P) -> Result<bool, InspectError> {
    let path = path.as_ref();
    let enumeration_failed = |source| InspectError::EnumerationFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(path).map_err(enumeration_failed)?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(enumeration_failed(e)),
    }
}

/// Total size of every file under `path`, or `0` if it cannot be computed.
pub fn size<P: AsRef<Path>>(path: P) -> SizeResult {
    let path = path.as_ref();
    match try_size(path) {
        Ok(size) => size,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "directory size unavailable, reporting 0");
            0
        }
    }
}

/// Total size of every file under `path`, computed on the worker pool.
///
/// Each regular file or symbolic link found in the tree contributes
/// [`file::size`]; directories contribute nothing themselves. Entries the
/// walk cannot read are skipped.
pub fn try_size<P: AsRef<Path>>(path: P) -> Result<SizeResult, InspectError> {
    let path = path.as_ref().to_path_buf();
    worker::run_blocking("directory size", move || measure_tree(&path))?
}

fn measure_tree(root: &Path) -> Result<SizeResult, InspectError> {
    let metadata = fs::metadata(root).map_err(|e| InspectError::EnumerationFailed {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(InspectError::InvalidPath {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let mut total: SizeResult = 0;
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_file() || file_type.is_symlink() {
            total = total.saturating_add(file::size(entry.path()));
        }
    }

    Ok(total)
}

/// Copy every file under `source` into `destination`, overwriting.
///
/// The destination (and any missing parents) is created when absent. Files
/// already at a target path are deleted before the copy. Only files are
/// materialized: a symbolic link to a file is copied as a regular file with
/// the target's content, and directories only appear as parents of copied
/// files.
///
/// Entries are visited in file-name order. The first failure aborts the
/// copy; files copied before it stay in place.
pub fn copy<P, Q>(source: P, destination: Q) -> Result<(), InspectError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    let destination = destination.as_ref();

    if source.as_os_str().is_empty() {
        return Err(InspectError::InvalidPath {
            path: source.to_path_buf(),
            reason: "source path is empty".to_string(),
        });
    }

    if !source.is_dir() {
        return Err(InspectError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    if destination.as_os_str().is_empty() {
        return Err(InspectError::InvalidPath {
            path: destination.to_path_buf(),
            reason: "destination path is empty".to_string(),
        });
    }

    reject_nested_destination(source, destination)?;

    if !destination.is_dir() {
        fs::create_dir_all(destination).map_err(|e| InspectError::DirectoryCreationFailed {
            path: destination.to_path_buf(),
            source: e,
        })?;
    }

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        "copying directory tree"
    );

    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| InspectError::from_walk(source, e))?;
        if !resolves_to_file(&entry) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| InspectError::InvalidPath {
                path: entry.path().to_path_buf(),
                reason: "entry lies outside the source tree".to_string(),
            })?;
        let target = destination.join(relative);

        copy_entry(entry.path(), &target)?;
    }

    Ok(())
}

fn resolves_to_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}

fn copy_entry(from: &Path, to: &Path) -> Result<(), InspectError> {
    ensure_parent_dir_exists(to)?;

    if fs::symlink_metadata(to).is_ok() {
        fs::remove_file(to).map_err(|e| InspectError::RemoveFailed {
            path: to.to_path_buf(),
            source: e,
        })?;
    }

    let bytes = fs::copy(from, to).map_err(|e| InspectError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })?;
    debug!(from = %from.display(), to = %to.display(), bytes, "copied file");

    Ok(())
}

/// Copying a tree into itself would keep discovering its own output.
///
/// Runs before anything is created, so a rejected call leaves both trees
/// untouched.
fn reject_nested_destination(source: &Path, destination: &Path) -> Result<(), InspectError> {
    let source_resolved = fs::canonicalize(source).map_err(|e| InspectError::EnumerationFailed {
        path: source.to_path_buf(),
        source: e,
    })?;

    if resolve_through_existing(destination)?.starts_with(source_resolved) {
        return Err(InspectError::InvalidPath {
            path: destination.to_path_buf(),
            reason: format!("destination lies inside source {}", source.display()),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing ancestor of `path`, then re-append the
/// components that do not exist yet.
fn resolve_through_existing(path: &Path) -> Result<PathBuf, InspectError> {
    let absolute = std::path::absolute(path).map_err(|e| InspectError::InvalidPath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut missing = Vec::new();
    let mut current = absolute.as_path();
    loop {
        match fs::canonicalize(current) {
            Ok(resolved) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(resolved, |acc: PathBuf, part| acc.join(part)));
            }
            Err(e) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    current = parent;
                }
                _ => {
                    return Err(InspectError::EnumerationFailed {
                        path: path.to_path_buf(),
                        source: e,
                    })
                }
            },
        }
    }
}

/// Ensure the parent directory of `path` exists, creating it if necessary.
fn ensure_parent_dir_exists(path: &Path) -> Result<(), InspectError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    match fs::metadata(parent) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(InspectError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "Parent path exists but is not a directory",
            ),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(parent).map_err(|e| InspectError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })
        }
        Err(e) => Err(InspectError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: e,
        }),
    }
}
