//! Single-entry inspection: size, readability and MD5 digest.
//!
//! `size` and `md5` run on the worker pool and keep the sentinel contract
//! (`0` / empty string on any failure). The `try_*` forms run the same work
//! and hand back the error instead.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use tracing::warn;

use crate::bytes::MEGAOCTET;
use crate::error::InspectError;
use crate::model::{HashResult, SizeResult};
use crate::worker;

/// Size of one read while hashing.
pub const HASH_CHUNK_SIZE: usize = MEGAOCTET as usize;

/// Size of `path` in bytes, or `0` if it cannot be determined.
///
/// A zero here is ambiguous with an empty file; use [`try_size`] when the
/// difference matters.
pub fn size<P: AsRef<Path>>(path: P) -> SizeResult {
    let path = path.as_ref();
    match try_size(path) {
        Ok(size) => size,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "size unavailable, reporting 0");
            0
        }
    }
}

/// Size of `path` in bytes, computed on the worker pool.
///
/// Regular files report their filesystem length. Symbolic links are not
/// followed: on Windows they report the byte length of the stored target,
/// elsewhere they report 0.
pub fn try_size<P: AsRef<Path>>(path: P) -> Result<SizeResult, InspectError> {
    let path = path.as_ref().to_path_buf();
    worker::run_blocking("file size", move || measure_size(&path))?
}

fn measure_size(path: &Path) -> Result<SizeResult, InspectError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| InspectError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.file_type().is_symlink() {
        return symlink_size(path);
    }

    Ok(clamp_len(metadata.len()))
}

#[cfg(windows)]
fn symlink_size(path: &Path) -> Result<SizeResult, InspectError> {
    let target = fs::read_link(path).map_err(|e| InspectError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(clamp_len(target.as_os_str().len() as u64))
}

#[cfg(not(windows))]
fn symlink_size(_path: &Path) -> Result<SizeResult, InspectError> {
    Ok(0)
}

fn clamp_len(len: u64) -> SizeResult {
    SizeResult::try_from(len).unwrap_or(SizeResult::MAX)
}

/// Whether `path` can be opened for reading right now.
///
/// Symbolic links are never readable outside Windows. Directories are not
/// files and report false.
pub fn is_readable<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();

    #[cfg(not(windows))]
    {
        let is_link = fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if is_link {
            return false;
        }
    }

    match File::open(path) {
        Ok(file) => file.metadata().map(|m| !m.is_dir()).unwrap_or(false),
        Err(_) => false,
    }
}

/// MD5 digest of the contents of `path`, or an empty string on failure.
pub fn md5<P: AsRef<Path>>(path: P) -> HashResult {
    let path = path.as_ref();
    match try_md5(path) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "md5 unavailable, reporting empty digest");
            String::new()
        }
    }
}

/// MD5 digest of the contents of `path`, computed on the worker pool.
pub fn try_md5<P: AsRef<Path>>(path: P) -> Result<HashResult, InspectError> {
    let path = path.as_ref().to_path_buf();
    worker::run_blocking("file md5", move || compute_md5(&path))?
}

fn compute_md5(path: &Path) -> Result<HashResult, InspectError> {
    let mut file = File::open(path).map_err(|e| InspectError::OpenFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let expected = file.metadata().map(|m| m.len()).unwrap_or(0);

    let mut context = md5::Context::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];
    let mut consumed: u64 = 0;

    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                context.consume(&buffer[..n]);
                consumed += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(InspectError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    // Reads ran dry before the length the file reported.
    if consumed < expected {
        return Err(InspectError::ReadError {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read {consumed} of {expected} bytes"),
            ),
        });
    }

    Ok(format!("{:x}", context.compute()))
}
