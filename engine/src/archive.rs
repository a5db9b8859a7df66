//! Zip extraction through the system `unzip` tool (macOS only).

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Extract `zip` into `destination`, overwriting existing files quietly.
///
/// Returns the exit code of `unzip` (`-1` if it was killed by a signal).
pub fn unzip<P, Q>(zip: P, destination: Q) -> io::Result<i32>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let zip = zip.as_ref();
    let destination = destination.as_ref();
    debug!(zip = %zip.display(), destination = %destination.display(), "running unzip");

    let status = Command::new("unzip")
        .arg("-q")
        .arg("-o")
        .arg(zip)
        .arg("-d")
        .arg(destination)
        .status()?;

    Ok(status.code().unwrap_or(-1))
}
