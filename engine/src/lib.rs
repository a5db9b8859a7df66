//! # fsinspect - Filesystem Inspection Library
//!
//! Stateless helpers for inspecting and copying filesystem entries.
//!
//! ## Overview
//!
//! - File size, readability and MD5 digest (`file`)
//! - Directory size, readability, emptiness and recursive copy (`dir`)
//! - Slow work (sizes, digests) runs on a bounded worker pool and is joined
//!   before returning, so every call is synchronous for its caller
//! - Two error styles: `size`/`md5` return `0`/`""` on failure, while
//!   `copy` and the `try_*` variants return `InspectError`
//!
//! ## Basic Usage
//!
//! ```no_run
//! use fsinspect::{dir, file};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = dir::size("/var/log");
//! println!("{} bytes, digest {}", file::size("/etc/hosts"), file::md5("/etc/hosts"));
//!
//! dir::copy("/data/in", "/data/out")?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - **model**: `FileInfo` snapshot and result aliases
//! - **error**: `InspectError`
//! - **worker**: bounded pool with blocking join
//! - **file** / **dir**: the inspectors
//! - **bytes**, **strings**, **dates**, **net**: small standalone helpers

pub mod bytes;
pub mod dates;
pub mod dir;
pub mod error;
pub mod file;
pub mod model;
pub mod net;
pub mod strings;
pub mod worker;

#[cfg(target_os = "macos")]
pub mod archive;

pub use error::InspectError;
pub use model::{FileInfo, HashResult, SizeResult};
pub use worker::{configure_pool, PoolConfig};
