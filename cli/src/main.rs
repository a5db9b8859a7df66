//! fsinspect - Command-line interface for the inspection library.
//!
//! Thin wrapper exposing each library operation as a subcommand. Results go
//! to stdout, diagnostics to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fsinspect::{bytes, configure_pool, dir, file, net, FileInfo, PoolConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// fsinspect - Inspect and copy files and directories
#[derive(Parser, Debug)]
#[command(name = "fsinspect")]
#[command(version = "0.1.0")]
#[command(about = "Sizes, digests, readability checks and overwriting directory copies")]
struct Args {
    /// Worker threads used for size and hash computation
    #[arg(long, value_name = "N", global = true)]
    workers: Option<usize>,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Size in bytes of a file, or of every file under a directory
    Size {
        path: PathBuf,

        /// Print with a unit (o, ko, Mo, Go, To)
        #[arg(long)]
        human: bool,
    },

    /// MD5 digest of a file
    Md5 { path: PathBuf },

    /// Whether a file can be opened, or a directory enumerated
    Readable { path: PathBuf },

    /// Whether a directory has no entries
    Empty { path: PathBuf },

    /// Snapshot of a filesystem entry
    Stat {
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy a directory tree, overwriting existing files
    Copy { src: PathBuf, dst: PathBuf },

    /// Local non-loopback IPv4 address
    Ip,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore a second init (tests call run_cli repeatedly).
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Parse arguments, run the command, exit 0 on success and 2 on error
fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    let exit_code = match run_cli(&args, &mut stdout.lock()) {
        Ok(()) => 0,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            2
        }
    };

    std::process::exit(exit_code);
}

/// Main CLI logic - separated for testability
fn run_cli(args: &Args, out: &mut dyn Write) -> Result<(), String> {
    if let Some(workers) = args.workers {
        debug!(workers, "sizing worker pool from --workers");
        configure_pool(PoolConfig::with_threads(workers))
            .map_err(|e| format!("Cannot size worker pool: {}", e))?;
    }

    debug!(command = ?args.command, "dispatching command");
    match &args.command {
        Command::Size { path, human } => {
            let info = FileInfo::capture(path);
            let size = if info.is_dir {
                dir::try_size(path)
            } else {
                file::try_size(path)
            }
            .map_err(|e| e.to_string())?;

            if *human {
                emit(out, &bytes::format_octets(size))
            } else {
                emit(out, &size.to_string())
            }
        }
        Command::Md5 { path } => {
            let digest = file::try_md5(path).map_err(|e| e.to_string())?;
            emit(out, &digest)
        }
        Command::Readable { path } => {
            let readable = if FileInfo::capture(path).is_dir {
                dir::is_readable(path)
            } else {
                file::is_readable(path)
            };
            emit(out, &readable.to_string())
        }
        Command::Empty { path } => {
            let empty = dir::try_is_empty(path).map_err(|e| e.to_string())?;
            emit(out, &empty.to_string())
        }
        Command::Stat { path, json } => {
            let info = FileInfo::capture(path);
            if *json {
                let text = serde_json::to_string_pretty(&info)
                    .map_err(|e| format!("Cannot serialize entry: {}", e))?;
                emit(out, &text)
            } else {
                let text = format!(
                    "name: {}\npath: {}\nexists: {}\nsymlink: {}\nfile: {}\ndir: {}\nsize: {} ({})",
                    info.display_name(),
                    info.path.display(),
                    info.exists,
                    info.is_symlink,
                    info.is_file,
                    info.is_dir,
                    info.size,
                    bytes::format_octets(i64::try_from(info.size).unwrap_or(i64::MAX)),
                );
                emit(out, &text)
            }
        }
        Command::Copy { src, dst } => {
            dir::copy(src, dst).map_err(|e| format!("Copy failed: {}", e))?;
            emit(out, &format!("Copied {} to {}", src.display(), dst.display()))
        }
        Command::Ip => match net::ipv4() {
            Some(addr) => emit(out, &addr.to_string()),
            None => Err("No non-loopback IPv4 address found".to_string()),
        },
    }
}

fn emit(out: &mut dyn Write, line: &str) -> Result<(), String> {
    writeln!(out, "{}", line).map_err(|e| format!("Cannot write output: {}", e))
}
