//! Worker context for slow filesystem work.
//!
//! Size and hash computations are submitted to a process-wide bounded
//! `rayon` pool and joined synchronously through a one-shot channel. The
//! caller still blocks; what it gains is that the I/O happens on a worker
//! thread, leaving the caller's own thread identity free of it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use crossbeam_channel::bounded;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::error::InspectError;

static POOL: OnceLock<ThreadPool> = OnceLock::new();

/// Sizing of the worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads (at least 1)
    pub num_threads: usize,
}

impl PoolConfig {
    pub fn with_threads(num_threads: usize) -> Self {
        PoolConfig {
            num_threads: num_threads.max(1),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        let n = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        PoolConfig::with_threads(n)
    }
}

fn build_pool(config: PoolConfig) -> Result<ThreadPool, InspectError> {
    ThreadPoolBuilder::new()
        .num_threads(config.num_threads.max(1))
        .thread_name(|i| format!("fsinspect-worker-{i}"))
        .panic_handler(|_| warn!("worker task panicked"))
        .build()
        .map_err(|e| InspectError::WorkerFailed {
            task: format!("cannot build worker pool: {e}"),
        })
}

/// Size the worker pool explicitly.
///
/// Must run before the first dispatch; once the pool exists its size is fixed
/// and this returns `InspectError::WorkerFailed`.
pub fn configure_pool(config: PoolConfig) -> Result<(), InspectError> {
    if POOL.get().is_some() {
        return Err(InspectError::WorkerFailed {
            task: "worker pool already initialized".to_string(),
        });
    }
    let pool = build_pool(config)?;
    POOL.set(pool).map_err(|_| InspectError::WorkerFailed {
        task: "worker pool already initialized".to_string(),
    })?;
    debug!(threads = config.num_threads, "worker pool configured");
    Ok(())
}

fn pool() -> Result<&'static ThreadPool, InspectError> {
    if let Some(pool) = POOL.get() {
        return Ok(pool);
    }
    let pool = build_pool(PoolConfig::default())?;
    Ok(POOL.get_or_init(|| pool))
}

/// Run `job` on a worker thread and block until it finishes.
///
/// A call made from a thread that already belongs to a rayon pool runs
/// inline, so nested dispatches never wait on the pool they occupy. A panic
/// in `job` comes back as `InspectError::WorkerFailed`.
pub fn run_blocking<T, F>(task: &str, job: F) -> Result<T, InspectError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if rayon::current_thread_index().is_some() {
        return panic::catch_unwind(AssertUnwindSafe(job)).map_err(|_| {
            InspectError::WorkerFailed {
                task: task.to_string(),
            }
        });
    }

    let pool = pool()?;
    let (tx, rx) = bounded(1);
    debug!(task, "dispatching to worker pool");
    pool.spawn(move || {
        // Receiver only goes away if the caller is gone.
        let _ = tx.send(job());
    });

    rx.recv().map_err(|_| InspectError::WorkerFailed {
        task: task.to_string(),
    })
}
