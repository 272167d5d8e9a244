//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};
use log::info;
use rayon::ThreadPoolBuilder;

use crate::crypto::{Address, Ed25519, KeyDerivation, Keypair};
use crate::matcher::PatternSpec;

use super::cpu::{CpuWorker, WorkerStats};
use super::seed::SeedSource;

/// Result of a successful vanity search.
#[derive(Debug, Clone)]
pub struct VanityResult {
    /// The matching address
    pub address: Address,
    /// The keypair behind it
    pub keypair: Keypair,
    /// Index of the batch that found it
    pub batch: u64,
}

/// Errors that can occur while starting the pool.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Failed to build lane thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to spawn dispatcher thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Runs a search in the background and collects its results.
pub struct WorkerPool {
    /// Number of lane threads
    num_workers: usize,
    /// Lanes per batch
    batch_size: u64,
    /// The pattern being searched for
    spec: PatternSpec,
    /// Dispatcher thread handle (Option to allow taking during join)
    handle: Option<JoinHandle<()>>,
    /// Channel receiver for results
    result_rx: Receiver<VanityResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Starts an ed25519 search with `num_workers` lane threads.
    pub fn new(
        num_workers: usize,
        batch_size: u64,
        spec: PatternSpec,
        seeds: SeedSource,
    ) -> Result<Self, WorkerError> {
        Self::with_derivation(num_workers, batch_size, spec, seeds, Ed25519)
    }

    /// Starts a search using a custom key derivation.
    pub fn with_derivation<D>(
        num_workers: usize,
        batch_size: u64,
        spec: PatternSpec,
        seeds: SeedSource,
        derivation: D,
    ) -> Result<Self, WorkerError>
    where
        D: KeyDerivation + 'static,
    {
        let (result_tx, result_rx) = bounded(100);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let lanes = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("vanity-lane-{}", i))
            .build()?;
        info!(
            "Lane pool ready: {} threads, {} lanes per batch",
            lanes.current_num_threads(),
            batch_size
        );

        let worker = CpuWorker::new(
            spec,
            derivation,
            seeds,
            batch_size,
            lanes,
            result_tx,
            stop_flag.clone(),
            stats.clone(),
        );

        let handle = thread::Builder::new()
            .name("vanity-dispatch".into())
            .spawn(move || worker.run())?;

        Ok(Self {
            num_workers,
            batch_size,
            spec,
            handle: Some(handle),
            result_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        })
    }

    /// Waits for a result with timeout.
    ///
    /// Returns `Some(result)` if a match is found, `None` if timeout expires.
    pub fn wait_for_result(&self, timeout: Duration) -> Option<VanityResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }

    /// Stops the search and returns every result still in flight.
    ///
    /// Keeps receiving until the dispatcher has finished its current batch and
    /// dropped its sender, so no delivered match is left in the channel.
    pub fn drain(&mut self) -> Vec<VanityResult> {
        self.stop();
        let pending: Vec<VanityResult> = self.result_rx.iter().collect();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        pending
    }

    /// Signals the dispatcher to stop after the current batch.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the search and waits for the dispatcher to exit.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Returns the number of lane threads.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the number of lanes per batch.
    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Returns the pattern being searched for.
    pub fn spec(&self) -> &PatternSpec {
        &self.spec
    }

    /// Returns the total candidates evaluated.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }

    /// Returns the total matches delivered to the result channel.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    /// Returns the number of completed batches.
    pub fn total_batches(&self) -> u64 {
        self.stats.total_batches()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_keys() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
