//! CPU batch dispatcher for vanity address generation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, Sender};
use log::{debug, warn};
use rayon::ThreadPool;

use crate::crypto::KeyDerivation;
use crate::matcher::PatternSpec;

use super::batch::run_batch;
use super::seed::SeedSource;
use super::VanityResult;

/// How long a blocked result send waits before re-checking the stop flag.
const SEND_POLL: Duration = Duration::from_millis(100);

/// Statistics shared by the dispatcher and the pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total candidates evaluated
    pub keys_generated: AtomicU64,
    /// Matches delivered to the result channel
    pub matches_found: AtomicU64,
    /// Batches completed
    pub batches: AtomicU64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }

    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }

    pub fn total_batches(&self) -> u64 {
        self.batches.load(Ordering::Relaxed)
    }
}

/// Launches batches on a dedicated rayon pool until stopped.
pub struct CpuWorker<D> {
    spec: PatternSpec,
    derivation: D,
    seeds: SeedSource,
    batch_size: u64,
    lanes: ThreadPool,
    result_tx: Sender<VanityResult>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
}

impl<D: KeyDerivation> CpuWorker<D> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spec: PatternSpec,
        derivation: D,
        seeds: SeedSource,
        batch_size: u64,
        lanes: ThreadPool,
        result_tx: Sender<VanityResult>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            spec,
            derivation,
            seeds,
            batch_size,
            lanes,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the dispatch loop.
    ///
    /// Each iteration picks a base seed, evaluates one batch and forwards its
    /// matches. Stops when the stop flag is set or the receiver goes away.
    pub fn run(mut self) {
        debug!(
            "Dispatcher started: {} lanes per batch on {} threads",
            self.batch_size,
            self.lanes.current_num_threads()
        );

        while !self.stop_flag.load(Ordering::Relaxed) {
            let batch = self.stats.total_batches();
            let base_seed = self.seeds.next_base(self.batch_size);
            debug!("Batch {} base seed {}", batch, hex::encode(base_seed));

            let (spec, derivation) = (&self.spec, &self.derivation);
            let outcome = self
                .lanes
                .install(|| run_batch(derivation, spec, &base_seed, self.batch_size));

            self.stats
                .keys_generated
                .fetch_add(outcome.lanes, Ordering::Relaxed);
            self.stats.batches.fetch_add(1, Ordering::Relaxed);

            if outcome.dropped > 0 {
                warn!(
                    "Batch {} produced {} more matches than the per-batch limit; they were dropped",
                    batch, outcome.dropped
                );
            }

            for candidate in outcome.matches {
                let result = VanityResult {
                    address: candidate.address,
                    keypair: candidate.keypair,
                    batch,
                };
                if !self.send(result) {
                    debug!("Result receiver gone, dispatcher exiting");
                    return;
                }
                self.stats.matches_found.fetch_add(1, Ordering::Relaxed);
            }
        }

        debug!("Dispatcher stopped");
    }

    /// Sends a result, giving up if the pool is stopping or the receiver is
    /// gone. Returns false when the loop should end.
    fn send(&self, mut result: VanityResult) -> bool {
        loop {
            match self.result_tx.send_timeout(result, SEND_POLL) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(r)) => {
                    if self.stop_flag.load(Ordering::Relaxed) {
                        return false;
                    }
                    result = r;
                }
                Err(SendTimeoutError::Disconnected(_)) => return false,
            }
        }
    }
}
