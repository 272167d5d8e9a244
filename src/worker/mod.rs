//! Parallel candidate search.
//!
//! This module provides:
//! - The per-lane evaluation pipeline (seed -> keypair -> address -> verdict)
//! - Seed derivation for lanes and batches
//! - Batch launches over a lane index range on a rayon pool
//! - A dispatcher thread and pool front-end with progress tracking

pub mod batch;
pub mod lane;
pub mod seed;

mod cpu;
mod pool;

pub use cpu::{CpuWorker, WorkerStats};
pub use lane::{evaluate, Candidate, MatchResult};
pub use pool::{VanityResult, WorkerError, WorkerPool};
pub use seed::SeedSource;
