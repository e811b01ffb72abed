//! Per-run search context: seeded randomness and the time budget.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// State shared by every component of a single run.
///
/// Constructives, shakes and neighborhoods draw randomness from `rng` and
/// poll [`SearchContext::is_time_up`] at the head of their unbounded loops.
pub struct SearchContext {
    pub rng: ChaCha8Rng,
    start_time: Instant,
    deadline: Option<Instant>,
}

impl SearchContext {
    /// Create a context seeded with `seed`, expiring `time_limit` from now.
    pub fn new(seed: u64, time_limit: Option<Duration>) -> Self {
        let start_time = Instant::now();
        SearchContext {
            rng: ChaCha8Rng::seed_from_u64(seed),
            start_time,
            deadline: time_limit.map(|limit| start_time + limit),
        }
    }

    /// A context without a time limit.
    pub fn unbounded(seed: u64) -> Self {
        SearchContext::new(seed, None)
    }

    /// Check if the time budget has been exhausted.
    pub fn is_time_up(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
