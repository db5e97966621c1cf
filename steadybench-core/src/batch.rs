//! Batch Timer
//!
//! The leaf measurement primitive: run an operation back-to-back a fixed
//! number of times and report the per-iteration cost of the fastest batch.

use crate::measure::Clock;
use std::hint::black_box;

/// Time `iterations` consecutive calls of `op`, `meta_samples` times over,
/// and return the best per-iteration time in seconds.
///
/// Both counts are treated as at least 1. Panics raised by `op` propagate to
/// the caller untouched.
#[inline]
pub fn time_batch<C, T, F>(clock: &C, op: &mut F, iterations: u64, meta_samples: u64) -> f64
where
    C: Clock + ?Sized,
    F: FnMut() -> T,
{
    let iterations = iterations.max(1);
    let mut best = f64::INFINITY;

    for _ in 0..meta_samples.max(1) {
        let start = clock.now();
        for _ in 0..iterations {
            black_box(op());
        }
        let end = clock.now();
        best = best.min(clock.seconds_between(start, end));
    }

    best / iterations as f64
}
