//! Adaptive Runner
//!
//! Measures an operation in two phases:
//!
//! 1. **Calibrating** - grow the batch size (iterations per sample) until
//!    three samples at that size would already cover `min_time`. This keeps
//!    timer resolution out of the measurement.
//! 2. **Refining** - keep sampling at the calibrated size until the
//!    third-best sample is within `accuracy` of the best one and `min_time`
//!    has been spent, or until `max_time` is exhausted.
//!
//! The reported cost is the fastest sample, not the mean: scheduling noise
//! only ever adds time.

use crate::batch::time_batch;
use crate::config::BenchConfig;
use crate::measure::{Clock, SteadyClock};
use crate::result::BenchResult;
use crate::window::{BestTimes, MIN_SAMPLES};

/// Floor on the per-round time estimate used to size the next batch (seconds)
const MIN_ESTIMATE_SECONDS: f64 = 1e-9;

/// Meta-samples per sample; each sample is a single timed batch
const META_SAMPLES: u64 = 1;

/// Phase of a run, reported in trace events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Searching for a batch size that outgrows timer resolution
    Calibrating,
    /// Sampling at a fixed batch size until converged or out of time
    Refining,
    /// Result produced
    Done,
}

/// Running totals for the counted samples
#[derive(Debug, Default)]
struct Tally {
    samples: u64,
    iterations: u64,
    total_time: f64,
    window: BestTimes,
}

impl Tally {
    fn record(&mut self, per_iter: f64, iters_per_sample: u64) {
        self.samples += 1;
        self.iterations = self.iterations.saturating_add(iters_per_sample);
        self.total_time += per_iter * iters_per_sample as f64;
        self.window.push(per_iter);
    }

    fn reset(&mut self) {
        self.samples = 0;
        self.iterations = 0;
        self.total_time = 0.0;
        self.window.clear();
    }
}

/// Adaptive benchmark runner.
///
/// # Example
///
/// ```
/// use steadybench_core::{AdaptiveRunner, BenchConfig};
///
/// let config = BenchConfig::from_min_time(0.001);
/// let result = AdaptiveRunner::new(config).run(|| (0..100u64).sum::<u64>());
/// assert!(result.samples >= 3);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveRunner<C = SteadyClock> {
    config: BenchConfig,
    clock: C,
}

impl AdaptiveRunner<SteadyClock> {
    /// Runner timing with the steady wall clock
    pub fn new(config: BenchConfig) -> Self {
        Self::with_clock(config, SteadyClock)
    }
}

impl<C: Clock> AdaptiveRunner<C> {
    /// Runner timing with a custom clock. The configuration is clamped here.
    pub fn with_clock(config: BenchConfig, clock: C) -> Self {
        Self {
            config: config.clamped(),
            clock,
        }
    }

    /// Effective (clamped) configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Measure `op` and return its best per-iteration time.
    ///
    /// `op`'s return value is discarded through `black_box`. A panic inside
    /// `op` unwinds out of this call; no partial result is produced.
    pub fn run<T, F>(&self, mut op: F) -> BenchResult
    where
        F: FnMut() -> T,
    {
        let mut tally = Tally::default();

        tracing::trace!(phase = ?Phase::Calibrating, "starting run");
        let iters_per_sample = self.calibrate(&mut op, &mut tally);

        tracing::trace!(phase = ?Phase::Refining, iters_per_sample, "calibrated");
        self.refine(&mut op, &mut tally, iters_per_sample);

        let result = BenchResult {
            wall_time: tally.window.best().unwrap_or(0.0),
            samples: tally.samples,
            iterations: tally.iterations,
            accuracy: tally.window.spread(),
            iters_per_sample,
            total_time: tally.total_time,
        };
        tracing::debug!(
            phase = ?Phase::Done,
            wall_time = result.wall_time,
            samples = result.samples,
            iterations = result.iterations,
            accuracy = result.accuracy,
            "benchmark finished"
        );
        result
    }

    /// Grow the batch size until `MIN_SAMPLES` samples fill `min_time`.
    ///
    /// On return `tally` holds exactly the final round's samples.
    fn calibrate<T, F>(&self, op: &mut F, tally: &mut Tally) -> u64
    where
        F: FnMut() -> T,
    {
        let min_time = self.config.min_time;
        let mut iters_per_sample: u64 = 1;

        loop {
            tally.reset();
            for _ in 0..MIN_SAMPLES {
                let per_iter = time_batch(&self.clock, op, iters_per_sample, META_SAMPLES);
                tally.record(per_iter, iters_per_sample);
            }

            let best = tally.window.best().unwrap_or(0.0);
            if best * iters_per_sample as f64 * MIN_SAMPLES as f64 >= min_time {
                return iters_per_sample;
            }

            // Jump straight to the estimated size, but at least double
            let estimate = min_time / (best * MIN_SAMPLES as f64).max(MIN_ESTIMATE_SECONDS);
            let next = estimate.max(iters_per_sample as f64 * 2.0).round();
            tracing::trace!(best, iters_per_sample, next, "batch too short");
            // float-to-int casts saturate
            iters_per_sample = (next as u64).max(iters_per_sample.saturating_add(1));
        }
    }

    /// Sample at a fixed batch size until converged, or until `max_time`.
    fn refine<T, F>(&self, op: &mut F, tally: &mut Tally, iters_per_sample: u64)
    where
        F: FnMut() -> T,
    {
        let BenchConfig {
            min_time,
            max_time,
            accuracy,
        } = self.config;

        // Even when converged, spend at least min_time; never start a sample
        // past max_time, in case the CPU drops into a throttled state after a
        // fast start.
        while (!tally.window.converged(accuracy) || tally.total_time < min_time)
            && tally.total_time < max_time
        {
            let per_iter = time_batch(&self.clock, op, iters_per_sample, META_SAMPLES);
            tally.record(per_iter, iters_per_sample);
        }

        if !tally.window.converged(accuracy) {
            tracing::debug!(
                total_time = tally.total_time,
                max_time,
                spread = tally.window.spread(),
                "time budget exhausted before reaching accuracy target"
            );
        }
    }
}

/// Measure `op` with the default configuration.
pub fn benchmark<T, F>(op: F) -> BenchResult
where
    F: FnMut() -> T,
{
    benchmark_with(op, &BenchConfig::default())
}

/// Measure `op` with the given configuration (clamped before use).
pub fn benchmark_with<T, F>(op: F, config: &BenchConfig) -> BenchResult
where
    F: FnMut() -> T,
{
    AdaptiveRunner::new(*config).run(op)
}
