#![warn(missing_docs)]
//! # SteadyBench
//!
//! Adaptive micro-benchmarking: measure the wall-clock cost of one call with
//! as little configuration as possible.
//!
//! - **Calibration**: iterations per sample grow until timer resolution no
//!   longer matters
//! - **Refinement**: sampling continues until the best three samples agree
//!   within a relative tolerance
//! - **Hard cap**: no new sample starts once `max_time` has been measured
//! - **Best, not mean**: noise only adds time, so the fastest sample is the
//!   reported cost
//!
//! ## Quick Start
//!
//! ```
//! use steadybench::benchmark_with;
//! use steadybench::BenchConfig;
//!
//! let data: Vec<u64> = (0..1_000).collect();
//! let result = benchmark_with(|| data.iter().sum::<u64>(), &BenchConfig::from_min_time(0.001));
//! let seconds: f64 = result.into();
//! assert!(seconds > 0.0);
//! ```
//!
//! ## Custom Clocks
//!
//! Any [`Clock`] can drive the runner, which makes the algorithm testable
//! with a simulated clock:
//!
//! ```ignore
//! let result = AdaptiveRunner::with_clock(BenchConfig::default(), &my_clock).run(op);
//! ```

// Re-export core types
pub use steadybench_core::{
    AdaptiveRunner, BenchConfig, BenchResult, BestTimes, Clock, Phase, SteadyClock, benchmark,
    benchmark_with, format_seconds, time_batch,
};

/// Tunables and their ranges
pub mod limits {
    pub use steadybench_core::{
        ACCURACY_CEILING, ACCURACY_FLOOR, DEFAULT_ACCURACY, DEFAULT_MAX_TIME, DEFAULT_MIN_TIME,
        MIN_SAMPLES, MIN_TIME_FLOOR, WINDOW_CAPACITY,
    };
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{AdaptiveRunner, BenchConfig, BenchResult, benchmark, benchmark_with};
}

/// Run the SteadyBench CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     steadybench::run().unwrap();
/// }
/// ```
pub use steadybench_cli::run;
