#![warn(missing_docs)]
//! SteadyBench Core - Adaptive Runner
//!
//! This crate measures the wall-clock cost of a single call to an operation:
//! - Batch timer running the operation back-to-back on a steady clock
//! - Calibration of iterations-per-sample against timer resolution
//! - Refinement until the best samples agree, bounded by a hard time cap
//! - Clamped configuration; degenerate values are corrected, never rejected

mod batch;
mod config;
mod measure;
mod result;
mod runner;
mod window;

pub use batch::time_batch;
pub use config::{
    ACCURACY_CEILING, ACCURACY_FLOOR, BenchConfig, DEFAULT_ACCURACY, DEFAULT_MAX_TIME,
    DEFAULT_MIN_TIME, MIN_TIME_FLOOR,
};
pub use measure::{Clock, SteadyClock, seconds_to_duration};
pub use result::{BenchResult, format_seconds};
pub use runner::{AdaptiveRunner, Phase, benchmark, benchmark_with};
pub use window::{BestTimes, MIN_SAMPLES, WINDOW_CAPACITY};
