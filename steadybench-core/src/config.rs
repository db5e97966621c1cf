//! Runner Configuration
//!
//! `BenchConfig` is accepted as given and normalized with [`BenchConfig::clamped`]
//! before a run; out-of-range values are pulled into range, never rejected.

use serde::{Deserialize, Serialize};

/// Default target lower bound on total measured time (seconds)
pub const DEFAULT_MIN_TIME: f64 = 0.1;

/// Default hard upper bound on total measured time (seconds)
pub const DEFAULT_MAX_TIME: f64 = DEFAULT_MIN_TIME * 4.0;

/// Default target spread between the best and third-best sample
pub const DEFAULT_ACCURACY: f64 = 0.03;

/// Smallest accepted `min_time` (10 µs)
pub const MIN_TIME_FLOOR: f64 = 10e-6;

/// Tightest accepted accuracy target
pub const ACCURACY_FLOOR: f64 = 0.001;

/// Loosest accepted accuracy target
pub const ACCURACY_CEILING: f64 = 0.1;

/// Time budget and convergence target for one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Spend at least this much measured time (seconds). The calibration
    /// phase picks an iterations-per-sample count that puts three samples
    /// in this ballpark.
    pub min_time: f64,
    /// Never start a new sample once this much time (seconds) has been
    /// measured.
    pub max_time: f64,
    /// Stop once the third-best sample is within this relative distance of
    /// the best one. Closer to zero is more reliable but may take longer.
    pub accuracy: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            min_time: DEFAULT_MIN_TIME,
            max_time: DEFAULT_MAX_TIME,
            accuracy: DEFAULT_ACCURACY,
        }
    }
}

impl BenchConfig {
    /// Config targeting `min_time` seconds, capped at four times that.
    pub fn from_min_time(min_time: f64) -> Self {
        Self {
            min_time,
            max_time: min_time * 4.0,
            ..Self::default()
        }
    }

    /// Set the target lower bound (seconds)
    pub fn with_min_time(mut self, min_time: f64) -> Self {
        self.min_time = min_time;
        self
    }

    /// Set the hard upper bound (seconds)
    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = max_time;
        self
    }

    /// Set the accuracy target
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Pull every field into its valid range.
    ///
    /// - `min_time >= 10µs`
    /// - `0.001 <= accuracy <= 0.1`
    /// - `max_time >= min_time` (the clamped one)
    ///
    /// A NaN field takes the lower bound of its range.
    pub fn clamped(&self) -> Self {
        // f64::max/min return the non-NaN operand, unlike f64::clamp
        let min_time = self.min_time.max(MIN_TIME_FLOOR);
        Self {
            min_time,
            max_time: self.max_time.max(min_time),
            accuracy: self.accuracy.max(ACCURACY_FLOOR).min(ACCURACY_CEILING),
        }
    }
}
