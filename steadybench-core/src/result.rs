//! Benchmark Result

use crate::measure::seconds_to_duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Outcome of one adaptive benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    /// Best elapsed wall-clock time per iteration (seconds)
    pub wall_time: f64,
    /// Samples counted toward the measurement (calibration rounds that were
    /// discarded are not included)
    pub samples: u64,
    /// Iterations across all counted samples
    pub iterations: u64,
    /// Relative gap between the best and third-best sample. At most the
    /// configured accuracy unless `max_time` ran out first.
    pub accuracy: f64,
    /// Calibrated batch size
    pub iters_per_sample: u64,
    /// Measured seconds across all counted samples
    pub total_time: f64,
}

impl BenchResult {
    /// Best per-iteration time as a `Duration`
    pub fn wall_duration(&self) -> Duration {
        seconds_to_duration(self.wall_time)
    }
}

impl From<BenchResult> for f64 {
    fn from(result: BenchResult) -> f64 {
        result.wall_time
    }
}

impl From<&BenchResult> for f64 {
    fn from(result: &BenchResult) -> f64 {
        result.wall_time
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_seconds(self.wall_time))
    }
}

/// Render seconds with a unit that keeps the mantissa readable.
pub fn format_seconds(seconds: f64) -> String {
    let ns = seconds * 1e9;
    if !ns.is_finite() {
        return format!("{} s", seconds);
    }
    let abs = ns.abs();
    if abs < 1_000.0 {
        format!("{:.2} ns", ns)
    } else if abs < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if abs < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> BenchResult {
        BenchResult {
            wall_time: 1.5e-6,
            samples: 5,
            iterations: 5_000,
            accuracy: 0.01,
            iters_per_sample: 1_000,
            total_time: 0.0075,
        }
    }

    #[test]
    fn test_converts_to_wall_time() {
        let result = sample_result();
        let by_ref: f64 = (&result).into();
        let by_value: f64 = result.into();
        assert_eq!(by_ref, 1.5e-6);
        assert_eq!(by_value, 1.5e-6);
    }

    #[test]
    fn test_wall_duration() {
        let result = BenchResult {
            wall_time: 0.5,
            ..sample_result()
        };
        assert_eq!(result.wall_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_display_units() {
        assert_eq!(sample_result().to_string(), "1.50 µs");
        assert_eq!(format_seconds(12e-9), "12.00 ns");
        assert_eq!(format_seconds(0.0025), "2.50 ms");
        assert_eq!(format_seconds(3.0), "3.00 s");
    }

    #[test]
    fn test_json_roundtrip_fields() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["samples"], 5);
        assert_eq!(json["iters_per_sample"], 1_000);
    }
}
