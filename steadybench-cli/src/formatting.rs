//! Output Formatting
//!
//! Renders a finished run either as a terminal table or as JSON.

use serde::{Deserialize, Serialize};
use steadybench_core::{BenchConfig, BenchResult, format_seconds};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// One measured workload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResult {
    /// Workload name
    pub name: String,
    /// Value returned by the workload, printed so the work can't be elided
    pub checksum: usize,
    /// Measurement
    pub result: BenchResult,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Effective (clamped) configuration
    pub config: BenchConfig,
    /// Number of values in the demo data
    pub data_len: usize,
    /// Per-workload results, in execution order
    pub results: Vec<NamedResult>,
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &RunReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("SteadyBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "min_time: {}  max_time: {}  accuracy: {:.1}%  data: {} values\n\n",
        format_seconds(report.config.min_time),
        format_seconds(report.config.max_time),
        report.config.accuracy * 100.0,
        report.data_len
    ));

    for entry in &report.results {
        let result = &entry.result;
        let converged = result.accuracy <= report.config.accuracy;
        let icon = if converged { "✓" } else { "~" };

        output.push_str(&format!("  {} {}\n", icon, entry.name));
        output.push_str(&format!(
            "      time: {}  spread: {:.2}%  checksum: {}\n",
            format_seconds(result.wall_time),
            result.accuracy * 100.0,
            entry.checksum
        ));
        output.push_str(&format!(
            "      samples: {}  iterations: {} ({} per sample)  measured: {}\n",
            result.samples,
            result.iterations,
            result.iters_per_sample,
            format_seconds(result.total_time)
        ));
    }

    if let [baseline, candidate] = report.results.as_slice() {
        let base = baseline.result.wall_time;
        let cand = candidate.result.wall_time;
        if base > 0.0 && cand > 0.0 {
            output.push('\n');
            output.push_str(&format!(
                "{} vs {}: {:.2}x\n",
                candidate.name,
                baseline.name,
                base / cand
            ));
        }
    }

    output
}

/// Serialize the report as pretty JSON
pub fn format_json_output(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        let result = |wall_time: f64, accuracy: f64| BenchResult {
            wall_time,
            samples: 4,
            iterations: 4_000,
            accuracy,
            iters_per_sample: 1_000,
            total_time: wall_time * 4_000.0,
        };
        RunReport {
            config: BenchConfig::default(),
            data_len: 2000,
            results: vec![
                NamedResult {
                    name: "sum_direct".into(),
                    checksum: 42,
                    result: result(2e-6, 0.01),
                },
                NamedResult {
                    name: "sum_generic".into(),
                    checksum: 42,
                    result: result(1e-6, 0.05),
                },
            ],
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("Human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_human_output() {
        let output = format_human_output(&report());
        assert!(output.contains("✓ sum_direct"));
        assert!(output.contains("~ sum_generic"));
        assert!(output.contains("time: 2.00 µs"));
        assert!(output.contains("checksum: 42"));
        assert!(output.contains("sum_generic vs sum_direct: 2.00x"));
    }

    #[test]
    fn test_json_output() {
        let json = format_json_output(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data_len"], 2000);
        assert_eq!(value["results"][1]["name"], "sum_generic");
        assert_eq!(value["results"][0]["result"]["iters_per_sample"], 1000);
    }
}
