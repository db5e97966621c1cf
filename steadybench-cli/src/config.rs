//! Configuration loading from steady.toml
//!
//! SteadyBench configuration can be specified in a `steady.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use steadybench_core::{BenchConfig, DEFAULT_ACCURACY};
use thiserror::Error;

/// Name of the configuration file looked up by [`SteadyConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "steady.toml";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid `steady.toml`
    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// TOML error with location
        #[source]
        source: toml::de::Error,
    },

    /// Blank duration string
    #[error("Empty duration string")]
    EmptyDuration,

    /// Number part of a duration did not parse
    #[error("Invalid duration number: {0}")]
    InvalidNumber(String),

    /// Unit suffix not one of ns, us, µs, ms, s, m, min
    #[error("Unknown duration unit: {0}")]
    UnknownUnit(String),

    /// Negative or non-finite duration
    #[error("Negative duration: {0}")]
    NegativeDuration(String),
}

/// SteadyBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SteadyConfig {
    /// Measurement budget
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Demo workload
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Target lower bound on measured time (e.g., "100ms")
    #[serde(default = "default_min_time")]
    pub min_time: String,
    /// Hard upper bound on measured time (e.g., "400ms")
    #[serde(default = "default_max_time")]
    pub max_time: String,
    /// Relative spread between best and third-best sample
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_time: default_min_time(),
            max_time: default_max_time(),
            accuracy: default_accuracy(),
        }
    }
}

fn default_min_time() -> String {
    "100ms".to_string()
}
fn default_max_time() -> String {
    "400ms".to_string()
}
fn default_accuracy() -> f64 {
    DEFAULT_ACCURACY
}

/// Demo workload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of random values to sum
    #[serde(default = "default_len")]
    pub len: usize,
    /// Constant added to every sum
    #[serde(default = "default_add")]
    pub add: usize,
    /// RNG seed for reproducible data (random if unset)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            len: default_len(),
            add: default_add(),
            seed: None,
        }
    }
}

fn default_len() -> usize {
    2000
}
fn default_add() -> usize {
    1337
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl SteadyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!("ignoring {}: {}", config_path.display(), e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Runner budget in seconds, ready for `AdaptiveRunner`
    pub fn bench_config(&self) -> Result<BenchConfig, ConfigError> {
        Ok(BenchConfig {
            min_time: Self::parse_duration(&self.runner.min_time)?,
            max_time: Self::parse_duration(&self.runner.max_time)?,
            accuracy: self.runner.accuracy,
        })
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SteadyBench Configuration

[runner]
# Measure for at least this long (calibration targets this budget)
min_time = "100ms"
# Never start a new sample past this much measured time
max_time = "400ms"
# Stop once the third-best sample is within this fraction of the best
# (clamped to 0.001..=0.1)
accuracy = 0.03

[workload]
# Number of random f32 values summed per call
len = 2000
# Constant added to each sum
add = 1337
# Fixed RNG seed for reproducible data (uncomment to enable)
# seed = 42

[output]
# Default output format: human, json
format = "human"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "100ms", "1.5s", "250us", "1e-3s") to seconds
    ///
    /// A bare number is taken as seconds.
    pub fn parse_duration(s: &str) -> Result<f64, ConfigError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::EmptyDuration);
        }

        // The number ends at the first character that can't continue it; an
        // `e` only belongs to the number when an exponent follows
        let bytes = s.as_bytes();
        let unit_start = s
            .char_indices()
            .find(|&(i, c)| match c {
                '0'..='9' | '.' | '+' | '-' => false,
                'e' | 'E' => !matches!(bytes.get(i + 1), Some(b'0'..=b'9' | b'+' | b'-')),
                _ => true,
            })
            .map_or(s.len(), |(i, _)| i);
        let (num_part, unit_part) = s.split_at(unit_start);
        let unit_part = unit_part.trim();

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(num_part.to_string()))?;
        if value < 0.0 || !value.is_finite() {
            return Err(ConfigError::NegativeDuration(s.to_string()));
        }

        let scale = match unit_part.to_lowercase().as_str() {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" | "" => 1.0,
            "m" | "min" => 60.0,
            _ => return Err(ConfigError::UnknownUnit(unit_part.to_string())),
        };

        Ok(value * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SteadyConfig::default();
        assert_eq!(config.runner.min_time, "100ms");
        assert_eq!(config.runner.max_time, "400ms");
        assert_eq!(config.workload.len, 2000);
        assert_eq!(config.workload.add, 1337);
        assert_eq!(config.workload.seed, None);
    }

    #[test]
    fn test_default_bench_config_matches_core() {
        let config = SteadyConfig::default().bench_config().unwrap();
        let core = BenchConfig::default();
        assert!((config.min_time - core.min_time).abs() < 1e-12);
        assert!((config.max_time - core.max_time).abs() < 1e-12);
        assert_eq!(config.accuracy, core.accuracy);
    }

    #[test]
    fn test_parse_duration() {
        let close = |s: &str, expected: f64| {
            let got = SteadyConfig::parse_duration(s).unwrap();
            assert!((got - expected).abs() < 1e-12, "{s}: {got} != {expected}");
        };
        close("3s", 3.0);
        close("500ms", 0.5);
        close("100us", 100e-6);
        close("10µs", 10e-6);
        close("1000ns", 1e-6);
        close("2m", 120.0);
        close("1.5s", 1.5);
        close("0.25", 0.25);
        close("1e-3s", 1e-3);
        close("2.5E2ms", 0.25);
        close("5e-1", 0.5);
        close("100 ms", 0.1);
    }

    #[test]
    fn test_parse_duration_errors() {
        assert!(matches!(
            SteadyConfig::parse_duration("  "),
            Err(ConfigError::EmptyDuration)
        ));
        assert!(matches!(
            SteadyConfig::parse_duration("abc"),
            Err(ConfigError::InvalidNumber(_))
        ));
        assert!(matches!(
            SteadyConfig::parse_duration("5h"),
            Err(ConfigError::UnknownUnit(_))
        ));
        assert!(matches!(
            SteadyConfig::parse_duration("1es"),
            Err(ConfigError::UnknownUnit(unit)) if unit == "es"
        ));
        assert!(matches!(
            SteadyConfig::parse_duration("-1s"),
            Err(ConfigError::NegativeDuration(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            min_time = "10ms"
            accuracy = 0.01

            [workload]
            seed = 7
        "#;

        let config: SteadyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.min_time, "10ms");
        assert_eq!(config.runner.accuracy, 0.01);
        assert_eq!(config.workload.seed, Some(7));
        // Defaults should still apply
        assert_eq!(config.runner.max_time, "400ms");
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = SteadyConfig::default_toml();
        let config: SteadyConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.runner.min_time, "100ms");
        assert_eq!(config.workload.seed, None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SteadyConfig::load("/nonexistent/steady.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/steady.toml"));
    }

    #[test]
    fn test_load_invalid_file() {
        let path = std::env::temp_dir().join(format!("steady-invalid-{}.toml", std::process::id()));
        std::fs::write(&path, "[runner]\naccuracy = \"high\"\n").unwrap();
        let err = SteadyConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
