#![warn(missing_docs)]
//! SteadyBench CLI Library
//!
//! Command-line driver around the adaptive runner. It loads `steady.toml`,
//! layers command-line flags on top, builds the demo workload and prints the
//! measurements.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     steadybench_cli::run()
//! }
//! ```

mod config;
mod formatting;
mod workload;

pub use config::*;
pub use formatting::{
    NamedResult, OutputFormat, RunReport, format_human_output, format_json_output,
};
pub use workload::{
    MAX_VALUE, Workload, random_data, sum_direct, sum_rounded, sum_with, workloads,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use steadybench_core::{AdaptiveRunner, BenchConfig};
use tracing_subscriber::EnvFilter;

/// SteadyBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "steadybench")]
#[command(author, version, about = "SteadyBench - adaptive micro-benchmark harness")]
pub struct Cli {
    /// Optional subcommand (Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (default: discover steady.toml upwards from cwd)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target lower bound on measured time (e.g. "100ms")
    #[arg(long)]
    pub min_time: Option<String>,

    /// Hard upper bound on measured time (e.g. "400ms")
    #[arg(long)]
    pub max_time: Option<String>,

    /// Target spread between best and third-best sample (0.001 - 0.1)
    #[arg(long)]
    pub accuracy: Option<f64>,

    /// Number of random values in the demo data
    #[arg(long)]
    pub len: Option<usize>,

    /// Constant added to each sum
    #[arg(long)]
    pub add: Option<usize>,

    /// RNG seed for reproducible demo data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Benchmark the demo workloads (default)
    Run,
    /// Print a default steady.toml (or write it with --output)
    Init,
}

/// Run the SteadyBench CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the SteadyBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG wins over the verbosity flag. A subscriber
    // installed earlier in the process (by an embedder or a previous call) stays.
    let default_filter = if cli.verbose {
        "steadybench=debug"
    } else {
        "steadybench=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Some(Commands::Init) => write_output(&cli, &SteadyConfig::default_toml()),
        Some(Commands::Run) | None => {
            let config = load_config(&cli)?;
            run_benchmarks(&cli, &config)
        }
    }
}

/// Explicit `--config` must load; otherwise discovery falls back to defaults.
fn load_config(cli: &Cli) -> anyhow::Result<SteadyConfig> {
    match &cli.config {
        Some(path) => Ok(SteadyConfig::load(path)?),
        None => Ok(SteadyConfig::discover().unwrap_or_default()),
    }
}

/// Build the runner budget by layering: steady.toml → CLI overrides.
pub fn build_bench_config(cli: &Cli, config: &SteadyConfig) -> anyhow::Result<BenchConfig> {
    let mut bench = config
        .bench_config()
        .context("invalid [runner] section")?;

    if let Some(min_time) = &cli.min_time {
        bench.min_time = SteadyConfig::parse_duration(min_time).context("invalid --min-time")?;
    }
    if let Some(max_time) = &cli.max_time {
        bench.max_time = SteadyConfig::parse_duration(max_time).context("invalid --max-time")?;
    }
    if let Some(accuracy) = cli.accuracy {
        bench.accuracy = accuracy;
    }

    let clamped = bench.clamped();
    if clamped != bench {
        tracing::warn!(
            "runner settings adjusted into range: min_time={} max_time={} accuracy={}",
            clamped.min_time,
            clamped.max_time,
            clamped.accuracy
        );
    }
    Ok(clamped)
}

fn run_benchmarks(cli: &Cli, config: &SteadyConfig) -> anyhow::Result<()> {
    let bench_config = build_bench_config(cli, config)?;
    let format_name = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_name.parse().map_err(anyhow::Error::msg)?;

    let len = cli.len.unwrap_or(config.workload.len);
    let add = cli.add.unwrap_or(config.workload.add);
    let seed = cli.seed.or(config.workload.seed);

    tracing::info!("generating {} values (seed: {:?})", len, seed);
    let data = random_data(len, seed);

    let runner = AdaptiveRunner::new(bench_config);
    let mut results = Vec::new();
    for workload in workloads(&data, add) {
        let checksum = (workload.run)();
        tracing::info!("measuring {}", workload.name);
        let result = runner.run(|| (workload.run)());
        results.push(NamedResult {
            name: workload.name.to_string(),
            checksum,
            result,
        });
    }

    let report = RunReport {
        config: bench_config,
        data_len: len,
        results,
    };

    let rendered = match format {
        OutputFormat::Human => format_human_output(&report),
        OutputFormat::Json => format_json_output(&report)?,
    };
    write_output(cli, &rendered)
}

fn write_output(cli: &Cli, content: &str) -> anyhow::Result<()> {
    match &cli.output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
