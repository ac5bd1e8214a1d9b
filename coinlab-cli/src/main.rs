//! CoinLab CLI: compute the indicator catalogue and publish JSON series.
//!
//! Commands:
//! - `compute`: load a CSV sample file, run the engine, write one JSON
//!   document per output plus the price history
//! - `catalogue`: print the default engine configuration as TOML

mod input;
mod output;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coinlab_core::engine::{build_indicator, Engine, EngineConfig, IndicatorConfig};
use coinlab_core::TimeSeries;

#[derive(Parser)]
#[command(
    name = "coinlab",
    about = "CoinLab CLI: technical indicators for daily crypto prices"
)]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute indicators from a CSV sample file.
    Compute {
        /// CSV with a `timestamp` column (Unix ms) and price/volume/high/low/close.
        #[arg(long)]
        input: PathBuf,

        /// TOML engine config. Defaults to every catalogue indicator the
        /// input has the fields for.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for JSON documents.
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// File name prefix, usually the coin id.
        #[arg(long, default_value = "bitcoin")]
        prefix: String,
    },
    /// Print the default engine configuration.
    Catalogue,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Commands::Compute {
            input,
            config,
            output_dir,
            prefix,
        } => run_compute(&input, config.as_deref(), &output_dir, &prefix).map(|_| ()),
        Commands::Catalogue => {
            print!("{}", EngineConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run_compute(
    input_path: &Path,
    config_path: Option<&Path>,
    output_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>> {
    let series = input::load_samples(input_path)?;
    let config = match config_path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("load engine config {}", path.display()))?,
        None => available_catalogue(&series),
    };
    let engine = Engine::new(&config).context("build engine")?;

    let insane = series.samples().iter().filter(|s| !s.is_sane()).count();
    if insane > 0 {
        warn!(samples = insane, "samples with high < low or close outside the range");
    }
    info!(
        input = %input_path.display(),
        samples = series.len(),
        indicators = engine.indicators().len(),
        "computing indicators"
    );

    let values = engine.compute(&series).context("compute indicators")?;
    let written = output::write_all(output_dir, prefix, &series, &values, Utc::now())?;

    info!(
        files = written.len(),
        dir = %output_dir.display(),
        "wrote indicator documents"
    );
    Ok(written)
}

/// Catalogue entries whose required fields every sample carries.
///
/// A price-only market chart gets the price indicators; OHLC input gets the
/// full catalogue.
fn available_catalogue(series: &TimeSeries) -> EngineConfig {
    let mut kept: Vec<IndicatorConfig> = Vec::new();
    for config in IndicatorConfig::catalogue() {
        let indicator = build_indicator(&config);
        match series.require(indicator.name(), &indicator.required_fields()) {
            Ok(()) => kept.push(config),
            Err(e) => info!(indicator = indicator.name(), reason = %e, "skipping indicator"),
        }
    }
    EngineConfig::new(kept)
}
