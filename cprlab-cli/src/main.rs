//! CPR Lab CLI — level ladder and recorded-reversal signal replay.
//!
//! Commands:
//! - `levels` — print the price-sorted CPR level ladder for two sessions
//! - `signal` — replay a recorded reversal through the signal pipeline and
//!   print the final signal as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cprlab_core::data::load_candles;
use cprlab_core::domain::sort_by_price;
use cprlab_core::levels::calculate_levels;
use cprlab_core::{RecordedDetector, SignalConfig, SignalEngine};

#[derive(Parser)]
#[command(
    name = "cprlab",
    about = "CPR Lab CLI — central pivot range levels and reversal signals"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the price-sorted level ladder.
    Levels {
        /// Previous session candles (.json or .csv).
        #[arg(long)]
        previous: PathBuf,

        /// Current session intraday candles (.json or .csv).
        #[arg(long)]
        current: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Replay a recorded preliminary signal and print the final signal.
    Signal {
        /// Previous session candles (.json or .csv).
        #[arg(long)]
        previous: PathBuf,

        /// Current session intraday candles (.json or .csv).
        #[arg(long)]
        current: PathBuf,

        /// Recorded detector output (JSON).
        #[arg(long)]
        reversal: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum target distance in percent of entry (overrides config).
        #[arg(long)]
        min_points_percent: Option<f64>,

        /// Minimum stop-loss distance in percent of entry (overrides config).
        #[arg(long)]
        min_stop_loss_percent: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Levels {
            previous,
            current,
            config,
        } => run_levels(&previous, &current, config.as_deref()),
        Commands::Signal {
            previous,
            current,
            reversal,
            config,
            min_points_percent,
            min_stop_loss_percent,
        } => run_signal(
            &previous,
            &current,
            &reversal,
            config.as_deref(),
            min_points_percent,
            min_stop_loss_percent,
        ),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SignalConfig> {
    match path {
        Some(path) => SignalConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SignalConfig::default()),
    }
}

fn run_levels(previous: &Path, current: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let previous = load_candles(previous).context("loading previous session")?;
    let current = load_candles(current).context("loading current session")?;

    let mut levels = calculate_levels(&previous, &current, config.initial_balance_candles)?;
    sort_by_price(&mut levels);

    println!("{:>12}  KIND", "PRICE");
    for level in levels.iter().rev() {
        println!("{:>12.2}  {}", level.price, level.kind);
    }
    Ok(())
}

fn run_signal(
    previous: &Path,
    current: &Path,
    reversal: &Path,
    config: Option<&Path>,
    min_points_percent: Option<f64>,
    min_stop_loss_percent: Option<f64>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(p) = min_points_percent {
        config.min_points_percent = p;
    }
    if let Some(p) = min_stop_loss_percent {
        config.min_points_stop_loss_percent = p;
    }

    let previous = load_candles(previous).context("loading previous session")?;
    let current = load_candles(current).context("loading current session")?;
    let recorded = std::fs::read_to_string(reversal)
        .with_context(|| format!("reading recorded reversal {}", reversal.display()))?;
    let detector = RecordedDetector::from_json(&recorded)?;

    let engine = SignalEngine::new(config, detector)?;
    let signal = engine.compute(&previous, &current)?;
    log::info!("{}: {}", signal.signal, signal.message);

    println!("{}", serde_json::to_string_pretty(&signal)?);
    Ok(())
}
