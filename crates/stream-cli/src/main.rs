//! # rustful-stream
//!
//! Command-line runner for the streaming anomaly detector.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stream::{
    BaselinePolicy, DefaultMonitor, SeasonalSource, StreamConfig, StreamSource, TickResult,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rustful-stream")]
#[command(about = "Real-time anomaly detection on a synthetic stream", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick the detector at a fixed cadence and print each result
    Run {
        /// Number of ticks (runs until interrupted when omitted)
        #[arg(short = 'n', long)]
        ticks: Option<u64>,

        /// Delay between ticks in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Seed for a reproducible stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Anomaly log file
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sliding window size
        #[arg(short, long)]
        window_size: Option<usize>,

        /// Z-score threshold
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Score each value against the window without itself
        #[arg(long)]
        exclude_candidate: bool,

        /// Print one JSON object per tick
        #[arg(long)]
        json: bool,
    },

    /// Print raw values from the stream source
    Generate {
        /// Number of values
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Seed for a reproducible stream
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

struct RunOptions {
    ticks: Option<u64>,
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<StreamConfig> {
    match path {
        Some(path) => StreamConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {:?}", path)),
        None => Ok(StreamConfig::default()),
    }
}

fn print_tick(result: &TickResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else if result.is_anomaly {
        println!(
            "{}  value={:.4}  z={:.2}  severity={:?}",
            result.alert_message,
            result.value,
            result.score.unwrap_or_default(),
            result.severity.unwrap_or(stream::AlertSeverity::Warning)
        );
    } else {
        println!("  step {:>6}: {:>9.4}", result.sequence, result.value);
    }
    Ok(())
}

/// Run the tick loop
fn run_stream(config: StreamConfig, options: RunOptions) -> Result<()> {
    let interval = Duration::from_millis(config.tick_interval_ms);
    let log_path = config.log_path.clone();

    let mut monitor = DefaultMonitor::from_config(config).context("failed to start stream")?;
    tracing::info!(
        window_size = monitor.config().window_size,
        threshold = monitor.config().threshold,
        log = %log_path.display(),
        "stream started"
    );

    while options.ticks.map_or(true, |n| monitor.sequence() < n) {
        let result = monitor
            .tick()
            .with_context(|| format!("tick {} failed", monitor.sequence()))?;
        print_tick(&result, options.json)?;

        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    if !options.json {
        println!("\nTicks: {}", monitor.sequence());
        println!("Anomalies: {}", monitor.anomalies().len());
        println!("Log: {:?}", log_path);
    }
    Ok(())
}

/// Print raw source values
fn run_generate(count: usize, seed: Option<u64>) -> Result<()> {
    let config = StreamConfig::default();
    let mut source = match seed {
        Some(seed) => SeasonalSource::seeded(&config.source, seed)?,
        None => SeasonalSource::from_entropy(&config.source)?,
    };
    for _ in 0..count {
        println!("{}", source.next_value());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rustful_stream=info,stream_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ticks,
            interval_ms,
            seed,
            log,
            config,
            window_size,
            threshold,
            exclude_candidate,
            json,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(interval) = interval_ms {
                config.tick_interval_ms = interval;
            }
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            if let Some(log) = log {
                config.log_path = log;
            }
            if let Some(size) = window_size {
                config.window_size = size;
            }
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if exclude_candidate {
                config.baseline = BaselinePolicy::ExcludeCandidate;
            }
            run_stream(config, RunOptions { ticks, json })
        }
        Commands::Generate { count, seed } => run_generate(count, seed),
    }
}
