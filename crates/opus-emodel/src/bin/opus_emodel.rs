//! Command-line lookup of Opus E-model coefficients
//!
//! Arguments are passed through the library's untyped validation layer, so
//! the tool reports exactly the errors a host application would see.
//!
//! ```text
//! opus-emodel metrics swb vbr --loss random
//! opus-emodel bitrate wb cbr 13
//! opus-emodel --format text configs
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use opus_emodel::{validation, EModelError, QualityMetric};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "opus-emodel", version, about = "Look up E-model Ie/Bpl coefficients for Opus")]
struct Cli {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[arg(short, long, env = "OPUS_EMODEL_LOG", default_value = "warn")]
    log_level: String,

    /// Output format
    #[arg(short, long, env = "OPUS_EMODEL_FORMAT", value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Metrics for every supported bitrate
    Metrics {
        /// Bandwidth class (swb, wb, nb)
        bandwidth: String,
        /// Bitrate control mode (vbr, cbr)
        mode: String,
        /// Packet loss pattern (random, bursty); omit for Ie only
        #[arg(long)]
        loss: Option<String>,
    },
    /// Metric for a single bitrate in kbps
    Bitrate {
        /// Bandwidth class (swb, wb, nb)
        bandwidth: String,
        /// Bitrate control mode (vbr, cbr)
        mode: String,
        /// Bitrate in kbps
        bitrate: String,
        /// Packet loss pattern (random, bursty); omit for Ie only
        #[arg(long)]
        loss: Option<String>,
    },
    /// Supported bitrates for a bandwidth and mode
    Bitrates {
        /// Bandwidth class (swb, wb, nb)
        bandwidth: String,
        /// Bitrate control mode (vbr, cbr)
        mode: String,
    },
    /// Every available bandwidth/mode pair
    Configs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Text,
}

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_metric(metric: &QualityMetric) {
    println!(
        "{:>3} kbps  Ie={:<12} Bpl={}",
        metric.bitrate, metric.impairment, metric.loss_factor
    );
}

fn run(cli: &Cli) -> Result<()> {
    debug!("Running {:?}", cli.command);

    match &cli.command {
        Command::Metrics {
            bandwidth,
            mode,
            loss,
        } => {
            let loss = loss.as_deref().map(text);
            let metrics =
                validation::list_metrics(Some(&text(bandwidth)), Some(&text(mode)), loss.as_ref())?;
            match cli.format {
                Format::Json => emit(&metrics)?,
                Format::Text => metrics.iter().for_each(print_metric),
            }
        }
        Command::Bitrate {
            bandwidth,
            mode,
            bitrate,
            loss,
        } => {
            let loss = loss.as_deref().map(text);
            let metric = validation::metric_at_bitrate(
                Some(&text(bandwidth)),
                Some(&text(mode)),
                &text(bitrate),
                loss.as_ref(),
            )?;
            match (cli.format, metric) {
                (Format::Json, metric) => emit(&metric)?,
                (Format::Text, Some(metric)) => print_metric(&metric),
                (Format::Text, None) => println!("not found"),
            }
        }
        Command::Bitrates { bandwidth, mode } => {
            let bitrates = validation::supported_bitrates(Some(&text(bandwidth)), Some(&text(mode)))?;
            match cli.format {
                Format::Json => emit(&bitrates)?,
                Format::Text => {
                    let list: Vec<String> = bitrates.iter().map(u32::to_string).collect();
                    println!("{}", list.join(", "));
                }
            }
        }
        Command::Configs => {
            let configs = validation::available_configurations();
            match cli.format {
                Format::Json => emit(&configs)?,
                Format::Text => {
                    for config in &configs {
                        let list: Vec<String> =
                            config.bitrates.iter().map(u32::to_string).collect();
                        println!("{}/{}: {}", config.bandwidth, config.mode, list.join(", "));
                    }
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<EModelError>() {
            Some(e) => {
                eprintln!("error[{}]: {}", e.code(), e);
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}
