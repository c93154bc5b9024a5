// Vicinity Report - Batch analysis CLI
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Vicinity Report
//!
//! Batch analysis CLI for Vicinity RSSI captures.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze the default capture file
//! vicinity-report
//!
//! # Explicit paths
//! vicinity-report --input rssi_data.csv --calibration nodes.json
//! ```

mod input;
mod render;

use clap::Parser;
use input::ReportError;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use vicinity::{AnalysisConfig, AnalysisPipeline, Calibration};

/// Vicinity batch analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Observation capture file to analyze
    #[arg(short, long, default_value = "rssi_data.csv")]
    input: PathBuf,

    /// Calibration file (falls back to defaults when missing)
    #[arg(short, long, default_value = "nodes.json")]
    calibration: PathBuf,

    /// Output path for the per-device summary table
    #[arg(long, default_value = "wifi_devices_table.csv")]
    devices_out: PathBuf,

    /// Output path for the per-device distance summary
    #[arg(long, default_value = "distance_summary.csv")]
    summary_out: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: &Args) -> Result<(), ReportError> {
    info!("Vicinity Report v{}", env!("CARGO_PKG_VERSION"));

    let records = input::load_records(&args.input)?;
    info!("loaded {} raw records from {}", records.len(), args.input.display());

    let calibration = Calibration::load_or_default(&args.calibration);
    info!(
        "calibration: P0={} dBm, n={}",
        calibration.reference_power, calibration.path_loss_exponent
    );

    let pipeline = AnalysisPipeline::new(AnalysisConfig::default(), calibration);
    let report = pipeline.run(&records);

    info!(
        "{} devices, {} records retained, {} dropped",
        report.summaries.len(),
        report.clean_stats.retained,
        report.clean_stats.dropped()
    );

    render::write_device_table(&args.devices_out, &report.summaries)?;
    info!("wrote device table: {}", args.devices_out.display());

    render::write_distance_summary(&args.summary_out, &report.distance_stats)?;
    info!("wrote distance summary: {}", args.summary_out.display());

    if report.is_empty() {
        info!("no devices after cleaning; outputs contain headers only");
    }

    Ok(())
}
