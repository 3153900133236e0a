//! PMP report command line tool
//!
//! Reads the ticket sheet, filters it to a reporting window and prints the
//! report.
//!
//! # Usage
//!
//! ```bash
//! # This week's report from a local export
//! cargo run --bin pmp-report -- --source data/tickets.csv
//!
//! # Last month's figures as JSON, with the filtered rows saved to CSV
//! cargo run --bin pmp-report -- --view "This Month" --format json \
//!   --export pmp_filtered_report.csv
//!
//! # Reproduce a past report
//! cargo run --bin pmp-report -- --view "Last Week" --today 2024-06-12
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pmp_tickets::config::ReportConfig;
use pmp_tickets::services::{render_text, write_records_csv, ReportPipeline};
use pmp_tickets::time::{Clock, FixedClock, SystemClock, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "pmp-report")]
#[command(about = "Ticket report for a reporting window")]
struct Args {
    /// Configuration file (default: pmp_report.toml in the usual locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV file path or http(s) URL; overrides the configured source
    #[arg(long)]
    source: Option<String>,

    /// This Week, Last Week, This Month or This Year
    #[arg(long)]
    view: Option<View>,

    /// Reference date (YYYY-MM-DD) instead of the system date
    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the filtered tickets to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ReportConfig::from_default_location().unwrap_or_else(|e| {
            info!("{}; using defaults", e);
            ReportConfig::default()
        }),
    };

    if let Some(source) = &args.source {
        config.override_source(source);
    }

    Ok(config)
}

fn run<C: Clock>(args: &Args, config: &ReportConfig, clock: C) -> Result<()> {
    let view = match args.view {
        Some(view) => view,
        None => config.default_view()?,
    };

    let mut pipeline =
        ReportPipeline::from_config(config, clock).context("Failed to set up the ticket source")?;
    let result = pipeline.run(view).context("Failed to build the report")?;

    for error in &result.validation.errors {
        tracing::error!("{}", error);
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let written = write_records_csv(BufWriter::new(file), &result.records)?;
        info!("Exported {} tickets to {}", written, path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    match args.today {
        Some(today) => run(&args, &config, FixedClock::at_date(today)),
        None => run(&args, &config, SystemClock),
    }
}
