//! Command-line parsing for the EPS forecast dashboard.
//!
//! Argument parsing stays separate from the data and chart code; `app`
//! dispatches the parsed command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_DATA_PATH, DEFAULT_TITLE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "epsdash", version, about = "Analyst EPS forecast dashboard")]
pub struct Cli {
    /// Show debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Silence all logging.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(TuiArgs),
    /// Print the dashboard as plain text (ASCII charts and tables).
    Report(ReportArgs),
    /// Write the chart data as JSON and the charts as SVG.
    Export(ExportArgs),
}

/// Input selection shared by every command.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Cleaned forecast CSV.
    #[arg(short = 'd', long = "data", env = "EPSDASH_DATA", default_value = DEFAULT_DATA_PATH, value_name = "CSV")]
    pub data: PathBuf,

    /// Forecast period to show (defaults to the first value in the data).
    #[arg(short = 'f', long)]
    pub fpi: Option<String>,

    /// Dashboard title.
    #[arg(short = 't', long, default_value = DEFAULT_TITLE)]
    pub title: String,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Write log records to this file (logging is off in the TUI otherwise).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output directory (created if missing).
    #[arg(short, long, value_name = "DIR")]
    pub out: PathBuf,

    /// Skip the SVG charts.
    #[arg(long)]
    pub json_only: bool,
}
