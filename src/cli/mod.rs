//! Command-line parsing for the Eurostat indicator dashboard.
//!
//! Argument parsing and command dispatch stay separate from ingestion and view
//! code; `app` turns these structs into a `DashConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{IndicatorKind, Region};
use crate::io::ExportFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eudash", version, about = "Eurostat indicator tables in the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Directory holding the `;`-delimited Eurostat exports.
    #[arg(long, global = true, env = "EUDASH_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Keep EU/euro-area aggregate rows instead of filtering them out.
    #[arg(long, global = true)]
    pub keep_aggregates: bool,

    /// Extra country labels to leave out of every view (repeatable).
    #[arg(long, global = true, value_name = "LABEL")]
    pub exclude: Vec<String>,

    /// Log filter, e.g. `debug` or `eu_indicators=trace`.
    #[arg(long, global = true, env = "EUDASH_LOG")]
    pub log_level: Option<String>,

    /// Plot width (columns).
    #[arg(long, global = true, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, global = true, default_value_t = 20)]
    pub height: usize,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the directory and print per-file diagnostics and skipped files.
    Summary,
    /// Rank countries by one indicator for a year.
    Map(MapArgs),
    /// Plot an indicator over time for selected countries.
    Trend(TrendArgs),
    /// Scatter two indicators against each other with a regression line.
    Corr(CorrArgs),
    /// Compare two countries on one indicator, or on every education indicator.
    Compare(CompareArgs),
    /// Write tidy rows to CSV or JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    Tui,
}

#[derive(Debug, Args, Clone)]
pub struct MapArgs {
    #[arg(short, long, value_enum)]
    pub indicator: IndicatorKind,

    /// Defaults to the latest year with data.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Only show the first N countries.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct TrendArgs {
    #[arg(short, long, value_enum)]
    pub indicator: IndicatorKind,

    /// Country label as it appears in the export (repeatable).
    #[arg(short, long = "country", required = true, value_name = "NAME")]
    pub countries: Vec<String>,

    /// Print the year table only.
    #[arg(long)]
    pub no_plot: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CorrArgs {
    /// Indicator on the x axis.
    #[arg(long, value_enum)]
    pub x: IndicatorKind,

    /// Indicator on the y axis.
    #[arg(long, value_enum)]
    pub y: IndicatorKind,

    /// Defaults to the latest year both indicators share.
    #[arg(long)]
    pub year: Option<i32>,

    /// Highlight countries in this region.
    #[arg(long, value_enum)]
    pub region: Option<Region>,

    /// Print the point table only.
    #[arg(long)]
    pub no_plot: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Omit to compare early childhood, tertiary and adult learning together.
    #[arg(short, long, value_enum)]
    pub indicator: Option<IndicatorKind>,

    /// Defaults to the latest year with data.
    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long, value_name = "NAME")]
    pub a: String,

    #[arg(long, value_name = "NAME")]
    pub b: String,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Output file. Must not live inside the data directory.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Export a single indicator instead of every loaded table.
    #[arg(short, long, value_enum)]
    pub indicator: Option<IndicatorKind>,

    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Apply the aggregate exclusions to exported rows.
    #[arg(long)]
    pub filtered: bool,
}
