//! Shared load pipeline used by both CLI and TUI front-ends.
//!
//! directory scan -> per-file ingest -> table set -> dashboard (exclusions)
//!
//! The CLI and the TUI then only deal with presentation.

use tracing::warn;

use crate::domain::{DashConfig, IndicatorKind, LoadReport, NormalizedTableSet};
use crate::error::AppError;
use crate::io::load_directory;
use crate::views::Dashboard;

/// Everything a front-end needs after startup.
#[derive(Debug)]
pub struct LoadedData {
    /// Unfiltered tables, keyed by source filename.
    pub tables: NormalizedTableSet,
    pub report: LoadReport,
    pub dashboard: Dashboard,
}

/// Load the configured directory and build the dashboard.
pub fn load(config: &DashConfig) -> Result<LoadedData, AppError> {
    let (tables, report) = load_directory(&config.data_dir)?;
    if tables.is_empty() {
        warn!(dir = %config.data_dir.display(), "no export could be loaded");
    }
    let dashboard = Dashboard::new(&tables, &config.exclusions);
    Ok(LoadedData {
        tables,
        report,
        dashboard,
    })
}

/// Use `requested` if given, else the latest year in `candidates`.
pub fn resolve_year(requested: Option<i32>, candidates: &[i32]) -> Result<i32, AppError> {
    match requested {
        Some(year) => Ok(year),
        None => candidates
            .last()
            .copied()
            .ok_or_else(|| AppError::new(3, "No year with data for the selected indicator(s).")),
    }
}

/// Latest year shared by every listed indicator.
pub fn default_year(dashboard: &Dashboard, kinds: &[IndicatorKind]) -> Option<i32> {
    dashboard.common_years(kinds).last().copied()
}
