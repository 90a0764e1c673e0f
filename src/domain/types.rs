//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built once by the directory loader
//! - queried read-only by the dashboard views
//! - exported to CSV/JSON

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::ExclusionSet;
use crate::error::LoadError;

/// One tidy observation: a single country in a single year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// All observations parsed from one export file, in file order
/// (row-major over the original wide matrix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub source_file: String,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    pub fn new(source_file: impl Into<String>, rows: Vec<NormalizedRow>) -> Self {
        Self {
            source_file: source_file.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.rows.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    /// Distinct country labels, sorted.
    pub fn countries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn value(&self, country: &str, year: i32) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.year == year && r.country == country)
            .map(|r| r.value)
    }

    pub fn rows_for_year(&self, year: i32) -> impl Iterator<Item = &NormalizedRow> {
        self.rows.iter().filter(move |r| r.year == year)
    }

    /// `(year, value)` pairs for one country, sorted by year.
    pub fn series_for(&self, country: &str) -> Vec<(i32, f64)> {
        let mut out: Vec<(i32, f64)> = self
            .rows
            .iter()
            .filter(|r| r.country == country)
            .map(|r| (r.year, r.value))
            .collect();
        out.sort_by_key(|&(year, _)| year);
        out
    }

    /// Copy of this table without the excluded (aggregate) labels.
    pub fn without(&self, exclusions: &ExclusionSet) -> Self {
        Self {
            source_file: self.source_file.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| !exclusions.contains(&r.country))
                .cloned()
                .collect(),
        }
    }
}

/// Filename → normalized table. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTableSet {
    tables: BTreeMap<String, NormalizedTable>,
}

impl NormalizedTableSet {
    pub fn get(&self, file_name: &str) -> Option<&NormalizedTable> {
        self.tables.get(file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<NormalizedTable> for NormalizedTableSet {
    fn from_iter<I: IntoIterator<Item = NormalizedTable>>(iter: I) -> Self {
        Self {
            tables: iter
                .into_iter()
                .map(|t| (t.source_file.clone(), t))
                .collect(),
        }
    }
}

/// Per-file summary emitted after a successful ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub file: String,
    /// Zero-based line index of the located header (preamble length).
    pub header_line: usize,
    /// Melted cells before cleaning (wide rows × year columns).
    pub candidates: usize,
    /// Rows that survived cleaning.
    pub rows: usize,
    pub countries: usize,
}

/// A file the loader gave up on, and why.
#[derive(Debug)]
pub struct SkippedFile {
    pub file: String,
    pub reason: LoadError,
}

/// Side output of a directory load. Not part of the data contract.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<FileDiagnostic>,
    pub skipped: Vec<SkippedFile>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env` / environment defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub data_dir: PathBuf,
    pub exclusions: ExclusionSet,
    pub plot_width: usize,
    pub plot_height: usize,
}
