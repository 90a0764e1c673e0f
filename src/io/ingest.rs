//! Per-file ingest and normalization.
//!
//! This module is responsible for turning one heterogeneous Eurostat export
//! into a tidy `(country, year, value)` table:
//!
//! read → locate header → parse wide table → melt year columns → clean values
//!
//! Design goals:
//! - **Structural header detection** (preamble length is never assumed)
//! - **Cell-level tolerance** (unparseable cells become missing, rows dropped)
//! - **No shared state** (each call is independent so files can run in parallel)

use std::fs;
use std::path::Path;

use crate::domain::{FileDiagnostic, NormalizedRow, NormalizedTable};
use crate::error::LoadError;
use crate::io::clean::clean_value;
use crate::io::header::locate_header;
use crate::io::reshape::{melt, year_columns};
use crate::io::table::parse_wide_table;

/// Ingest output: the tidy table plus what happened on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedFile {
    pub table: NormalizedTable,
    pub header_line: usize,
    pub year_columns: usize,
    /// Melted cells before cleaning (wide rows × year columns).
    pub candidates: usize,
}

impl IngestedFile {
    pub fn diagnostic(&self) -> FileDiagnostic {
        FileDiagnostic {
            file: self.table.source_file.clone(),
            header_line: self.header_line,
            candidates: self.candidates,
            rows: self.table.len(),
            countries: self.table.countries().len(),
        }
    }
}

/// Read and normalize one export file. The table is keyed by the file name.
pub fn load_export_file(path: &Path) -> Result<IngestedFile, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
        path: path.to_path_buf(),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    normalize_export(&file_name, &text)
}

/// Normalize the full text content of one export.
pub fn normalize_export(file_name: &str, text: &str) -> Result<IngestedFile, LoadError> {
    let lines: Vec<&str> = text.lines().collect();
    let header_line = locate_header(&lines)?;

    let body = lines[header_line..].join("\n");
    let wide = parse_wide_table(&body)?;

    let years = year_columns(&wide.columns);
    if years.is_empty() {
        return Err(LoadError::NoYearColumns { header_line });
    }

    let long = melt(&wide, &years);
    let candidates = long.len();

    let rows: Vec<NormalizedRow> = long
        .into_iter()
        .filter_map(|cell| {
            let value = cell.raw.and_then(clean_value)?;
            Some(NormalizedRow {
                country: cell.country.to_string(),
                year: cell.year,
                value,
            })
        })
        .collect();

    Ok(IngestedFile {
        table: NormalizedTable::new(file_name, rows),
        header_line,
        year_columns: years.len(),
        candidates,
    })
}
