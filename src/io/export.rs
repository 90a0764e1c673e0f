//! Export normalized tables as tidy CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one line per `(source_file, country, year, value)` observation.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::NormalizedTable;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Serialize)]
struct TidyRecord<'a> {
    source_file: &'a str,
    country: &'a str,
    year: i32,
    value: f64,
}

/// Write the given tables to `path` in the requested format.
pub fn write_tables(
    path: &Path,
    tables: &[&NormalizedTable],
    format: ExportFormat,
) -> Result<usize, AppError> {
    match format {
        ExportFormat::Csv => write_tidy_csv(path, tables),
        ExportFormat::Json => write_tidy_json(path, tables),
    }
}

/// Write tidy rows as comma-delimited CSV with a header line.
pub fn write_tidy_csv(path: &Path, tables: &[&NormalizedTable]) -> Result<usize, AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut n = 0usize;
    for record in records(tables) {
        writer
            .serialize(record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        n += 1;
    }

    // An empty export still gets a header so downstream readers see the schema.
    if n == 0 {
        writer
            .write_record(["source_file", "country", "year", "value"])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(n)
}

/// Write tidy rows as a pretty-printed JSON array.
pub fn write_tidy_json(path: &Path, tables: &[&NormalizedTable]) -> Result<usize, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let rows: Vec<TidyRecord<'_>> = records(tables).collect();
    serde_json::to_writer_pretty(file, &rows)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(rows.len())
}

/// Reject export destinations inside the source directory.
///
/// A tidy `.csv` written there would be picked up (and skipped) by the next load.
pub fn ensure_outside_source(out: &Path, data_dir: &Path) -> Result<(), AppError> {
    let parent = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()
            .map_err(|e| AppError::new(2, format!("Failed to resolve working directory: {e}")))?,
    };
    let (Ok(parent), Ok(data_dir)) = (parent.canonicalize(), data_dir.canonicalize()) else {
        // Missing parent is reported by the writer; a missing data dir cannot collide.
        return Ok(());
    };
    if parent.starts_with(&data_dir) {
        return Err(AppError::new(
            2,
            format!(
                "Refusing to export into the data directory '{}'; choose another --out path.",
                data_dir.display()
            ),
        ));
    }
    Ok(())
}

fn records<'a>(tables: &'a [&'a NormalizedTable]) -> impl Iterator<Item = TidyRecord<'a>> + 'a {
    tables.iter().flat_map(|t| {
        t.rows.iter().map(move |r| TidyRecord {
            source_file: &t.source_file,
            country: &r.country,
            year: r.year,
            value: r.value,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizedRow;

    fn table() -> NormalizedTable {
        NormalizedTable::new(
            "8_6_real_gdp.csv",
            vec![
                NormalizedRow {
                    country: "Finland".to_string(),
                    year: 2019,
                    value: 36_000.0,
                },
                NormalizedRow {
                    country: "Bosnia and Herzegovina".to_string(),
                    year: 2019,
                    value: 5_100.5,
                },
            ],
        )
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let t = table();
        let n = write_tidy_csv(&path, &[&t]).unwrap();
        assert_eq!(n, 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "source_file,country,year,value");
        assert_eq!(lines[1], "8_6_real_gdp.csv,Finland,2019,36000.0");
    }

    #[test]
    fn empty_csv_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let n = write_tidy_csv(&path, &[]).unwrap();
        assert_eq!(n, 0);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "source_file,country,year,value");
    }

    #[test]
    fn export_into_data_dir_is_rejected() {
        let data = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();

        let err = ensure_outside_source(&data.path().join("tidy.csv"), data.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(ensure_outside_source(&elsewhere.path().join("tidy.csv"), data.path()).is_ok());
    }

    #[test]
    fn json_is_an_array_of_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let t = table();
        write_tables(&path, &[&t], ExportFormat::Json).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[1]["country"], "Bosnia and Herzegovina");
        assert_eq!(arr[1]["year"], 2019);
    }
}
