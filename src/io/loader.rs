//! Directory loader.
//!
//! Scans one directory for `*.csv` exports, ingests each file independently
//! (in parallel) and merges the results into a `NormalizedTableSet`.
//!
//! A bad file is logged and recorded in the `LoadReport`; it never aborts the
//! load. The only fatal condition is a directory that cannot be listed.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::{LoadReport, NormalizedTableSet, SkippedFile};
use crate::error::AppError;
use crate::io::ingest::load_export_file;

/// Load every export in `dir`.
pub fn load_directory(dir: &Path) -> Result<(NormalizedTableSet, LoadReport), AppError> {
    let files = discover_export_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), "loading exports");

    // Workers share nothing; each returns its own result and the merge below is
    // the only place the table set is assembled.
    let results: Vec<_> = files
        .par_iter()
        .map(|path| (file_key(path), load_export_file(path)))
        .collect();

    let mut report = LoadReport::default();
    let mut tables = Vec::with_capacity(results.len());

    for (file, result) in results {
        match result {
            Ok(ingested) => {
                let diag = ingested.diagnostic();
                info!(
                    file = %diag.file,
                    rows = diag.rows,
                    countries = diag.countries,
                    header_line = diag.header_line,
                    "processed export"
                );
                report.loaded.push(diag);
                tables.push(ingested.table);
            }
            Err(reason) => {
                warn!(file = %file, kind = reason.kind(), "skipping export: {reason}");
                report.skipped.push(SkippedFile { file, reason });
            }
        }
    }

    Ok((tables.into_iter().collect(), report))
}

/// `*.csv` regular files directly inside `dir` (not recursive), sorted by name.
pub fn discover_export_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::new(
            2,
            format!("Data directory not found: {}", dir.display()),
        ));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to read data directory '{}': {e}", dir.display()),
        )
    })?;

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        if is_file && has_csv_extension(&path) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        == Some(true)
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn bad_file_is_skipped_and_good_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.csv", "meta\nTIME;2019;2020\nFinland;5,3;:\n");
        write(dir.path(), "bad.csv", "no header here\n1;2;3\n");

        let (tables, report) = load_directory(dir.path()).unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables.file_names().collect::<Vec<_>>(), vec!["good.csv"]);
        let good = tables.get("good.csv").unwrap();
        assert_eq!(good.len(), 1);
        assert_eq!(good.rows[0].value, 5.3);
        assert!(tables.get("bad.csv").is_none());

        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file, "bad.csv");
        assert!(matches!(report.skipped[0].reason, LoadError::HeaderNotFound));
    }

    #[test]
    fn every_failure_kind_is_local_to_its_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "TIME;2020\nSweden;1\n");
        write(dir.path(), "no_years.csv", "GEO (Labels);unit\nSweden;PC\n");
        fs::write(dir.path().join("latin1.csv"), b"TIME;2020\nK\xf6ln;1\n").unwrap();

        let (tables, report) = load_directory(dir.path()).unwrap();
        assert_eq!(tables.len(), 1);
        let mut kinds: Vec<_> = report.skipped.iter().map(|s| s.reason.kind()).collect();
        kinds.sort();
        assert_eq!(kinds, vec!["encoding", "no-year-columns"]);
    }

    #[test]
    fn only_csv_files_at_top_level_are_considered() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "one.CSV", "TIME;2020\nSweden;1\n");
        write(dir.path(), "notes.txt", "TIME;2020\nSweden;1\n");
        fs::create_dir(dir.path().join("nested.csv")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        write(&dir.path().join("sub"), "deep.csv", "TIME;2020\nSweden;1\n");

        let files = discover_export_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("one.CSV"));
    }

    #[test]
    fn loading_twice_yields_equal_sets() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "x.csv", "TIME;2019;2020\nFinland;1;2\nSweden;3;4\n");
        write(dir.path(), "y.csv", "GEO (Labels);2021\nMalta;1 234,5\n");

        let (first, _) = load_directory(dir.path()).unwrap();
        let (second, _) = load_directory(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.get("y.csv").unwrap().rows[0].value, 1234.5);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_directory(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let (tables, report) = load_directory(dir.path()).unwrap();
        assert!(tables.is_empty());
        assert!(report.loaded.is_empty() && report.skipped.is_empty());
    }
}
