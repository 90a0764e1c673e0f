//! Reporting utilities: load diagnostics and formatted terminal output.
//!
//! Formatting lives here so view models stay plain data and output changes
//! stay localized.

use crate::domain::{IndicatorKind, LoadReport, NormalizedTableSet};

mod format;

pub use format::*;

/// Summarise a directory load: one line per loaded file, then skipped files.
pub fn format_load_summary(tables: &NormalizedTableSet, report: &LoadReport) -> String {
    let mut out = String::new();

    out.push_str("=== eudash - Eurostat indicator tables ===\n");
    out.push_str(&format!(
        "Loaded: {} file(s) | Skipped: {} file(s) | Rows: {}\n\n",
        tables.len(),
        report.skipped.len(),
        tables.iter().map(|t| t.len()).sum::<usize>()
    ));

    if !report.loaded.is_empty() {
        out.push_str(
            format!(
                "{:<34} {:>6} {:>6} {:>9} {:<}\n",
                "file", "header", "rows", "countries", "indicator"
            )
            .trim_end(),
        );
        out.push('\n');
        out.push_str(format!("{:-<34} {:-<6} {:-<6} {:-<9} {:-<9}", "", "", "", "", "").trim_end());
        out.push('\n');

        for d in &report.loaded {
            let title = IndicatorKind::from_file_name(&d.file)
                .map(|k| k.title())
                .unwrap_or("(unrecognised)");
            out.push_str(
                format!(
                    "{:<34} {:>6} {:>6} {:>9} {}\n",
                    truncate(&d.file, 34),
                    d.header_line,
                    d.rows,
                    d.countries,
                    title
                )
                .trim_end(),
            );
            out.push('\n');
        }
    }

    let missing: Vec<IndicatorKind> = IndicatorKind::ALL
        .into_iter()
        .filter(|k| tables.get(k.file_name()).is_none())
        .collect();
    if !missing.is_empty() {
        out.push_str("\nNot loaded:\n");
        for k in missing {
            out.push_str(&format!("  {} ({})\n", k.file_name(), k.title()));
        }
    }

    if !report.skipped.is_empty() {
        out.push_str("\nSkipped:\n");
        for s in &report.skipped {
            out.push_str(&format!("  {} [{}] {}\n", s.file, s.reason.kind(), s.reason));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileDiagnostic, NormalizedRow, NormalizedTable, SkippedFile};
    use crate::error::LoadError;

    #[test]
    fn load_summary_lists_loaded_missing_and_skipped() {
        let table = NormalizedTable::new(
            "8_7_neet.csv",
            vec![NormalizedRow {
                country: "Malta".to_string(),
                year: 2021,
                value: 9.5,
            }],
        );
        let tables: NormalizedTableSet = [table].into_iter().collect();
        let report = LoadReport {
            loaded: vec![FileDiagnostic {
                file: "8_7_neet.csv".to_string(),
                header_line: 6,
                candidates: 2,
                rows: 1,
                countries: 1,
            }],
            skipped: vec![SkippedFile {
                file: "notes.csv".to_string(),
                reason: LoadError::HeaderNotFound,
            }],
        };

        let txt = format_load_summary(&tables, &report);
        assert!(txt.contains("Loaded: 1 file(s) | Skipped: 1 file(s) | Rows: 1"));
        assert!(txt.contains("8_7_neet.csv"));
        assert!(txt.contains("Young people neither in employment"));
        assert!(txt.contains("  8_6_real_gdp.csv (Real GDP per capita)"));
        assert!(txt.contains("notes.csv [header-not-found]"));
    }
}
