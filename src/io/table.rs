//! Delimited-text parsing into a wide (one column per year) table.
//!
//! The parser only knows about structure: which column holds the country label
//! and which cells are statistical sentinels. Numeric cleaning happens later,
//! after the reshape, so flag columns never have to be interpreted here.

use csv::StringRecord;

use crate::error::LoadError;
use crate::io::header::FIELD_DELIMITER;

/// Canonical name of the label column after renaming.
pub const COUNTRY_COLUMN: &str = "country";

/// Flag codes Eurostat writes in place of a suppressed or unreliable value.
pub const SENTINELS: [&str; 4] = [":", "b", "bu", "u"];

/// One label row of the wide matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub country: String,
    /// One cell per entry of `WideTable::columns`; `None` = blank or sentinel.
    pub cells: Vec<Option<String>>,
}

/// Parsed export before reshaping.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    /// Original name of the column renamed to `country`.
    pub label_header: String,
    /// Headers of every non-label column, trimmed, in file order.
    pub columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// Parse text starting at the header line.
pub fn parse_wide_table(text: &str) -> Result<WideTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header_name)
        .collect();

    let label_idx = label_column(&headers);
    let label_header = headers.get(label_idx).cloned().unwrap_or_default();
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != label_idx)
        .map(|(_, name)| name.clone())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let country = record.get(label_idx).unwrap_or("").to_string();
        if country.is_empty() {
            continue;
        }

        let cells = (0..headers.len().max(record.len()))
            .filter(|&idx| idx != label_idx)
            .take(columns.len())
            .map(|idx| record.get(idx).and_then(cell_value))
            .collect::<Vec<_>>();

        rows.push(WideRow {
            country,
            cells: pad_cells(cells, columns.len()),
        });
    }

    Ok(WideTable {
        label_header,
        columns,
        rows,
    })
}

/// Index of the column that becomes `country`.
///
/// Preference: a header mentioning `GEO`, then a header that is exactly `TIME`,
/// then the first column.
fn label_column(headers: &[String]) -> usize {
    headers
        .iter()
        .position(|h| h.contains("GEO"))
        .or_else(|| headers.iter().position(|h| h == "TIME"))
        .unwrap_or(0)
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn cell_value(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || is_sentinel(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Exact, case-sensitive sentinel match.
pub fn is_sentinel(cell: &str) -> bool {
    SENTINELS.contains(&cell)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn pad_cells(mut cells: Vec<Option<String>>, width: usize) -> Vec<Option<String>> {
    cells.resize(width, None);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_label_column_becomes_country() {
        let table = parse_wide_table("TIME;2019;2020\nFinland;5,3;:\n").unwrap();
        assert_eq!(table.label_header, "TIME");
        assert_eq!(table.columns, vec!["2019", "2020"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].country, "Finland");
        assert_eq!(table.rows[0].cells, vec![Some("5,3".to_string()), None]);
    }

    #[test]
    fn geo_column_is_preferred_over_first_column() {
        let text = "unit;GEO (Labels);2021\nPC;Sweden;12,0\n";
        let table = parse_wide_table(text).unwrap();
        assert_eq!(table.label_header, "GEO (Labels)");
        assert_eq!(table.columns, vec!["unit", "2021"]);
        assert_eq!(table.rows[0].country, "Sweden");
        assert_eq!(
            table.rows[0].cells,
            vec![Some("PC".to_string()), Some("12,0".to_string())]
        );
    }

    #[test]
    fn falls_back_to_first_column() {
        let table = parse_wide_table("Country name;2019\nMalta;4\n").unwrap();
        assert_eq!(table.label_header, "Country name");
        assert_eq!(table.rows[0].country, "Malta");
    }

    #[test]
    fn every_sentinel_becomes_missing() {
        let table = parse_wide_table("TIME;2016;2017;2018;2019\nItaly;:;b;bu;u\n").unwrap();
        assert!(table.rows[0].cells.iter().all(Option::is_none));
    }

    #[test]
    fn sentinel_match_is_case_sensitive_and_exact() {
        assert!(is_sentinel(":"));
        assert!(is_sentinel("bu"));
        assert!(!is_sentinel("B"));
        assert!(!is_sentinel("5 b"));
    }

    #[test]
    fn short_records_are_padded_and_blank_lines_skipped() {
        let text = "TIME;2019;;2020;\nSpain;10;;\n;;;;\n\nGreece;1;b;2;\n";
        let table = parse_wide_table(text).unwrap();
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells, vec![Some("10".to_string()), None, None, None]);
        assert_eq!(
            table.rows[1].cells,
            vec![Some("1".to_string()), None, Some("2".to_string()), None]
        );
    }

    #[test]
    fn extra_trailing_fields_are_ignored() {
        let table = parse_wide_table("TIME;2019\nFinland;1;extra;fields\n").unwrap();
        assert_eq!(table.rows[0].cells, vec![Some("1".to_string())]);
    }
}
