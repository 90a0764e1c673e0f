//! Wide → long reshape ("melt").
//!
//! Every non-label column is a candidate year; only columns whose header is
//! purely decimal digits survive. Footnote and flag columns (often blank or
//! `Unnamed` headers next to each year) fall out here. A repeated year keeps
//! only its first column, so a melt never yields two cells for one
//! `(country, year)`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::io::table::WideTable;

/// One `(country, year, raw cell)` triple before numeric cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct LongCell<'a> {
    pub country: &'a str,
    pub year: i32,
    pub raw: Option<&'a str>,
}

/// Column positions (into `WideTable::columns`) that carry a year, with the year.
pub fn year_columns(columns: &[String]) -> Vec<(usize, i32)> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for (idx, name) in columns.iter().enumerate() {
        let Some(year) = parse_year(name) else {
            continue;
        };
        if seen.insert(year) {
            out.push((idx, year));
        } else {
            debug!(column = idx, year, "dropping repeated year column");
        }
    }
    out
}

fn parse_year(header: &str) -> Option<i32> {
    let token = header.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Expand each wide row into one cell per year column.
///
/// Output order is row-major: all years of the first country, then the next.
/// The result has exactly `rows × year_cols` entries.
pub fn melt<'a>(table: &'a WideTable, year_cols: &[(usize, i32)]) -> Vec<LongCell<'a>> {
    let mut out = Vec::with_capacity(table.rows.len() * year_cols.len());
    for row in &table.rows {
        for &(idx, year) in year_cols {
            out.push(LongCell {
                country: &row.country,
                year,
                raw: row.cells.get(idx).and_then(|c| c.as_deref()),
            });
        }
    }
    out
}
