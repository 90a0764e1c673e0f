//! Header location for Eurostat-style exports.
//!
//! Exports start with a free-text preamble (dataset title, source, last update,
//! footnotes) of varying length. The tabular header is the first line that
//! either starts with `TIME;` or mentions `GEO (Labels)`.

use crate::error::LoadError;

/// Field delimiter used by every export.
pub const FIELD_DELIMITER: u8 = b';';

const TIME_MARKER: &str = "TIME;";
const GEO_MARKER: &str = "GEO (Labels)";

/// Zero-based index of the header line, i.e. the number of preamble lines to skip.
///
/// When the two markers sit on different lines the earlier one wins; a single
/// forward scan that stops at the first line matching either marker gives
/// exactly that.
pub fn locate_header<S: AsRef<str>>(lines: &[S]) -> Result<usize, LoadError> {
    lines
        .iter()
        .position(|line| is_header_line(line.as_ref()))
        .ok_or(LoadError::HeaderNotFound)
}

fn is_header_line(line: &str) -> bool {
    let line = line.trim_start_matches('\u{feff}').trim_start();
    line.starts_with(TIME_MARKER) || line.contains(GEO_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_preamble_to_time_line() {
        let lines = [
            "Early leavers from education and training",
            "Source of data:;Eurostat",
            "",
            "TIME;2019;2020",
            "Finland;5,3;:",
        ];
        assert_eq!(locate_header(&lines).unwrap(), 3);
    }

    #[test]
    fn geo_labels_line_counts_as_header() {
        let lines = ["Title", "GEO (Labels);2021;2022", "Sweden;1;2"];
        assert_eq!(locate_header(&lines).unwrap(), 1);
    }

    #[test]
    fn earlier_marker_wins_when_split_across_lines() {
        let lines = ["meta", "TIME;2019;;2020;", "GEO (Labels);;;;", "Malta;1;;2;"];
        assert_eq!(locate_header(&lines).unwrap(), 1);

        let lines = ["meta", "GEO (Labels);;", "TIME;2019;2020"];
        assert_eq!(locate_header(&lines).unwrap(), 1);
    }

    #[test]
    fn time_must_be_followed_by_delimiter() {
        let lines = ["TIMESTAMP;x", "TIME series overview", "data;1"];
        assert!(matches!(locate_header(&lines), Err(LoadError::HeaderNotFound)));
    }

    #[test]
    fn tolerates_bom_and_leading_whitespace() {
        let lines = ["\u{feff}TIME;2019"];
        assert_eq!(locate_header(&lines).unwrap(), 0);
        let lines = ["note", "   TIME;2019"];
        assert_eq!(locate_header(&lines).unwrap(), 1);
    }

    #[test]
    fn header_index_precedes_data_lines() {
        let lines = ["a", "b", "TIME;2019", "Finland;1"];
        let idx = locate_header(&lines).unwrap();
        assert!(idx < lines.len() - 1);
    }

    #[test]
    fn missing_marker_is_an_error() {
        let lines = ["just;some;text", "1;2;3"];
        assert!(matches!(locate_header(&lines), Err(LoadError::HeaderNotFound)));
        let empty: [&str; 0] = [];
        assert!(matches!(locate_header(&empty), Err(LoadError::HeaderNotFound)));
    }
}
