//! Locale-tolerant numeric cleaning.
//!
//! Steps, in order:
//! 1. strip thousands separators (ASCII space, U+00A0, U+202F)
//! 2. comma decimal separator → period
//! 3. parse as `f64`
//! 4. anything that fails (sentinels, footnote letters, `inf`/`NaN`) is missing

/// Characters Eurostat uses to group thousands.
const THOUSANDS_SEPARATORS: [char; 3] = [' ', '\u{00a0}', '\u{202f}'];

/// Clean one raw cell. `None` means missing, never zero.
pub fn clean_value(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
        .collect();
    if stripped.is_empty() {
        return None;
    }
    let v = stripped.replace(',', ".").parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(clean_value("42"), Some(42.0));
        assert_eq!(clean_value("-3.25"), Some(-3.25));
        assert_eq!(clean_value(" 7 "), Some(7.0));
    }

    #[test]
    fn comma_decimal_and_grouping_separators() {
        assert_eq!(clean_value("1 234,5"), Some(1234.5));
        assert_eq!(clean_value("1\u{202f}234,5"), Some(1234.5));
        assert_eq!(clean_value("1\u{00a0}234,5"), Some(1234.5));
        assert_eq!(clean_value("5,3"), Some(5.3));
        assert_eq!(clean_value("12 345 678"), Some(12_345_678.0));
    }

    #[test]
    fn sentinels_are_missing_not_zero() {
        for s in [":", "b", "bu", "u"] {
            assert_eq!(clean_value(s), None, "sentinel {s:?}");
        }
    }

    #[test]
    fn leftover_text_is_missing() {
        assert_eq!(clean_value(""), None);
        assert_eq!(clean_value("   "), None);
        assert_eq!(clean_value("5,3 b"), None);
        assert_eq!(clean_value("n/a"), None);
        assert_eq!(clean_value("NaN"), None);
        assert_eq!(clean_value("inf"), None);
    }
}
