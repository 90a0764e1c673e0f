//! Two-country pictogram comparison.
//!
//! Each icon stands for `PERCENT_PER_ICON` points of the indicator, so a 27.3%
//! participation rate draws five icons.

use crate::domain::{IndicatorKind, NormalizedTable};

pub const PERCENT_PER_ICON: f64 = 5.0;
pub const MAX_ICONS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSide {
    pub country: String,
    pub value: Option<f64>,
    pub icons: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub kind: IndicatorKind,
    pub year: i32,
    pub a: ComparisonSide,
    pub b: ComparisonSide,
}

/// Several indicators compared for the same two countries and year.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonProfile {
    pub year: i32,
    pub country_a: String,
    pub country_b: String,
    /// One entry per loaded indicator, in request order.
    pub rows: Vec<ComparisonView>,
}

pub fn icon_count(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let icons = (value / PERCENT_PER_ICON).round_ties_even() as usize;
    icons.min(MAX_ICONS)
}

pub fn build_comparison(
    table: &NormalizedTable,
    kind: IndicatorKind,
    year: i32,
    country_a: &str,
    country_b: &str,
) -> ComparisonView {
    let side = |country: &str| {
        let value = table.value(country, year);
        ComparisonSide {
            country: country.to_string(),
            value,
            icons: value.map(icon_count).unwrap_or(0),
        }
    };
    ComparisonView {
        kind,
        year,
        a: side(country_a),
        b: side(country_b),
    }
}
