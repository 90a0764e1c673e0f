//! Cross-indicator scatter with a regression overlay.

use std::collections::HashMap;

use crate::domain::{country_code, IndicatorKind, NormalizedTable, Region};
use crate::math::{fit_line, LineFit};

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub country: String,
    pub code: Option<&'static str>,
    pub x: f64,
    pub y: f64,
    /// Member of the selected region.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationView {
    pub x_kind: IndicatorKind,
    pub y_kind: IndicatorKind,
    pub year: i32,
    pub region: Option<Region>,
    /// Sorted by country.
    pub points: Vec<ScatterPoint>,
    /// Fitted over all points, regardless of highlighting.
    pub fit: Option<LineFit>,
}

impl CorrelationView {
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}

/// Inner join of both tables on country for `year`.
pub fn build_correlation(
    x_table: &NormalizedTable,
    y_table: &NormalizedTable,
    x_kind: IndicatorKind,
    y_kind: IndicatorKind,
    year: i32,
    region: Option<Region>,
) -> CorrelationView {
    let y_by_country: HashMap<&str, f64> = y_table
        .rows_for_year(year)
        .map(|r| (r.country.as_str(), r.value))
        .collect();

    let mut points: Vec<ScatterPoint> = x_table
        .rows_for_year(year)
        .filter_map(|r| {
            let y = *y_by_country.get(r.country.as_str())?;
            Some(ScatterPoint {
                country: r.country.clone(),
                code: country_code(&r.country),
                x: r.value,
                y,
                highlighted: region.is_some_and(|reg| reg.contains(&r.country)),
            })
        })
        .collect();
    points.sort_by(|a, b| a.country.cmp(&b.country));

    let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let fit = fit_line(&xy);

    CorrelationView {
        x_kind,
        y_kind,
        year,
        region,
        points,
        fit,
    }
}
