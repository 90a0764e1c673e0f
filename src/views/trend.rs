//! Year-by-year trend lines per country.

use crate::domain::{IndicatorKind, NormalizedTable};

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub country: String,
    /// `(year, value)` sorted by year.
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendView {
    pub kind: IndicatorKind,
    pub series: Vec<TrendSeries>,
}

impl TrendView {
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let years = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }
}

/// Countries without any row in the table are left out.
pub fn build_trend(table: &NormalizedTable, kind: IndicatorKind, countries: &[String]) -> TrendView {
    let mut seen = Vec::new();
    let mut series = Vec::new();
    for country in countries {
        if seen.contains(country) {
            continue;
        }
        seen.push(country.clone());

        let points = table.series_for(country);
        if !points.is_empty() {
            series.push(TrendSeries {
                country: country.clone(),
                points,
            });
        }
    }
    TrendView { kind, series }
}

#[cfg(test)]
mod tests {
    use crate::domain::IndicatorKind;
    use crate::views::fixture;

    #[test]
    fn series_are_sorted_and_unknown_countries_dropped() {
        let dash = fixture::dashboard();
        let wanted = vec!["Finland".to_string(), "Atlantis".to_string(), "Finland".to_string()];
        let view = dash.trend(IndicatorKind::EmploymentRate, &wanted).unwrap();

        assert_eq!(view.series.len(), 1);
        assert_eq!(view.series[0].points, vec![(2019, 77.2), (2020, 76.5)]);
        assert_eq!(view.year_range(), Some((2019, 2020)));
    }

    #[test]
    fn no_matching_country_is_no_data() {
        let dash = fixture::dashboard();
        let err = dash
            .trend(IndicatorKind::EmploymentRate, &["Atlantis".to_string()])
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
