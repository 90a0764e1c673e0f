//! Per-year country ranking (the terminal stand-in for a choropleth).

use crate::domain::{country_code, IndicatorKind, NormalizedTable};

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    /// 1-based, highest value first.
    pub rank: usize,
    pub country: String,
    pub code: Option<&'static str>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub kind: IndicatorKind,
    pub year: i32,
    pub entries: Vec<MapEntry>,
}

impl MapView {
    pub fn min(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.value).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.value).reduce(f64::max)
    }
}

pub fn build_map(table: &NormalizedTable, kind: IndicatorKind, year: i32) -> MapView {
    let mut rows: Vec<_> = table.rows_for_year(year).collect();
    rows.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });

    let entries = rows
        .into_iter()
        .enumerate()
        .map(|(idx, r)| MapEntry {
            rank: idx + 1,
            country: r.country.clone(),
            code: country_code(&r.country),
            value: r.value,
        })
        .collect();

    MapView { kind, year, entries }
}

#[cfg(test)]
mod tests {
    use crate::domain::IndicatorKind;
    use crate::views::fixture;

    #[test]
    fn ranks_descending_from_one() {
        let dash = fixture::dashboard();
        let view = dash.map(IndicatorKind::EmploymentRate, 2020).unwrap();

        let order: Vec<_> = view.entries.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(order, vec!["Sweden", "Finland", "Greece"]);
        let ranks: Vec<_> = view.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(view.entries[0].code, Some("SWE"));
        assert_eq!(view.max(), Some(80.8));
        assert_eq!(view.min(), Some(58.3));
    }

    #[test]
    fn empty_year_is_no_data() {
        let dash = fixture::dashboard();
        assert!(dash.map(IndicatorKind::EmploymentRate, 1999).is_err());
    }
}
