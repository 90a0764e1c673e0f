//! Read-only view models over the loaded indicator tables.
//!
//! A `Dashboard` is constructed from the table set once; every view is a pure
//! query against it. Aggregate labels listed in the `ExclusionSet` are removed
//! here, at construction, so individual views never filter on their own.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::{ExclusionSet, IndicatorKind, NormalizedTable, NormalizedTableSet, Region};
use crate::error::AppError;

pub mod compare;
pub mod correlation;
pub mod map;
pub mod trend;

pub use compare::*;
pub use correlation::*;
pub use map::*;
pub use trend::*;

/// Indicator tables keyed by `IndicatorKind`, with aggregates removed.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    tables: BTreeMap<IndicatorKind, NormalizedTable>,
}

impl Dashboard {
    pub fn new(set: &NormalizedTableSet, exclusions: &ExclusionSet) -> Self {
        let mut tables = BTreeMap::new();
        for kind in IndicatorKind::ALL {
            if let Some(table) = set.get(kind.file_name()) {
                let filtered = table.without(exclusions);
                debug!(
                    indicator = ?kind,
                    rows = filtered.len(),
                    excluded = table.len() - filtered.len(),
                    "indicator ready"
                );
                tables.insert(kind, filtered);
            }
        }
        Self { tables }
    }

    pub fn indicator(&self, kind: IndicatorKind) -> Option<&NormalizedTable> {
        self.tables.get(&kind)
    }

    pub fn available(&self, kind: IndicatorKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// Loaded indicators in catalogue order.
    pub fn kinds(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.tables.keys().copied()
    }

    /// Years present in every listed indicator. Empty if any is missing.
    pub fn common_years(&self, kinds: &[IndicatorKind]) -> Vec<i32> {
        let mut acc: Option<BTreeSet<i32>> = None;
        for &kind in kinds {
            let Some(table) = self.indicator(kind) else {
                return Vec::new();
            };
            let years: BTreeSet<i32> = table.years().into_iter().collect();
            acc = Some(match acc {
                Some(prev) => prev.intersection(&years).copied().collect(),
                None => years,
            });
        }
        acc.map(|s| s.into_iter().collect()).unwrap_or_default()
    }

    /// Years present in any listed indicator.
    pub fn union_years(&self, kinds: &[IndicatorKind]) -> Vec<i32> {
        let set: BTreeSet<i32> = kinds
            .iter()
            .filter_map(|&k| self.indicator(k))
            .flat_map(|t| t.rows.iter().map(|r| r.year))
            .collect();
        set.into_iter().collect()
    }

    /// Countries present in any listed indicator, sorted.
    pub fn countries(&self, kinds: &[IndicatorKind]) -> Vec<String> {
        let set: BTreeSet<&str> = kinds
            .iter()
            .filter_map(|&k| self.indicator(k))
            .flat_map(|t| t.rows.iter().map(|r| r.country.as_str()))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Per-country map for one indicator and year.
    pub fn map(&self, kind: IndicatorKind, year: i32) -> Result<MapView, AppError> {
        let table = self.require(kind)?;
        let view = build_map(table, kind, year);
        if view.entries.is_empty() {
            return Err(no_data(format!("{}: no values for {year}.", kind.title())));
        }
        Ok(view)
    }

    /// Year-by-year series for the requested countries.
    pub fn trend(&self, kind: IndicatorKind, countries: &[String]) -> Result<TrendView, AppError> {
        let table = self.require(kind)?;
        let view = build_trend(table, kind, countries);
        if view.series.is_empty() {
            return Err(no_data(format!(
                "{}: none of the selected countries have data.",
                kind.title()
            )));
        }
        Ok(view)
    }

    /// Scatter of `y_kind` against `x_kind` for one year, with an OLS line.
    pub fn correlation(
        &self,
        x_kind: IndicatorKind,
        y_kind: IndicatorKind,
        year: i32,
        region: Option<Region>,
    ) -> Result<CorrelationView, AppError> {
        let x = self.require(x_kind)?;
        let y = self.require(y_kind)?;
        let view = build_correlation(x, y, x_kind, y_kind, year, region);
        if view.points.is_empty() {
            return Err(no_data(format!(
                "No country has both {} and {} for {year}.",
                x_kind.title(),
                y_kind.title()
            )));
        }
        Ok(view)
    }

    /// Side-by-side comparison of two countries.
    pub fn compare(
        &self,
        kind: IndicatorKind,
        year: i32,
        country_a: &str,
        country_b: &str,
    ) -> Result<ComparisonView, AppError> {
        let table = self.require(kind)?;
        Ok(build_comparison(table, kind, year, country_a, country_b))
    }

    /// Two countries compared across several indicators. Indicators that were
    /// not loaded are skipped; at least one must be present.
    pub fn compare_profile(
        &self,
        kinds: &[IndicatorKind],
        year: i32,
        country_a: &str,
        country_b: &str,
    ) -> Result<ComparisonProfile, AppError> {
        let rows: Vec<ComparisonView> = kinds
            .iter()
            .filter_map(|&kind| {
                self.indicator(kind)
                    .map(|table| build_comparison(table, kind, year, country_a, country_b))
            })
            .collect();
        if rows.is_empty() {
            return Err(no_data(format!(
                "None of {} was loaded.",
                kinds.iter().map(|k| k.file_name()).collect::<Vec<_>>().join(", ")
            )));
        }
        Ok(ComparisonProfile {
            year,
            country_a: country_a.to_string(),
            country_b: country_b.to_string(),
            rows,
        })
    }

    fn require(&self, kind: IndicatorKind) -> Result<&NormalizedTable, AppError> {
        self.indicator(kind).ok_or_else(|| {
            no_data(format!(
                "No data available for {} ({} was not loaded).",
                kind.title(),
                kind.file_name()
            ))
        })
    }
}

fn no_data(message: String) -> AppError {
    AppError::new(3, message)
}

#[cfg(test)]
pub(crate) mod fixture {
    use crate::domain::{ExclusionSet, IndicatorKind, NormalizedRow, NormalizedTable, NormalizedTableSet};

    use super::Dashboard;

    fn table(kind: IndicatorKind, rows: &[(&str, i32, f64)]) -> NormalizedTable {
        NormalizedTable::new(
            kind.file_name(),
            rows.iter()
                .map(|&(c, y, v)| NormalizedRow {
                    country: c.to_string(),
                    year: y,
                    value: v,
                })
                .collect(),
        )
    }

    pub fn table_set() -> NormalizedTableSet {
        let eu = "European Union - 27 countries (from 2020)";
        [
            table(
                IndicatorKind::EmploymentRate,
                &[
                    (eu, 2020, 72.0),
                    ("Finland", 2019, 77.2),
                    ("Finland", 2020, 76.5),
                    ("Sweden", 2020, 80.8),
                    ("Greece", 2020, 58.3),
                    ("Malta", 2021, 77.1),
                ],
            ),
            table(
                IndicatorKind::LongTermUnemployment,
                &[
                    (eu, 2020, 2.5),
                    ("Finland", 2020, 1.2),
                    ("Sweden", 2020, 1.1),
                    ("Greece", 2020, 11.9),
                    ("Greece", 2021, 9.2),
                ],
            ),
            table(IndicatorKind::AdultLearning, &[("Finland", 2020, 27.3)]),
        ]
        .into_iter()
        .collect()
    }

    pub fn dashboard() -> Dashboard {
        Dashboard::new(&table_set(), &ExclusionSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusions_apply_at_construction_only() {
        let set = fixture::table_set();
        let eu = "European Union - 27 countries (from 2020)";

        let filtered = Dashboard::new(&set, &ExclusionSet::default());
        assert!(!filtered.countries(&[IndicatorKind::EmploymentRate]).iter().any(|c| c == eu));

        let raw = Dashboard::new(&set, &ExclusionSet::none());
        assert!(raw.countries(&[IndicatorKind::EmploymentRate]).iter().any(|c| c == eu));

        // The table set itself is untouched.
        assert_eq!(set.get(IndicatorKind::EmploymentRate.file_name()).unwrap().len(), 6);
    }

    #[test]
    fn unknown_files_are_ignored() {
        let set: NormalizedTableSet = [NormalizedTable::new("other.csv", Vec::new())]
            .into_iter()
            .collect();
        let dash = Dashboard::new(&set, &ExclusionSet::default());
        assert_eq!(dash.kinds().count(), 0);
    }

    #[test]
    fn year_helpers() {
        let dash = fixture::dashboard();
        let both = [IndicatorKind::EmploymentRate, IndicatorKind::LongTermUnemployment];
        assert_eq!(dash.common_years(&both), vec![2020]);
        assert_eq!(dash.union_years(&both), vec![2019, 2020, 2021]);
        assert!(dash.common_years(&[IndicatorKind::EmploymentRate, IndicatorKind::Neet]).is_empty());
        assert!(dash.common_years(&[]).is_empty());
    }

    #[test]
    fn missing_indicator_reports_no_data() {
        let dash = fixture::dashboard();
        let err = dash.map(IndicatorKind::RealGdp, 2020).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("8_6_real_gdp.csv"));
        assert!(!dash.available(IndicatorKind::RealGdp));
    }
}
