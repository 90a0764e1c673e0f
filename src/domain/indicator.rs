//! Indicator catalogue, regions and aggregate exclusions.
//!
//! The dashboard never looks tables up by free-form labels: every known export
//! is an `IndicatorKind`, and the enum owns its filename, title and unit.

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A known Eurostat indicator export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorKind {
    EarlyLeavers,
    LowAchievingMath,
    LowAchieving,
    EarlyChildhood,
    TertiaryEducation,
    DigitalSkills,
    AdultLearning,
    EmploymentRate,
    RiskOfPoverty,
    InvestmentGdp,
    LongTermUnemployment,
    OutsideLabour,
    RealGdp,
    Neet,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 14] = [
        IndicatorKind::EarlyLeavers,
        IndicatorKind::LowAchievingMath,
        IndicatorKind::LowAchieving,
        IndicatorKind::EarlyChildhood,
        IndicatorKind::TertiaryEducation,
        IndicatorKind::DigitalSkills,
        IndicatorKind::AdultLearning,
        IndicatorKind::EmploymentRate,
        IndicatorKind::RiskOfPoverty,
        IndicatorKind::InvestmentGdp,
        IndicatorKind::LongTermUnemployment,
        IndicatorKind::OutsideLabour,
        IndicatorKind::RealGdp,
        IndicatorKind::Neet,
    ];

    /// Education indicators shown side by side in the education views.
    pub const EDUCATION: [IndicatorKind; 3] = [
        IndicatorKind::EarlyChildhood,
        IndicatorKind::TertiaryEducation,
        IndicatorKind::AdultLearning,
    ];

    /// Economy indicators paired against education in correlation views.
    pub const ECONOMY: [IndicatorKind; 2] = [IndicatorKind::RealGdp, IndicatorKind::InvestmentGdp];

    /// Source export filename (the table-set key).
    pub fn file_name(self) -> &'static str {
        match self {
            IndicatorKind::EarlyLeavers => "4_1_early_leavers.csv",
            IndicatorKind::LowAchievingMath => "4_2_2_low_achieving_math.csv",
            IndicatorKind::LowAchieving => "4_2_low_achieving.csv",
            IndicatorKind::EarlyChildhood => "4_3_early_childhood.csv",
            IndicatorKind::TertiaryEducation => "4_4_tertiary_educational.csv",
            IndicatorKind::DigitalSkills => "4_5_digital_skills.csv",
            IndicatorKind::AdultLearning => "4_6_adult_learning.csv",
            IndicatorKind::EmploymentRate => "8_1_employment_rate.csv",
            IndicatorKind::RiskOfPoverty => "8_2_risk_of_poverty.csv",
            IndicatorKind::InvestmentGdp => "8_3_investment_gdp.csv",
            IndicatorKind::LongTermUnemployment => "8_4_long_term_unemployment.csv",
            IndicatorKind::OutsideLabour => "8_5_outside_labour.csv",
            IndicatorKind::RealGdp => "8_6_real_gdp.csv",
            IndicatorKind::Neet => "8_7_neet.csv",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.file_name() == name)
    }

    /// Human-readable label for terminal output.
    pub fn title(self) -> &'static str {
        match self {
            IndicatorKind::EarlyLeavers => "Early leavers from education and training",
            IndicatorKind::LowAchievingMath => "Low achieving 15-year-olds in mathematics",
            IndicatorKind::LowAchieving => "Low achieving 15-year-olds in reading",
            IndicatorKind::EarlyChildhood => "Participation in early childhood education",
            IndicatorKind::TertiaryEducation => "Persons aged 25-34 with tertiary education",
            IndicatorKind::DigitalSkills => "Adults with at least basic digital skills",
            IndicatorKind::AdultLearning => "Adult participation in learning",
            IndicatorKind::EmploymentRate => "Employment rate",
            IndicatorKind::RiskOfPoverty => "In-work at-risk-of-poverty rate",
            IndicatorKind::InvestmentGdp => "Investment share of GDP",
            IndicatorKind::LongTermUnemployment => "Long-term unemployment rate",
            IndicatorKind::OutsideLabour => "Population outside the labour force",
            IndicatorKind::RealGdp => "Real GDP per capita",
            IndicatorKind::Neet => "Young people neither in employment nor in education and training",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            IndicatorKind::RealGdp => "EUR per capita",
            IndicatorKind::InvestmentGdp => "% of GDP",
            _ => "%",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Country groupings used to highlight points in correlation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Nordics,
    BritishIsles,
    WesternEurope,
    SouthernEurope,
    EasternEurope,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Nordics,
        Region::BritishIsles,
        Region::WesternEurope,
        Region::SouthernEurope,
        Region::EasternEurope,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Region::Nordics => "Nordics",
            Region::BritishIsles => "British Isles",
            Region::WesternEurope => "Western Europe",
            Region::SouthernEurope => "Southern Europe",
            Region::EasternEurope => "Eastern Europe",
        }
    }

    pub fn countries(self) -> &'static [&'static str] {
        match self {
            Region::Nordics => &["Finland", "Sweden", "Norway", "Denmark", "Iceland"],
            Region::BritishIsles => &["United Kingdom", "Ireland"],
            Region::WesternEurope => &[
                "France",
                "Belgium",
                "Netherlands",
                "Luxembourg",
                "Germany",
                "Switzerland",
                "Austria",
            ],
            Region::SouthernEurope => &["Portugal", "Spain", "Italy", "Malta", "Greece", "Cyprus"],
            Region::EasternEurope => &[
                "Poland",
                "Czechia",
                "Slovakia",
                "Slovenia",
                "Hungary",
                "Romania",
                "Bulgaria",
                "Croatia",
                "Bosnia and Herzegovina",
                "Serbia",
                "Montenegro",
                "North Macedonia",
                "Estonia",
                "Latvia",
                "Lithuania",
            ],
        }
    }

    pub fn contains(self, country: &str) -> bool {
        self.countries().contains(&country)
    }

    pub fn of(country: &str) -> Option<Region> {
        Self::ALL.into_iter().find(|r| r.contains(country))
    }
}

/// ISO 3166-1 alpha-3 code for a country label, if it is a known country.
pub fn country_code(country: &str) -> Option<&'static str> {
    let code = match country {
        "Finland" => "FIN",
        "Sweden" => "SWE",
        "Norway" => "NOR",
        "Denmark" => "DNK",
        "Iceland" => "ISL",
        "United Kingdom" => "GBR",
        "Ireland" => "IRL",
        "France" => "FRA",
        "Belgium" => "BEL",
        "Netherlands" => "NLD",
        "Luxembourg" => "LUX",
        "Germany" => "DEU",
        "Switzerland" => "CHE",
        "Austria" => "AUT",
        "Portugal" => "PRT",
        "Spain" => "ESP",
        "Italy" => "ITA",
        "Malta" => "MLT",
        "Greece" => "GRC",
        "Cyprus" => "CYP",
        "Poland" => "POL",
        "Czechia" => "CZE",
        "Slovakia" => "SVK",
        "Slovenia" => "SVN",
        "Hungary" => "HUN",
        "Romania" => "ROU",
        "Bulgaria" => "BGR",
        "Croatia" => "HRV",
        "Bosnia and Herzegovina" => "BIH",
        "Serbia" => "SRB",
        "Montenegro" => "MNE",
        "North Macedonia" => "MKD",
        "Estonia" => "EST",
        "Latvia" => "LVA",
        "Lithuania" => "LTU",
        _ => return None,
    };
    Some(code)
}

/// Aggregate pseudo-country labels that views leave out.
pub const DEFAULT_AGGREGATES: [&str; 3] = [
    "European Union - 27 countries (from 2020)",
    "Euro area – 20 countries (from 2023)",
    "Euro area - 19 countries  (2015-2022)",
];

/// Labels removed from every table when the dashboard is built.
///
/// Matching is exact: Eurostat labels differ in dash style and spacing between
/// vintages, so each variant has to be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    labels: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn none() -> Self {
        Self {
            labels: BTreeSet::new(),
        }
    }

    pub fn with(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    pub fn contains(&self, country: &str) -> bool {
        self.labels.contains(country)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        DEFAULT_AGGREGATES
            .into_iter()
            .fold(Self::none(), |set, label| set.with(label))
    }
}
