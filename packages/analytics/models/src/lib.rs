#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the dashboard queries.
//!
//! Every query returns plain serializable data that a charting layer can
//! consume directly: the map series ([`RegionAggregate`]), the region
//! detail series ([`RegionDetail`]), the race composition
//! ([`RaceBreakdown`]), and the region vs. national indicator comparison
//! ([`SocialComparison`]). Lookups that can miss return a
//! [`RegionLookup`] so an absent row is an explicit state, not an error.

use std::collections::BTreeMap;

use crime_dash_crime_models::{CrimeRecord, CrimeType, RaceCategory, SocialIndicator};
use crime_dash_geography_models::RegionCode;
use serde::{Deserialize, Serialize};

/// Error returned when a year filter string is neither `All` nor a year.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid year filter {value:?}: expected \"All\" or a year")]
pub struct InvalidYearFilterError {
    /// The rejected input.
    pub value: String,
}

/// Restricts queries to a single year, or not at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum YearFilter {
    /// No year restriction.
    #[default]
    All,
    /// Only rows with exactly this year.
    Year(i32),
}

impl YearFilter {
    /// Whether a row from `year` passes this filter.
    #[must_use]
    pub const fn matches(self, year: i32) -> bool {
        match self {
            Self::All => true,
            Self::Year(y) => y == year,
        }
    }
}

impl std::fmt::Display for YearFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

impl std::str::FromStr for YearFilter {
    type Err = InvalidYearFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<i32>()
            .map(Self::Year)
            .map_err(|_| InvalidYearFilterError {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for YearFilter {
    type Error = InvalidYearFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearFilter> for String {
    fn from(value: YearFilter) -> Self {
        value.to_string()
    }
}

/// One region's entry in the map series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    pub region_code: RegionCode,
    /// Sum of the per-thousand violent crime rates of the region's rows.
    /// Rows without a rate contribute zero.
    pub summed_vio_crime_per_thousand: f64,
    /// Number of rows that were summed.
    pub record_count: usize,
}

/// Per-locality counts for the detail bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityBreakdown {
    pub locality: String,
    pub year: i32,
    /// Violent crime total for the locality.
    pub violent_crime: Option<f64>,
    /// Counts of each offense in [`CrimeType::VIOLENT_BREAKDOWN`].
    pub breakdown: BTreeMap<CrimeType, Option<f64>>,
}

/// Rows and per-locality breakdown for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDetail {
    pub region_code: RegionCode,
    pub year_filter: YearFilter,
    /// Matching rows, in source order.
    pub records: Vec<CrimeRecord>,
    /// One entry per matching row, in the same order.
    pub localities: Vec<LocalityBreakdown>,
}

impl RegionDetail {
    /// Whether no rows matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One slice of the race composition chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSlice {
    pub category: RaceCategory,
    pub label: String,
    pub percentage: Option<f64>,
}

/// Race composition of one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceBreakdown {
    pub region_code: RegionCode,
    /// Slices in [`RaceCategory::all`] order.
    pub slices: Vec<RaceSlice>,
}

/// A single indicator compared between a region and the nation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorComparison {
    pub indicator: SocialIndicator,
    pub label: String,
    pub region_value: Option<f64>,
    /// `None` when the national row is missing or its cell was not numeric.
    pub national_value: Option<f64>,
}

/// All four indicators compared between a region and the nation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialComparison {
    pub region_code: RegionCode,
    /// Comparisons in [`SocialIndicator::all`] order.
    pub indicators: Vec<IndicatorComparison>,
}

/// Outcome of a per-region lookup that may find nothing.
///
/// `NoData` is an expected state: views render a placeholder for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum RegionLookup<T> {
    /// The region has data.
    Available(T),
    /// The table has no row for the region.
    #[serde(rename_all = "camelCase")]
    NoData {
        /// The region that was looked up.
        region_code: RegionCode,
    },
}

impl<T> RegionLookup<T> {
    /// Whether the lookup found nothing.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Returns the found value, if any.
    #[must_use]
    pub const fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::NoData { .. } => None,
        }
    }
}

/// The current selection, echoed back with every resolved view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub region_code: RegionCode,
    pub year_filter: YearFilter,
}

/// Everything the dashboard renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub selection: SelectionSnapshot,
    /// Distinct years in the crime table, ascending, for the year filter.
    pub year_options: Vec<i32>,
    /// Choropleth series for the selected year filter.
    pub map: Vec<RegionAggregate>,
    pub detail: RegionDetail,
    pub race: RegionLookup<RaceBreakdown>,
    pub social: RegionLookup<SocialComparison>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_filter_parses() {
        assert_eq!("All".parse::<YearFilter>(), Ok(YearFilter::All));
        assert_eq!("all".parse::<YearFilter>(), Ok(YearFilter::All));
        assert_eq!(" 2008 ".parse::<YearFilter>(), Ok(YearFilter::Year(2008)));
        assert!("twenty".parse::<YearFilter>().is_err());
        assert!("".parse::<YearFilter>().is_err());
    }

    #[test]
    fn year_filter_matches() {
        assert!(YearFilter::All.matches(1999));
        assert!(YearFilter::Year(2008).matches(2008));
        assert!(!YearFilter::Year(2008).matches(2009));
    }

    #[test]
    fn year_filter_serializes_as_label() {
        assert_eq!(serde_json::to_string(&YearFilter::All).unwrap(), "\"All\"");
        assert_eq!(
            serde_json::to_string(&YearFilter::Year(2008)).unwrap(),
            "\"2008\""
        );
        let parsed: YearFilter = serde_json::from_str("\"2009\"").unwrap();
        assert_eq!(parsed, YearFilter::Year(2009));
    }

    #[test]
    fn no_data_serializes_with_status() {
        let lookup: RegionLookup<RaceBreakdown> = RegionLookup::NoData {
            region_code: RegionCode::Wy,
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "no_data", "data": { "regionCode": "WY" } })
        );
        assert!(lookup.is_no_data());
        assert!(lookup.available().is_none());
    }

    #[test]
    fn available_lookup() {
        let lookup = RegionLookup::Available(RaceBreakdown {
            region_code: RegionCode::Oh,
            slices: Vec::new(),
        });
        assert!(!lookup.is_no_data());
        assert_eq!(
            lookup.available().map(|b| b.region_code),
            Some(RegionCode::Oh)
        );
    }
}
