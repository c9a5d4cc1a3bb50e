#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Record types for the three dashboard tables.
//!
//! [`CrimeRecord`] rows come from the crime-by-locality-and-year table,
//! [`RaceComposition`] rows from the race composition table, and
//! [`SocialIndicators`] rows from the social indicator table. All three
//! are keyed by [`RegionCode`].

use std::collections::BTreeMap;

use crime_dash_geography_models::RegionCode;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the offense count columns of the crime table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeType {
    /// Violent crime total
    ViolentCrime,
    /// Murder and non-negligent manslaughter
    Murder,
    Rape,
    Robbery,
    AggravatedAssault,
    /// Property crime total
    PropertyCrime,
    Burglary,
    LarcenyTheft,
    MotorVehicleTheft,
    Arson,
}

impl CrimeType {
    /// The offense types shown in the per-locality crime type breakdown.
    pub const VIOLENT_BREAKDOWN: &'static [Self] = &[
        Self::Murder,
        Self::Rape,
        Self::Robbery,
        Self::AggravatedAssault,
    ];

    /// Returns all variants of this enum, in table column order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ViolentCrime,
            Self::Murder,
            Self::Rape,
            Self::Robbery,
            Self::AggravatedAssault,
            Self::PropertyCrime,
            Self::Burglary,
            Self::LarcenyTheft,
            Self::MotorVehicleTheft,
            Self::Arson,
        ]
    }
}

/// Reported offense counts for a single locality in a single year.
///
/// Count fields are `None` when the source cell was not numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeRecord {
    /// Canonical region code, `None` when the source region name is not
    /// recognized.
    pub region_code: Option<RegionCode>,
    /// Region name exactly as it appeared in the source.
    pub region_name: String,
    /// City or other reporting locality.
    pub locality: String,
    pub year: i32,
    pub population: Option<f64>,
    pub violent_crime: Option<f64>,
    pub murder: Option<f64>,
    pub rape: Option<f64>,
    pub robbery: Option<f64>,
    pub aggravated_assault: Option<f64>,
    pub property_crime: Option<f64>,
    pub burglary: Option<f64>,
    pub larceny_theft: Option<f64>,
    pub motor_vehicle_theft: Option<f64>,
    pub arson: Option<f64>,
    /// Violent crimes per 1,000 residents. Filled in by the rate
    /// calculator after loading.
    pub vio_crime_per_thousand: Option<f64>,
}

impl CrimeRecord {
    /// Creates a record with no counts, no population, and no derived rate.
    #[must_use]
    pub fn new(
        region_code: Option<RegionCode>,
        region_name: impl Into<String>,
        locality: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            region_code,
            region_name: region_name.into(),
            locality: locality.into(),
            year,
            population: None,
            violent_crime: None,
            murder: None,
            rape: None,
            robbery: None,
            aggravated_assault: None,
            property_crime: None,
            burglary: None,
            larceny_theft: None,
            motor_vehicle_theft: None,
            arson: None,
            vio_crime_per_thousand: None,
        }
    }

    /// Returns the count for the given offense column.
    #[must_use]
    pub const fn count(&self, crime_type: CrimeType) -> Option<f64> {
        match crime_type {
            CrimeType::ViolentCrime => self.violent_crime,
            CrimeType::Murder => self.murder,
            CrimeType::Rape => self.rape,
            CrimeType::Robbery => self.robbery,
            CrimeType::AggravatedAssault => self.aggravated_assault,
            CrimeType::PropertyCrime => self.property_crime,
            CrimeType::Burglary => self.burglary,
            CrimeType::LarcenyTheft => self.larceny_theft,
            CrimeType::MotorVehicleTheft => self.motor_vehicle_theft,
            CrimeType::Arson => self.arson,
        }
    }

    /// Sets the count for the given offense column.
    pub const fn set_count(&mut self, crime_type: CrimeType, value: Option<f64>) {
        let slot = match crime_type {
            CrimeType::ViolentCrime => &mut self.violent_crime,
            CrimeType::Murder => &mut self.murder,
            CrimeType::Rape => &mut self.rape,
            CrimeType::Robbery => &mut self.robbery,
            CrimeType::AggravatedAssault => &mut self.aggravated_assault,
            CrimeType::PropertyCrime => &mut self.property_crime,
            CrimeType::Burglary => &mut self.burglary,
            CrimeType::LarcenyTheft => &mut self.larceny_theft,
            CrimeType::MotorVehicleTheft => &mut self.motor_vehicle_theft,
            CrimeType::Arson => &mut self.arson,
        };
        *slot = value;
    }
}

/// A race or ethnicity column of the race composition table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RaceCategory {
    White,
    Black,
    Hispanic,
    Asian,
    NativeAmerican,
    PacificIslander,
    TwoOrMoreRaces,
    Other,
}

impl RaceCategory {
    /// Returns all variants of this enum, in table column order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::White,
            Self::Black,
            Self::Hispanic,
            Self::Asian,
            Self::NativeAmerican,
            Self::PacificIslander,
            Self::TwoOrMoreRaces,
            Self::Other,
        ]
    }

    /// Chart label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Hispanic => "Hispanic",
            Self::Asian => "Asian",
            Self::NativeAmerican => "Native American",
            Self::PacificIslander => "Pacific Islander",
            Self::TwoOrMoreRaces => "Two or More Races",
            Self::Other => "Other",
        }
    }
}

/// Population share by race category for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceComposition {
    pub region_code: RegionCode,
    /// Percentage of the population in each category. `None` when the
    /// source cell was not numeric.
    pub percentages: BTreeMap<RaceCategory, Option<f64>>,
}

/// One of the four socio-economic indicators.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialIndicator {
    UnemploymentRate,
    EducationRate,
    MedianIncome,
    PovertyRate,
}

impl SocialIndicator {
    /// Returns all variants of this enum, in comparison chart order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::UnemploymentRate,
            Self::EducationRate,
            Self::MedianIncome,
            Self::PovertyRate,
        ]
    }

    /// Chart label for this indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnemploymentRate => "Unemployment Rate",
            Self::EducationRate => "Education Rate",
            Self::MedianIncome => "Median Income",
            Self::PovertyRate => "Poverty Rate",
        }
    }
}

/// Socio-economic indicators for one region (or the national aggregate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialIndicators {
    pub region_code: RegionCode,
    pub unemployment_rate: Option<f64>,
    pub education_rate: Option<f64>,
    pub median_income: Option<f64>,
    pub poverty_rate: Option<f64>,
}

impl SocialIndicators {
    /// Returns the value of the given indicator.
    #[must_use]
    pub const fn value(&self, indicator: SocialIndicator) -> Option<f64> {
        match indicator {
            SocialIndicator::UnemploymentRate => self.unemployment_rate,
            SocialIndicator::EducationRate => self.education_rate,
            SocialIndicator::MedianIncome => self.median_income,
            SocialIndicator::PovertyRate => self.poverty_rate,
        }
    }
}
