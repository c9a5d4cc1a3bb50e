//! The normalized tables, immutable once built.

use std::collections::BTreeMap;

use crime_dash_crime_models::{CrimeRecord, RaceComposition, SocialIndicators};
use crime_dash_geography_models::RegionCode;

/// The three normalized source tables.
///
/// Crime records stay in source order. Race and social rows are indexed by
/// region code, one row per region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    crime: Vec<CrimeRecord>,
    race: BTreeMap<RegionCode, RaceComposition>,
    social: BTreeMap<RegionCode, SocialIndicators>,
}

impl Dataset {
    #[must_use]
    pub const fn new(
        crime: Vec<CrimeRecord>,
        race: BTreeMap<RegionCode, RaceComposition>,
        social: BTreeMap<RegionCode, SocialIndicators>,
    ) -> Self {
        Self {
            crime,
            race,
            social,
        }
    }

    /// Applies a one-time transformation to the crime records and returns
    /// the updated dataset. Used to attach derived fields after loading.
    #[must_use]
    pub fn map_crime_records(mut self, f: impl FnOnce(&mut [CrimeRecord])) -> Self {
        f(&mut self.crime);
        self
    }

    /// All crime records, in source order.
    #[must_use]
    pub fn crime_records(&self) -> &[CrimeRecord] {
        &self.crime
    }

    /// The race composition row for a region.
    #[must_use]
    pub fn race_composition(&self, region_code: RegionCode) -> Option<&RaceComposition> {
        self.race.get(&region_code)
    }

    /// The social indicator row for a region. The national row is
    /// [`RegionCode::Us`].
    #[must_use]
    pub fn social_indicators(&self, region_code: RegionCode) -> Option<&SocialIndicators> {
        self.social.get(&region_code)
    }
}
