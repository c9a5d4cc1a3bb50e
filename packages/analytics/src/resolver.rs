//! Chart queries over a loaded [`Dataset`].
//!
//! [`QueryResolver`] answers the four dashboard queries for any region and
//! year filter, and [`QueryResolver::resolve`] runs all of them for the
//! current [`SelectionState`]. Queries only read the dataset; nothing is
//! cached between calls.

use crime_dash_analytics_models::{
    DashboardView, IndicatorComparison, LocalityBreakdown, RaceBreakdown, RaceSlice,
    RegionAggregate, RegionDetail, RegionLookup, SocialComparison, YearFilter,
};
use crime_dash_crime_models::{CrimeRecord, CrimeType, RaceCategory, SocialIndicator};
use crime_dash_geography_models::RegionCode;
use crime_dash_source::dataset::Dataset;

use crate::aggregate::{aggregate, available_years};
use crate::selection::SelectionState;

/// Read-only query access to a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'a> {
    dataset: &'a Dataset,
}

impl<'a> QueryResolver<'a> {
    #[must_use]
    pub const fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Choropleth series: per-region summed violent crime rates.
    #[must_use]
    pub fn map_data(&self, year_filter: YearFilter) -> Vec<RegionAggregate> {
        aggregate(self.dataset.crime_records(), year_filter)
    }

    /// Distinct years available to the year filter.
    #[must_use]
    pub fn year_options(&self) -> Vec<i32> {
        available_years(self.dataset.crime_records())
    }

    /// Rows of one region (and year, unless `All`), in source order, with
    /// a per-locality offense breakdown. No matching rows yields an empty
    /// detail.
    #[must_use]
    pub fn region_detail(&self, region_code: RegionCode, year_filter: YearFilter) -> RegionDetail {
        let records: Vec<CrimeRecord> = self
            .dataset
            .crime_records()
            .iter()
            .filter(|r| r.region_code == Some(region_code) && year_filter.matches(r.year))
            .cloned()
            .collect();

        let localities = records.iter().map(locality_breakdown).collect();

        RegionDetail {
            region_code,
            year_filter,
            records,
            localities,
        }
    }

    /// Race composition of one region, or [`RegionLookup::NoData`] when the
    /// race table has no row for it.
    #[must_use]
    pub fn race_breakdown(&self, region_code: RegionCode) -> RegionLookup<RaceBreakdown> {
        let Some(composition) = self.dataset.race_composition(region_code) else {
            log::debug!("No race composition for {region_code}");
            return RegionLookup::NoData { region_code };
        };

        let slices = RaceCategory::all()
            .iter()
            .map(|category| RaceSlice {
                category: *category,
                label: category.label().to_string(),
                percentage: composition.percentages.get(category).copied().flatten(),
            })
            .collect();

        RegionLookup::Available(RaceBreakdown {
            region_code,
            slices,
        })
    }

    /// The four social indicators of one region next to the national
    /// values, or [`RegionLookup::NoData`] when the region has no row.
    /// A missing national row leaves the national values empty.
    #[must_use]
    pub fn social_comparison(&self, region_code: RegionCode) -> RegionLookup<SocialComparison> {
        let Some(region) = self.dataset.social_indicators(region_code) else {
            log::debug!("No social indicators for {region_code}");
            return RegionLookup::NoData { region_code };
        };

        let national = self.dataset.social_indicators(RegionCode::Us);
        if national.is_none() {
            log::warn!("No national social indicator row; comparing {region_code} without it");
        }

        let indicators = SocialIndicator::all()
            .iter()
            .map(|indicator| IndicatorComparison {
                indicator: *indicator,
                label: indicator.label().to_string(),
                region_value: region.value(*indicator),
                national_value: national.and_then(|n| n.value(*indicator)),
            })
            .collect();

        RegionLookup::Available(SocialComparison {
            region_code,
            indicators,
        })
    }

    /// Runs every query for the current selection.
    #[must_use]
    pub fn resolve(&self, selection: &SelectionState) -> DashboardView {
        let region_code = selection.selected_region();
        let year_filter = selection.selected_year();

        log::debug!("Resolving view for {region_code} / {year_filter}");

        DashboardView {
            selection: selection.snapshot(),
            year_options: self.year_options(),
            map: self.map_data(year_filter),
            detail: self.region_detail(region_code, year_filter),
            race: self.race_breakdown(region_code),
            social: self.social_comparison(region_code),
        }
    }
}

fn locality_breakdown(record: &CrimeRecord) -> LocalityBreakdown {
    LocalityBreakdown {
        locality: record.locality.clone(),
        year: record.year,
        violent_crime: record.violent_crime,
        breakdown: CrimeType::VIOLENT_BREAKDOWN
            .iter()
            .map(|crime_type| (*crime_type, record.count(*crime_type)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crime_dash_crime_models::{RaceComposition, SocialIndicators};

    use super::*;
    use crate::rates::apply_violent_rates;
    use crate::selection::InteractionEvent;

    fn crime(
        region: Option<RegionCode>,
        locality: &str,
        year: i32,
        pop: f64,
        violent: f64,
    ) -> CrimeRecord {
        let mut record = CrimeRecord::new(region, "", locality, year);
        record.population = Some(pop);
        record.violent_crime = Some(violent);
        record.murder = Some(1.0);
        record.rape = Some(2.0);
        record.robbery = None;
        record.aggravated_assault = Some(4.0);
        record
    }

    fn social(region_code: RegionCode, unemployment: f64) -> SocialIndicators {
        SocialIndicators {
            region_code,
            unemployment_rate: Some(unemployment),
            education_rate: Some(90.0),
            median_income: Some(60_000.0),
            poverty_rate: None,
        }
    }

    fn dataset() -> Dataset {
        let mut records = vec![
            crime(Some(RegionCode::Al), "X", 2008, 1000.0, 10.0),
            crime(Some(RegionCode::Al), "Y", 2009, 2000.0, 10.0),
            crime(Some(RegionCode::Oh), "Z", 2008, 500.0, 5.0),
            crime(None, "Atlantis", 2008, 100.0, 100.0),
        ];
        apply_violent_rates(&mut records);

        let mut race = BTreeMap::new();
        race.insert(
            RegionCode::Al,
            RaceComposition {
                region_code: RegionCode::Al,
                percentages: BTreeMap::from([
                    (RaceCategory::White, Some(65.0)),
                    (RaceCategory::Black, Some(26.0)),
                ]),
            },
        );

        let mut social_rows = BTreeMap::new();
        social_rows.insert(RegionCode::Al, social(RegionCode::Al, 5.5));
        social_rows.insert(RegionCode::Us, social(RegionCode::Us, 4.0));

        Dataset::new(records, race, social_rows)
    }

    #[test]
    fn map_data_delegates_to_aggregation() {
        let dataset = dataset();
        let resolver = QueryResolver::new(&dataset);
        let map = resolver.map_data(YearFilter::All);
        assert_eq!(map, aggregate(dataset.crime_records(), YearFilter::All));
        assert_eq!(map[0].region_code, RegionCode::Al);
        assert!((map[0].summed_vio_crime_per_thousand - 15.0).abs() < 1e-9);
        let map_2008 = resolver.map_data(YearFilter::Year(2008));
        assert!((map_2008[0].summed_vio_crime_per_thousand - 10.0).abs() < 1e-9);
    }

    #[test]
    fn region_detail_filters_region_and_year() {
        let dataset = dataset();
        let resolver = QueryResolver::new(&dataset);

        let all = resolver.region_detail(RegionCode::Al, YearFilter::All);
        let localities: Vec<_> = all.records.iter().map(|r| r.locality.as_str()).collect();
        assert_eq!(localities, vec!["X", "Y"]);
        assert_eq!(all.localities.len(), 2);

        let only_2009 = resolver.region_detail(RegionCode::Al, YearFilter::Year(2009));
        assert_eq!(only_2009.records.len(), 1);
        assert_eq!(only_2009.localities[0].locality, "Y");
        assert_eq!(only_2009.year_filter, YearFilter::Year(2009));
    }

    #[test]
    fn region_detail_breakdown_has_violent_offenses() {
        let dataset = dataset();
        let detail = QueryResolver::new(&dataset).region_detail(RegionCode::Oh, YearFilter::All);
        let locality = &detail.localities[0];
        assert_eq!(locality.violent_crime, Some(5.0));
        assert_eq!(locality.breakdown.len(), 4);
        assert_eq!(locality.breakdown[&CrimeType::Murder], Some(1.0));
        assert_eq!(locality.breakdown[&CrimeType::Robbery], None);
        assert!(!locality.breakdown.contains_key(&CrimeType::Burglary));
    }

    #[test]
    fn region_detail_without_rows_is_empty() {
        let dataset = dataset();
        let resolver = QueryResolver::new(&dataset);
        let detail = resolver.region_detail(RegionCode::Wy, YearFilter::All);
        assert!(detail.is_empty());
        assert!(detail.localities.is_empty());
        assert!(resolver.region_detail(RegionCode::Al, YearFilter::Year(1990)).is_empty());
    }

    #[test]
    fn race_breakdown_found() {
        let dataset = dataset();
        let lookup = QueryResolver::new(&dataset).race_breakdown(RegionCode::Al);
        let breakdown = lookup.available().unwrap();
        assert_eq!(breakdown.slices.len(), RaceCategory::all().len());
        assert_eq!(breakdown.slices[0].category, RaceCategory::White);
        assert_eq!(breakdown.slices[0].percentage, Some(65.0));
        assert_eq!(breakdown.slices[2].percentage, None);
    }

    #[test]
    fn race_breakdown_missing_region_is_no_data() {
        let dataset = dataset();
        let lookup = QueryResolver::new(&dataset).race_breakdown(RegionCode::Wy);
        assert_eq!(
            lookup,
            RegionLookup::NoData {
                region_code: RegionCode::Wy
            }
        );
    }

    #[test]
    fn social_comparison_pairs_region_with_nation() {
        let dataset = dataset();
        let lookup = QueryResolver::new(&dataset).social_comparison(RegionCode::Al);
        let comparison = lookup.available().unwrap();
        let indicators: Vec<_> = comparison.indicators.iter().map(|i| i.indicator).collect();
        assert_eq!(indicators, SocialIndicator::all());
        let unemployment = &comparison.indicators[0];
        assert_eq!(unemployment.region_value, Some(5.5));
        assert_eq!(unemployment.national_value, Some(4.0));
        assert_eq!(comparison.indicators[3].region_value, None);
    }

    #[test]
    fn social_comparison_missing_region_is_no_data() {
        let dataset = dataset();
        let lookup = QueryResolver::new(&dataset).social_comparison(RegionCode::Oh);
        assert!(lookup.is_no_data());
    }

    #[test]
    fn social_comparison_without_national_row() {
        let mut social_rows = BTreeMap::new();
        social_rows.insert(RegionCode::Al, social(RegionCode::Al, 5.5));
        let dataset = Dataset::new(Vec::new(), BTreeMap::new(), social_rows);
        let lookup = QueryResolver::new(&dataset).social_comparison(RegionCode::Al);
        let comparison = lookup.available().unwrap();
        assert!(comparison.indicators.iter().all(|i| i.national_value.is_none()));
        assert_eq!(comparison.indicators[0].region_value, Some(5.5));
    }

    #[test]
    fn resolve_follows_selection() {
        let dataset = dataset();
        let resolver = QueryResolver::new(&dataset);
        let mut selection = SelectionState::default();

        let view = resolver.resolve(&selection);
        assert_eq!(view.selection.region_code, RegionCode::Al);
        assert_eq!(view.year_options, vec![2008, 2009]);
        assert_eq!(view.detail.records.len(), 2);
        assert!(!view.race.is_no_data());

        selection.apply(InteractionEvent::RegionSelected(RegionCode::Oh));
        selection.apply(InteractionEvent::YearSelected(YearFilter::Year(2008)));
        let view = resolver.resolve(&selection);
        assert_eq!(view.detail.region_code, RegionCode::Oh);
        assert_eq!(view.detail.records.len(), 1);
        assert_eq!(view.map.len(), 2);
        assert!(view.race.is_no_data());
        assert!(view.social.is_no_data());
    }
}
