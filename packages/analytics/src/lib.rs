#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived rates, region aggregation, and linked-selection queries.
//!
//! After the source tables are loaded, [`prepare_dataset`] attaches the
//! per-thousand violent crime rate to every crime record. A
//! [`resolver::QueryResolver`] then answers the chart queries for whatever
//! region and year the [`selection::SelectionState`] currently holds.

pub mod aggregate;
pub mod rates;
pub mod resolver;
pub mod selection;

use std::sync::Arc;

use crime_dash_source::LoadError;
use crime_dash_source::config::DashboardConfig;
use crime_dash_source::dataset::Dataset;
use crime_dash_source::progress::ProgressCallback;

/// Computes derived rates on a freshly loaded dataset.
#[must_use]
pub fn prepare_dataset(dataset: Dataset) -> Dataset {
    dataset.map_crime_records(rates::apply_violent_rates)
}

/// Loads the tables named in `config` and computes derived rates. The
/// returned dataset is ready for querying and is not modified afterwards.
///
/// # Errors
///
/// Returns [`LoadError`] if any table cannot be read or does not match
/// its declared schema.
pub fn load_dashboard(
    config: &DashboardConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Dataset, LoadError> {
    let dataset = crime_dash_source::load_dataset(config, progress)?;
    Ok(prepare_dataset(dataset))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crime_dash_analytics_models::YearFilter;
    use crime_dash_geography_models::RegionCode;
    use crime_dash_source::LoadOptions;
    use crime_dash_source::loader::load_crime_records;
    use crime_dash_source::schema::RawTable;

    use super::*;
    use crate::resolver::QueryResolver;

    fn crime_row<'a>(
        state: &'a str,
        city: &'a str,
        year: &'a str,
        pop: &'a str,
        violent: &'a str,
    ) -> Vec<&'a str> {
        vec![
            state, city, year, pop, violent, "", "", "", "", "", "", "", "", "", "", "", "",
        ]
    }

    fn load(rows: &[Vec<&str>]) -> Dataset {
        let headers = [""; 17];
        let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        let table = RawTable::from_cells(&headers, &rows);
        let crime = load_crime_records(&table, &LoadOptions::default()).unwrap();
        prepare_dataset(Dataset::new(crime.records, BTreeMap::new(), BTreeMap::new()))
    }

    #[test]
    fn end_to_end_region_sums() {
        let dataset = load(&[
            crime_row("Alabama", "X", "2008", "1000", "10"),
            crime_row("Alabama", "Y", "2009", "2000", "10"),
        ]);
        let resolver = QueryResolver::new(&dataset);

        let all = resolver.map_data(YearFilter::All);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].region_code, RegionCode::Al);
        assert!((all[0].summed_vio_crime_per_thousand - 15.0).abs() < 1e-9);

        let only_2008 = resolver.map_data(YearFilter::Year(2008));
        assert!((only_2008[0].summed_vio_crime_per_thousand - 10.0).abs() < 1e-9);
    }

    #[test]
    fn unmapped_rows_are_kept_but_not_aggregated() {
        let dataset = load(&[
            crime_row("Atlantis", "Poseidonia", "2008", "1000", "10"),
            crime_row("Ohio", "Akron", "2008", "1000", "10"),
        ]);
        assert_eq!(dataset.crime_records().len(), 2);
        assert_eq!(
            dataset.crime_records()[0].vio_crime_per_thousand,
            Some(10.0)
        );

        let map = QueryResolver::new(&dataset).map_data(YearFilter::All);
        let codes: Vec<_> = map.iter().map(|a| a.region_code).collect();
        assert_eq!(codes, vec![RegionCode::Oh]);
    }

    #[test]
    fn national_crime_rows_stay_off_the_map() {
        let dataset = load(&[
            crime_row("United States", "Total", "2008", "1000", "10"),
            crime_row("Ohio", "A", "2008", "1000", "1"),
        ]);
        assert_eq!(
            dataset.crime_records()[0].region_code,
            Some(RegionCode::Us)
        );

        let map = QueryResolver::new(&dataset).map_data(YearFilter::All);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].region_code, RegionCode::Oh);
        assert!((map[0].summed_vio_crime_per_thousand - 1.0).abs() < 1e-9);
    }

    #[test]
    fn forward_filled_population_feeds_rates() {
        let dataset = load(&[
            crime_row("Ohio", "Akron", "2008", "2000", "4"),
            crime_row("Ohio", "Dayton", "2008", "", "6"),
            crime_row("Ohio", "Kent", "2008", "0", "6"),
        ]);
        let rates: Vec<_> = dataset
            .crime_records()
            .iter()
            .map(|r| r.vio_crime_per_thousand)
            .collect();
        assert_eq!(rates, vec![Some(2.0), Some(3.0), None]);
    }

    #[test]
    fn sample_dashboard_views() {
        let path =
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../dashboard.toml");
        let config = crime_dash_source::config::load_config(&path).unwrap();
        let progress = crime_dash_source::progress::null_progress();
        let dataset = load_dashboard(&config, &progress).unwrap();
        let resolver = QueryResolver::new(&dataset);

        assert_eq!(resolver.year_options(), vec![2008, 2009]);

        let map = resolver.map_data(YearFilter::All);
        let codes: Vec<_> = map.iter().map(|a| a.region_code).collect();
        assert_eq!(
            codes,
            vec![
                RegionCode::Al,
                RegionCode::Ak,
                RegionCode::Ca,
                RegionCode::Oh,
                RegionCode::Tx,
                RegionCode::Dc,
            ]
        );
        let texas = map.iter().find(|a| a.region_code == RegionCode::Tx).unwrap();
        assert!(texas.summed_vio_crime_per_thousand.abs() < f64::EPSILON);

        assert!(resolver.race_breakdown(RegionCode::Tx).is_no_data());
        assert!(!resolver.social_comparison(RegionCode::Tx).is_no_data());
        assert!(resolver.social_comparison(RegionCode::Dc).is_no_data());
        assert_eq!(
            resolver
                .region_detail(RegionCode::Al, YearFilter::Year(2008))
                .localities
                .len(),
            2
        );
    }

    #[test]
    fn prepare_is_idempotent() {
        let dataset = load(&[crime_row("Ohio", "Akron", "2008", "2000", "4")]);
        let again = prepare_dataset(dataset.clone());
        assert_eq!(dataset, again);
    }
}
