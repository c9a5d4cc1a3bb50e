//! Region aggregation for the map series.

use std::collections::{BTreeMap, BTreeSet};

use crime_dash_analytics_models::{RegionAggregate, YearFilter};
use crime_dash_crime_models::CrimeRecord;
use crime_dash_geography_models::RegionCode;

/// Sums the per-thousand violent crime rate of each region.
///
/// Rows outside `year_filter`, rows without a region code, and national
/// total rows are skipped; only states and DC form groups. A row without a rate
/// counts as zero. Groups are returned in canonical [`RegionCode`] order,
/// and rows are summed in input order, so identical input always yields
/// identical output.
#[must_use]
pub fn aggregate(records: &[CrimeRecord], year_filter: YearFilter) -> Vec<RegionAggregate> {
    let mut groups: BTreeMap<RegionCode, (f64, usize)> = BTreeMap::new();

    for record in records.iter().filter(|r| year_filter.matches(r.year)) {
        let Some(region_code) = record.region_code.filter(|code| !code.is_national()) else {
            continue;
        };
        let (sum, count) = groups.entry(region_code).or_insert((0.0, 0));
        *sum += record.vio_crime_per_thousand.unwrap_or(0.0);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(region_code, (sum, count))| RegionAggregate {
            region_code,
            summed_vio_crime_per_thousand: sum,
            record_count: count,
        })
        .collect()
}

/// Distinct years present in `records`, ascending.
#[must_use]
pub fn available_years(records: &[CrimeRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
