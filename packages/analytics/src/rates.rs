//! Per-capita rates.
//!
//! Rates are derived once after loading. An unknown input yields an
//! unknown rate: a missing or zero population never produces an infinite
//! or `NaN` value.

use crime_dash_crime_models::CrimeRecord;

/// Rates are expressed per this many residents.
pub const RATE_SCALE: f64 = 1_000.0;

/// `count / population * 1000`, or `None` when either input is unknown,
/// the population is zero, or the result is not finite.
#[must_use]
pub fn per_thousand(count: Option<f64>, population: Option<f64>) -> Option<f64> {
    let count = count?;
    let population = population?;
    if population == 0.0 {
        return None;
    }
    let rate = count / population * RATE_SCALE;
    rate.is_finite().then_some(rate)
}

/// Returns `record` with [`CrimeRecord::vio_crime_per_thousand`] computed
/// from its violent crime count and population.
///
/// The rate depends only on those two fields, so applying this more than
/// once gives the same record.
#[must_use]
pub fn with_violent_rate(mut record: CrimeRecord) -> CrimeRecord {
    set_violent_rate(&mut record);
    record
}

fn set_violent_rate(record: &mut CrimeRecord) {
    record.vio_crime_per_thousand = per_thousand(record.violent_crime, record.population);
}

/// Computes the violent crime rate of every record in place.
pub fn apply_violent_rates(records: &mut [CrimeRecord]) {
    records.iter_mut().for_each(set_violent_rate);
}
