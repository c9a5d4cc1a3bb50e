#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Loading and normalization of the dashboard source tables.
//!
//! Raw tables (already parsed into cells, see [`schema::RawTable`]) are
//! validated against a declared [`schema::TableSchema`], renamed
//! positionally, coerced into typed records, and joined on canonical
//! region codes. Structural problems are fatal ([`LoadError`]); per-cell
//! and per-row problems are absorbed into `None` values and counted in a
//! [`LoadReport`].

pub mod config;
pub mod csv_table;
pub mod dataset;
pub mod loader;
pub mod parsing;
pub mod progress;
pub mod schema;

use std::sync::Arc;

use crate::config::{ConfigError, DashboardConfig};
use crate::dataset::Dataset;
use crate::progress::ProgressCallback;

/// Where in a raw table a schema mismatch was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLocation {
    Header,
    /// One-based data row index, not counting the header.
    Row(usize),
}

impl std::fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Row(idx) => write!(f, "row {idx}"),
        }
    }
}

/// Errors that abort loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The raw table does not have the declared number of columns.
    #[error(
        "Schema mismatch in {table} table at {location}: expected {expected} columns, found {found}"
    )]
    SchemaMismatch {
        /// Name of the table being loaded.
        table: &'static str,
        /// Header or data row where the mismatch was found.
        location: SchemaLocation,
        /// Declared column count.
        expected: usize,
        /// Actual column count.
        found: usize,
    },

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What to do with crime rows whose region name is not recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedRegionPolicy {
    /// Keep the row with a `None` region code. Aggregations skip it.
    #[default]
    Retain,
    /// Discard the row after loading.
    Drop,
}

/// Options that control per-row handling while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub unmapped_regions: UnmappedRegionPolicy,
}

/// Row-level outcome counts for one loaded table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Table name.
    pub table: &'static str,
    /// Data rows in the raw table.
    pub rows_read: usize,
    /// Rows present in the loaded output.
    pub rows_loaded: usize,
    /// Rows whose region name did not map to a region code.
    pub unmapped_regions: usize,
    /// Rows discarded: unmapped crime rows under
    /// [`UnmappedRegionPolicy::Drop`], unmapped rows of the region-keyed
    /// tables, and crime rows with an unparseable year.
    pub skipped_rows: usize,
    /// Non-blank cells that failed numeric coercion.
    pub invalid_numeric_cells: usize,
    /// Population cells filled from an earlier row.
    pub forward_filled: usize,
    /// Rows ignored because an earlier row already covered their region.
    pub duplicate_regions: usize,
}

impl LoadReport {
    #[must_use]
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    /// Writes the report to the log: a summary at `info`, anomalies at
    /// `warn`.
    pub fn log(&self) {
        log::info!(
            "[{}] Loaded {}/{} rows ({} population values forward-filled)",
            self.table,
            self.rows_loaded,
            self.rows_read,
            self.forward_filled,
        );
        if self.unmapped_regions > 0 {
            log::warn!(
                "[{}] {} rows have an unrecognized region name",
                self.table,
                self.unmapped_regions
            );
        }
        if self.skipped_rows > 0 {
            log::warn!("[{}] {} rows skipped", self.table, self.skipped_rows);
        }
        if self.duplicate_regions > 0 {
            log::warn!(
                "[{}] {} duplicate region rows ignored",
                self.table,
                self.duplicate_regions
            );
        }
        if self.invalid_numeric_cells > 0 {
            log::debug!(
                "[{}] {} non-numeric cells coerced to null",
                self.table,
                self.invalid_numeric_cells
            );
        }
    }
}

/// Reads the three tables named in `config` and normalizes them into a
/// [`Dataset`].
///
/// Derived rates are not computed here; see the analytics crate.
///
/// # Errors
///
/// Returns [`LoadError`] if a file cannot be read or parsed, or if any
/// table does not match its declared schema.
pub fn load_dataset(
    config: &DashboardConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Dataset, LoadError> {
    let delimiter = config.loader.delimiter_byte();
    let options = config.loader.load_options();

    progress.set_total(3);

    progress.set_message(format!("Loading {}", config.tables.crime.display()));
    let raw = csv_table::read_csv_table(&config.tables.crime, delimiter)?;
    let crime = loader::load_crime_records(&raw, &options)?;
    crime.report.log();
    progress.inc(1);

    progress.set_message(format!("Loading {}", config.tables.race.display()));
    let raw = csv_table::read_csv_table(&config.tables.race, delimiter)?;
    let race = loader::load_race_compositions(&raw)?;
    race.report.log();
    progress.inc(1);

    progress.set_message(format!("Loading {}", config.tables.social.display()));
    let raw = csv_table::read_csv_table(&config.tables.social, delimiter)?;
    let social = loader::load_social_indicators(&raw)?;
    social.report.log();
    progress.inc(1);

    progress.finish(format!(
        "Loaded {} crime rows, {} race rows, {} social rows",
        crime.records.len(),
        race.rows.len(),
        social.rows.len()
    ));

    Ok(Dataset::new(crime.records, race.rows, social.rows))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crime_dash_geography_models::RegionCode;

    use super::*;
    use crate::progress::null_progress;

    fn sample_config() -> DashboardConfig {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../dashboard.toml");
        config::load_config(&path).unwrap()
    }

    #[test]
    fn loads_sample_dataset() {
        let dataset = load_dataset(&sample_config(), &null_progress()).unwrap();
        let crime = dataset.crime_records();

        assert_eq!(crime.len(), 12);
        assert_eq!(crime[0].locality, "Abbeville");

        let addison = crime.iter().find(|r| r.locality == "Addison").unwrap();
        assert_eq!(addison.population, Some(4899.0));

        let austin = crime.iter().find(|r| r.locality == "Austin").unwrap();
        assert_eq!(austin.violent_crime, None);
        assert_eq!(austin.arson, None);

        assert!(
            crime
                .iter()
                .any(|r| r.region_code.is_none() && r.region_name == "ATLANTIS")
        );
        assert!(crime.iter().all(|r| r.vio_crime_per_thousand.is_none()));

        assert!(dataset.race_composition(RegionCode::Dc).is_some());
        assert!(dataset.race_composition(RegionCode::Tx).is_none());
        assert!(dataset.social_indicators(RegionCode::Us).is_some());
        assert!(dataset.social_indicators(RegionCode::Dc).is_none());
    }

    #[test]
    fn schema_mismatch_message() {
        let err = LoadError::SchemaMismatch {
            table: "crime",
            location: SchemaLocation::Row(3),
            expected: 17,
            found: 14,
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch in crime table at row 3: expected 17 columns, found 14"
        );
    }
}
