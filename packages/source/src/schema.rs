//! Declared layouts of the three source tables.
//!
//! Each source table has a fixed column order. A [`TableSchema`] names
//! every position, so a raw table is renamed positionally and then read by
//! canonical column name. A raw table whose width differs from its schema
//! is rejected before any row is read.

use crate::{LoadError, SchemaLocation};

/// How the loader treats a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free-text region name, normalized to a region code.
    Region,
    /// Free text kept as-is.
    Text,
    /// Integer (years).
    Integer,
    /// Number coerced to `f64`, `None` when not numeric.
    Numeric,
    /// Extraneous column discarded after renaming.
    Dropped,
}

/// A single column position in a [`TableSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Canonical column name.
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// A parsed but otherwise untouched tabular source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header cells as they appeared in the source. Only their count is
    /// significant; names are replaced positionally.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from borrowed cells. Mostly useful in tests.
    #[must_use]
    pub fn from_cells(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }
}

/// Fixed positional layout of a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name used in log and error messages.
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSchema {
    /// Number of columns the raw source must have.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// Checks that the header row and every data row have exactly
    /// [`Self::width`] cells.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SchemaMismatch`] for the first offending row.
    pub fn validate(&self, table: &RawTable) -> Result<(), LoadError> {
        let expected = self.width();

        if table.headers.len() != expected {
            return Err(LoadError::SchemaMismatch {
                table: self.name,
                location: SchemaLocation::Header,
                expected,
                found: table.headers.len(),
            });
        }

        if let Some((idx, row)) = table
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(LoadError::SchemaMismatch {
                table: self.name,
                location: SchemaLocation::Row(idx + 1),
                expected,
                found: row.len(),
            });
        }

        Ok(())
    }

    /// Renames a validated row positionally and drops [`ColumnKind::Dropped`]
    /// columns.
    #[must_use]
    pub fn project<'a>(&self, row: &'a [String]) -> ProjectedRow<'a> {
        let cells = self
            .columns
            .iter()
            .zip(row)
            .filter(|(spec, _)| spec.kind != ColumnKind::Dropped)
            .map(|(spec, cell)| (spec.name, cell.as_str()))
            .collect();

        ProjectedRow { cells }
    }
}

/// A row addressed by canonical column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow<'a> {
    cells: Vec<(&'static str, &'a str)>,
}

impl<'a> ProjectedRow<'a> {
    /// Returns the cell for a canonical column, or `None` if the column is
    /// not part of the projection.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, cell)| *cell)
    }

    /// Returns the cell for a canonical column, treating an absent column
    /// as an empty cell.
    #[must_use]
    pub fn cell(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }
}

// ── Crime table ──────────────────────────────────────────────────────────

pub const COL_STATE: &str = "state";
pub const COL_CITY: &str = "city";
pub const COL_YEAR: &str = "year";
pub const COL_POPULATION: &str = "population";
pub const COL_VIOLENT_CRIME: &str = "violent_crime";
pub const COL_MURDER: &str = "murder";
pub const COL_RAPE: &str = "rape";
pub const COL_ROBBERY: &str = "robbery";
pub const COL_AGGRAVATED_ASSAULT: &str = "aggravated_assault";
pub const COL_PROPERTY_CRIME: &str = "property_crime";
pub const COL_BURGLARY: &str = "burglary";
pub const COL_LARCENY_THEFT: &str = "larceny_theft";
pub const COL_MOTOR_VEHICLE_THEFT: &str = "motor_vehicle_theft";
pub const COL_ARSON: &str = "arson";

/// Crime counts by state, city, and year. The source export carries three
/// trailing unnamed columns which are dropped.
pub const CRIME_SCHEMA: TableSchema = TableSchema {
    name: "crime",
    columns: &[
        ColumnSpec::new(COL_STATE, ColumnKind::Region),
        ColumnSpec::new(COL_CITY, ColumnKind::Text),
        ColumnSpec::new(COL_YEAR, ColumnKind::Integer),
        ColumnSpec::new(COL_POPULATION, ColumnKind::Numeric),
        ColumnSpec::new(COL_VIOLENT_CRIME, ColumnKind::Numeric),
        ColumnSpec::new(COL_MURDER, ColumnKind::Numeric),
        ColumnSpec::new(COL_RAPE, ColumnKind::Numeric),
        ColumnSpec::new(COL_ROBBERY, ColumnKind::Numeric),
        ColumnSpec::new(COL_AGGRAVATED_ASSAULT, ColumnKind::Numeric),
        ColumnSpec::new(COL_PROPERTY_CRIME, ColumnKind::Numeric),
        ColumnSpec::new(COL_BURGLARY, ColumnKind::Numeric),
        ColumnSpec::new(COL_LARCENY_THEFT, ColumnKind::Numeric),
        ColumnSpec::new(COL_MOTOR_VEHICLE_THEFT, ColumnKind::Numeric),
        ColumnSpec::new(COL_ARSON, ColumnKind::Numeric),
        ColumnSpec::new("unnamed_14", ColumnKind::Dropped),
        ColumnSpec::new("unnamed_15", ColumnKind::Dropped),
        ColumnSpec::new("unnamed_16", ColumnKind::Dropped),
    ],
};

// ── Race composition table ───────────────────────────────────────────────

pub const COL_WHITE: &str = "white";
pub const COL_BLACK: &str = "black";
pub const COL_HISPANIC: &str = "hispanic";
pub const COL_ASIAN: &str = "asian";
pub const COL_NATIVE_AMERICAN: &str = "native_american";
pub const COL_PACIFIC_ISLANDER: &str = "pacific_islander";
pub const COL_TWO_OR_MORE_RACES: &str = "two_or_more_races";
pub const COL_OTHER: &str = "other";

/// Population share (percent) by race category, one row per state.
pub const RACE_SCHEMA: TableSchema = TableSchema {
    name: "race",
    columns: &[
        ColumnSpec::new(COL_STATE, ColumnKind::Region),
        ColumnSpec::new(COL_WHITE, ColumnKind::Numeric),
        ColumnSpec::new(COL_BLACK, ColumnKind::Numeric),
        ColumnSpec::new(COL_HISPANIC, ColumnKind::Numeric),
        ColumnSpec::new(COL_ASIAN, ColumnKind::Numeric),
        ColumnSpec::new(COL_NATIVE_AMERICAN, ColumnKind::Numeric),
        ColumnSpec::new(COL_PACIFIC_ISLANDER, ColumnKind::Numeric),
        ColumnSpec::new(COL_TWO_OR_MORE_RACES, ColumnKind::Numeric),
        ColumnSpec::new(COL_OTHER, ColumnKind::Numeric),
    ],
};

// ── Social indicator table ───────────────────────────────────────────────

pub const COL_UNEMPLOYMENT_RATE: &str = "unemployment_rate";
pub const COL_EDUCATION_RATE: &str = "education_rate";
pub const COL_MEDIAN_INCOME: &str = "median_income";
pub const COL_POVERTY_RATE: &str = "poverty_rate";

/// Socio-economic indicators, one row per state plus a national row.
pub const SOCIAL_SCHEMA: TableSchema = TableSchema {
    name: "social",
    columns: &[
        ColumnSpec::new(COL_STATE, ColumnKind::Region),
        ColumnSpec::new(COL_UNEMPLOYMENT_RATE, ColumnKind::Numeric),
        ColumnSpec::new(COL_EDUCATION_RATE, ColumnKind::Numeric),
        ColumnSpec::new(COL_MEDIAN_INCOME, ColumnKind::Numeric),
        ColumnSpec::new(COL_POVERTY_RATE, ColumnKind::Numeric),
    ],
};
