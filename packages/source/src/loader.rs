//! Table loaders.
//!
//! Each loader validates a [`RawTable`] against its schema, renames and
//! drops columns positionally, coerces cells, and normalizes region names.
//! The crime loader additionally forward-fills missing populations.

use std::collections::BTreeMap;

use crime_dash_crime_models::{
    CrimeRecord, CrimeType, RaceCategory, RaceComposition, SocialIndicators,
};
use crime_dash_geography_models::{RegionCode, normalize_region_name};

use crate::parsing::{coerce_numeric, is_blank, parse_year};
use crate::schema::{
    COL_AGGRAVATED_ASSAULT, COL_ARSON, COL_ASIAN, COL_BLACK, COL_BURGLARY, COL_CITY,
    COL_EDUCATION_RATE, COL_HISPANIC, COL_LARCENY_THEFT, COL_MEDIAN_INCOME,
    COL_MOTOR_VEHICLE_THEFT, COL_MURDER, COL_NATIVE_AMERICAN, COL_OTHER, COL_PACIFIC_ISLANDER,
    COL_POPULATION, COL_POVERTY_RATE, COL_PROPERTY_CRIME, COL_RAPE, COL_ROBBERY, COL_STATE,
    COL_TWO_OR_MORE_RACES, COL_UNEMPLOYMENT_RATE, COL_VIOLENT_CRIME, COL_WHITE, COL_YEAR,
    CRIME_SCHEMA, ProjectedRow, RACE_SCHEMA, RawTable, SOCIAL_SCHEMA,
};
use crate::{LoadError, LoadOptions, LoadReport, UnmappedRegionPolicy};

/// Loaded crime rows, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeTable {
    pub records: Vec<CrimeRecord>,
    pub report: LoadReport,
}

/// Loaded rows of a table keyed by region, at most one row per region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable<T> {
    pub rows: BTreeMap<RegionCode, T>,
    pub report: LoadReport,
}

/// Source column of each crime count.
const fn crime_column(crime_type: CrimeType) -> &'static str {
    match crime_type {
        CrimeType::ViolentCrime => COL_VIOLENT_CRIME,
        CrimeType::Murder => COL_MURDER,
        CrimeType::Rape => COL_RAPE,
        CrimeType::Robbery => COL_ROBBERY,
        CrimeType::AggravatedAssault => COL_AGGRAVATED_ASSAULT,
        CrimeType::PropertyCrime => COL_PROPERTY_CRIME,
        CrimeType::Burglary => COL_BURGLARY,
        CrimeType::LarcenyTheft => COL_LARCENY_THEFT,
        CrimeType::MotorVehicleTheft => COL_MOTOR_VEHICLE_THEFT,
        CrimeType::Arson => COL_ARSON,
    }
}

/// Source column of each race category.
const fn race_column(category: RaceCategory) -> &'static str {
    match category {
        RaceCategory::White => COL_WHITE,
        RaceCategory::Black => COL_BLACK,
        RaceCategory::Hispanic => COL_HISPANIC,
        RaceCategory::Asian => COL_ASIAN,
        RaceCategory::NativeAmerican => COL_NATIVE_AMERICAN,
        RaceCategory::PacificIslander => COL_PACIFIC_ISLANDER,
        RaceCategory::TwoOrMoreRaces => COL_TWO_OR_MORE_RACES,
        RaceCategory::Other => COL_OTHER,
    }
}

/// Coerces a named cell, counting non-blank cells that fail coercion.
fn numeric_cell(row: &ProjectedRow<'_>, column: &str, report: &mut LoadReport) -> Option<f64> {
    let cell = row.cell(column);
    let value = coerce_numeric(cell);
    if value.is_none() && !is_blank(cell) {
        report.invalid_numeric_cells += 1;
    }
    value
}

/// Loads the crime table.
///
/// Rows keep their source order. Rows with an unrecognized region name are
/// kept with a `None` region code unless `options` asks for them to be
/// dropped; rows whose year is not an integer are skipped. Missing
/// populations are forward-filled over every raw row before any row is
/// skipped or dropped, so the fill sees the table in source order.
///
/// # Errors
///
/// Returns [`LoadError::SchemaMismatch`] if the table does not have the
/// declared crime layout.
pub fn load_crime_records(
    table: &RawTable,
    options: &LoadOptions,
) -> Result<CrimeTable, LoadError> {
    CRIME_SCHEMA.validate(table)?;

    let mut report = LoadReport::new(CRIME_SCHEMA.name);
    report.rows_read = table.rows.len();

    let rows: Vec<ProjectedRow<'_>> = table
        .rows
        .iter()
        .map(|r| CRIME_SCHEMA.project(r))
        .collect();

    let mut populations: Vec<Option<f64>> = rows
        .iter()
        .map(|row| numeric_cell(row, COL_POPULATION, &mut report))
        .collect();
    report.forward_filled = forward_fill_population(&mut populations);

    let mut records = Vec::with_capacity(rows.len());

    for (idx, (row, population)) in rows.iter().zip(populations).enumerate() {
        let Some(year) = parse_year(row.cell(COL_YEAR)) else {
            log::warn!(
                "[{}] Skipping row {}: year {:?} is not an integer",
                CRIME_SCHEMA.name,
                idx + 1,
                row.cell(COL_YEAR)
            );
            report.skipped_rows += 1;
            continue;
        };

        let region_name = row.cell(COL_STATE);
        let region_code = normalize_region_name(region_name);
        if region_code.is_none() {
            log::debug!(
                "[{}] Row {}: unrecognized region {region_name:?}",
                CRIME_SCHEMA.name,
                idx + 1
            );
            report.unmapped_regions += 1;
        }

        let mut record =
            CrimeRecord::new(region_code, region_name, row.cell(COL_CITY).trim(), year);
        record.population = population;
        for crime_type in CrimeType::all() {
            let value = numeric_cell(row, crime_column(*crime_type), &mut report);
            record.set_count(*crime_type, value);
        }

        records.push(record);
    }

    if options.unmapped_regions == UnmappedRegionPolicy::Drop {
        let before = records.len();
        records.retain(|r| r.region_code.is_some());
        report.skipped_rows += before - records.len();
    }

    report.rows_loaded = records.len();

    Ok(CrimeTable { records, report })
}

/// Replaces each `None` population with the most recent non-`None`
/// population earlier in the slice. Leading `None`s stay `None`.
///
/// Meaningful only when populations are in source row order.
///
/// Returns the number of populations filled.
pub fn forward_fill_population(populations: &mut [Option<f64>]) -> usize {
    let mut last = None;
    let mut filled = 0;

    for population in populations {
        match population {
            Some(value) => last = Some(*value),
            None => {
                if last.is_some() {
                    *population = last;
                    filled += 1;
                }
            }
        }
    }

    filled
}

/// Resolves the region of a region-keyed row, or records why it was
/// skipped.
fn region_key(
    row: &ProjectedRow<'_>,
    idx: usize,
    table: &'static str,
    seen: &BTreeMap<RegionCode, impl Sized>,
    report: &mut LoadReport,
) -> Option<RegionCode> {
    let name = row.cell(COL_STATE);

    let Some(code) = normalize_region_name(name) else {
        log::warn!("[{table}] Skipping row {}: unrecognized region {name:?}", idx + 1);
        report.unmapped_regions += 1;
        report.skipped_rows += 1;
        return None;
    };

    if seen.contains_key(&code) {
        log::warn!(
            "[{table}] Ignoring row {}: region {code} already loaded",
            idx + 1
        );
        report.duplicate_regions += 1;
        return None;
    }

    Some(code)
}

/// Loads the race composition table. The first row for a region wins.
///
/// # Errors
///
/// Returns [`LoadError::SchemaMismatch`] if the table does not have the
/// declared race layout.
pub fn load_race_compositions(table: &RawTable) -> Result<RegionTable<RaceComposition>, LoadError> {
    RACE_SCHEMA.validate(table)?;

    let mut report = LoadReport::new(RACE_SCHEMA.name);
    report.rows_read = table.rows.len();

    let mut rows = BTreeMap::new();

    for (idx, raw_row) in table.rows.iter().enumerate() {
        let row = RACE_SCHEMA.project(raw_row);
        let Some(region_code) = region_key(&row, idx, RACE_SCHEMA.name, &rows, &mut report) else {
            continue;
        };

        let percentages = RaceCategory::all()
            .iter()
            .map(|category| {
                (
                    *category,
                    numeric_cell(&row, race_column(*category), &mut report),
                )
            })
            .collect();

        rows.insert(
            region_code,
            RaceComposition {
                region_code,
                percentages,
            },
        );
    }

    report.rows_loaded = rows.len();

    Ok(RegionTable { rows, report })
}

/// Loads the social indicator table, including its national row. The
/// first row for a region wins.
///
/// # Errors
///
/// Returns [`LoadError::SchemaMismatch`] if the table does not have the
/// declared social indicator layout.
pub fn load_social_indicators(
    table: &RawTable,
) -> Result<RegionTable<SocialIndicators>, LoadError> {
    SOCIAL_SCHEMA.validate(table)?;

    let mut report = LoadReport::new(SOCIAL_SCHEMA.name);
    report.rows_read = table.rows.len();

    let mut rows = BTreeMap::new();

    for (idx, raw_row) in table.rows.iter().enumerate() {
        let row = SOCIAL_SCHEMA.project(raw_row);
        let Some(region_code) = region_key(&row, idx, SOCIAL_SCHEMA.name, &rows, &mut report)
        else {
            continue;
        };

        let indicators = SocialIndicators {
            region_code,
            unemployment_rate: numeric_cell(&row, COL_UNEMPLOYMENT_RATE, &mut report),
            education_rate: numeric_cell(&row, COL_EDUCATION_RATE, &mut report),
            median_income: numeric_cell(&row, COL_MEDIAN_INCOME, &mut report),
            poverty_rate: numeric_cell(&row, COL_POVERTY_RATE, &mut report),
        };

        rows.insert(region_code, indicators);
    }

    if !rows.contains_key(&RegionCode::Us) {
        log::warn!(
            "[{}] No national row; comparisons will have no national values",
            SOCIAL_SCHEMA.name
        );
    }

    report.rows_loaded = rows.len();

    Ok(RegionTable { rows, report })
}
