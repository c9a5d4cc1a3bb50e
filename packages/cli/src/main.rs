#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crime statistics dashboard.
//!
//! Loads the three source tables named in the config file once, then
//! either answers a single query as JSON or runs an interactive session
//! in which region and year selections drive the dashboard views.

mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crime_dash_analytics::resolver::QueryResolver;
use crime_dash_analytics::selection::SelectionState;
use crime_dash_analytics_models::YearFilter;
use crime_dash_cli_utils::IndicatifProgress;
use crime_dash_geography_models::RegionCode;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "crime_dash", about = "Crime statistics dashboard queries")]
struct Cli {
    /// Path to the dashboard TOML config
    #[arg(long, global = true, default_value = "dashboard.toml")]
    config: PathBuf,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summed violent crime rate per region (the choropleth series)
    Map {
        /// "All" or a single year
        #[arg(long, default_value = "All")]
        year: YearFilter,
    },
    /// Crime rows and per-locality breakdown for one region
    Region {
        /// Two-letter region code (e.g. "AL", "DC")
        #[arg(value_parser = parse_region)]
        region: RegionCode,
        /// "All" or a single year
        #[arg(long, default_value = "All")]
        year: YearFilter,
    },
    /// Race composition of one region
    Race {
        /// Two-letter region code
        #[arg(value_parser = parse_region)]
        region: RegionCode,
    },
    /// Social indicators of one region next to the national values
    Social {
        /// Two-letter region code
        #[arg(value_parser = parse_region)]
        region: RegionCode,
    },
    /// Every view for a selection
    View {
        /// Two-letter region code (defaults to the first region)
        #[arg(long, value_parser = parse_region)]
        region: Option<RegionCode>,
        /// "All" or a single year
        #[arg(long, default_value = "All")]
        year: YearFilter,
    },
    /// Years available to the year filter
    Years,
    /// Select regions and years interactively
    Interactive,
}

fn parse_region(s: &str) -> Result<RegionCode, String> {
    s.parse::<RegionCode>()
        .map_err(|_| format!("unknown region code {s:?}"))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<(), serde_json::Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_dash_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = crime_dash_source::config::load_config(&cli.config)?;
    let progress = IndicatifProgress::tables_bar(&multi, "Loading tables");
    let dataset = crime_dash_analytics::load_dashboard(&config, &progress)?;
    log::info!("Ready: {} crime records", dataset.crime_records().len());
    let resolver = QueryResolver::new(&dataset);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Map { year } => emit(&resolver.map_data(year), cli.pretty)?,
        Commands::Region { region, year } => {
            emit(&resolver.region_detail(region, year), cli.pretty)?;
        }
        Commands::Race { region } => {
            let race = resolver.race_breakdown(region);
            if race.is_no_data() {
                log::warn!("No race composition data for {region}");
            }
            emit(&race, cli.pretty)?;
        }
        Commands::Social { region } => {
            let social = resolver.social_comparison(region);
            if social.is_no_data() {
                log::warn!("No social indicator data for {region}");
            }
            emit(&social, cli.pretty)?;
        }
        Commands::View { region, year } => {
            let mut selection = SelectionState::default();
            if let Some(region) = region {
                selection.select_region(region);
            }
            selection.select_year(year);
            emit(&resolver.resolve(&selection), cli.pretty)?;
        }
        Commands::Years => emit(&resolver.year_options(), cli.pretty)?,
        Commands::Interactive => interactive::run(&resolver)?,
    }

    Ok(())
}
