//! Interactive dashboard session.
//!
//! Each menu choice is one interaction event: it updates the
//! [`SelectionState`], and the views for the new selection are resolved
//! and printed before the next prompt.

use crime_dash_analytics::resolver::QueryResolver;
use crime_dash_analytics::selection::{InteractionEvent, SelectionState};
use crime_dash_analytics_models::{DashboardView, RegionLookup, YearFilter};
use crime_dash_geography_models::RegionCode;
use dialoguer::Select;

/// Number of map regions listed in the summary.
const TOP_REGIONS: usize = 5;

enum Action {
    SelectRegion,
    SelectYear,
    ShowView,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::SelectRegion,
        Self::SelectYear,
        Self::ShowView,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::SelectRegion => "Select a region",
            Self::SelectYear => "Select a year",
            Self::ShowView => "Show current view",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive session until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails (e.g. no terminal is attached).
pub fn run(resolver: &QueryResolver<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let mut selection = SelectionState::default();
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    print_view(&resolver.resolve(&selection));

    loop {
        let idx = Select::new()
            .with_prompt("Dashboard")
            .items(&labels)
            .default(0)
            .interact()?;

        let event = match Action::ALL[idx] {
            Action::SelectRegion => InteractionEvent::RegionSelected(prompt_region(&selection)?),
            Action::SelectYear => {
                InteractionEvent::YearSelected(prompt_year(resolver, &selection)?)
            }
            Action::ShowView => {
                print_view(&resolver.resolve(&selection));
                continue;
            }
            Action::Quit => return Ok(()),
        };

        if selection.apply(event) {
            print_view(&resolver.resolve(&selection));
        }
    }
}

fn prompt_region(selection: &SelectionState) -> Result<RegionCode, dialoguer::Error> {
    let labels: Vec<String> = RegionCode::ALL
        .iter()
        .map(|code| format!("{code} ({})", code.name()))
        .collect();
    let current = RegionCode::ALL
        .iter()
        .position(|code| *code == selection.selected_region())
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Region")
        .items(&labels)
        .default(current)
        .max_length(15)
        .interact()?;

    Ok(RegionCode::ALL[idx])
}

fn prompt_year(
    resolver: &QueryResolver<'_>,
    selection: &SelectionState,
) -> Result<YearFilter, dialoguer::Error> {
    let options: Vec<YearFilter> = std::iter::once(YearFilter::All)
        .chain(resolver.year_options().into_iter().map(YearFilter::Year))
        .collect();
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let current = options
        .iter()
        .position(|year| *year == selection.selected_year())
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Year")
        .items(&labels)
        .default(current)
        .interact()?;

    Ok(options[idx])
}

fn print_view(view: &DashboardView) {
    let region = view.selection.region_code;
    println!();
    println!(
        "== {} ({region}), year: {} ==",
        region.name(),
        view.selection.year_filter
    );

    let mut ranked: Vec<_> = view.map.iter().collect();
    ranked.sort_by(|a, b| {
        b.summed_vio_crime_per_thousand
            .total_cmp(&a.summed_vio_crime_per_thousand)
    });
    println!("Highest summed violent crime rates per 1,000:");
    for entry in ranked.iter().take(TOP_REGIONS) {
        println!(
            "  {}  {:>10.2}  ({} rows)",
            entry.region_code, entry.summed_vio_crime_per_thousand, entry.record_count
        );
    }

    println!("Localities: {}", view.detail.localities.len());
    for locality in &view.detail.localities {
        let violent = locality
            .violent_crime
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.0}"));
        println!("  {} {}: {violent}", locality.year, locality.locality);
    }

    if let Some(race) = view.race.available() {
        println!("Race composition:");
        for slice in &race.slices {
            let pct = slice
                .percentage
                .map_or_else(|| "n/a".to_string(), |p| format!("{p:.1}%"));
            println!("  {}: {pct}", slice.label);
        }
    } else {
        println!("Race composition: no data for {region}");
    }

    match &view.social {
        RegionLookup::Available(social) => {
            println!("Social indicators (region / national):");
            for indicator in &social.indicators {
                let fmt =
                    |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"));
                println!(
                    "  {}: {} / {}",
                    indicator.label,
                    fmt(indicator.region_value),
                    fmt(indicator.national_value)
                );
            }
        }
        RegionLookup::NoData { .. } => println!("Social indicators: no data for {region}"),
    }
}
