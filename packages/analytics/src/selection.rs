//! Dashboard selection state.
//!
//! The selection is an explicit value owned by whoever drives the
//! dashboard. It changes only through the setters below (or [`apply`],
//! which dispatches an [`InteractionEvent`] to them), and queries read it
//! without mutating it.
//!
//! [`apply`]: SelectionState::apply

use crime_dash_analytics_models::{SelectionSnapshot, YearFilter};
use crime_dash_geography_models::RegionCode;

/// A user interaction that changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// A region was clicked on the map.
    RegionSelected(RegionCode),
    /// The year filter control changed.
    YearSelected(YearFilter),
}

/// The region and year filter currently driving the detail views.
///
/// Defaults to the first canonical region and no year restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    selected_region: RegionCode,
    selected_year: YearFilter,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_region: RegionCode::first(),
            selected_year: YearFilter::All,
        }
    }
}

impl SelectionState {
    #[must_use]
    pub const fn selected_region(&self) -> RegionCode {
        self.selected_region
    }

    #[must_use]
    pub const fn selected_year(&self) -> YearFilter {
        self.selected_year
    }

    /// Selects a region. Returns whether the selection changed.
    pub fn select_region(&mut self, region_code: RegionCode) -> bool {
        if self.selected_region == region_code {
            return false;
        }
        log::debug!("Region selected: {} -> {region_code}", self.selected_region);
        self.selected_region = region_code;
        true
    }

    /// Sets the year filter. Returns whether the selection changed.
    pub fn select_year(&mut self, year_filter: YearFilter) -> bool {
        if self.selected_year == year_filter {
            return false;
        }
        log::debug!("Year filter: {} -> {year_filter}", self.selected_year);
        self.selected_year = year_filter;
        true
    }

    /// Applies an interaction event. Returns whether the selection changed.
    pub fn apply(&mut self, event: InteractionEvent) -> bool {
        match event {
            InteractionEvent::RegionSelected(region_code) => self.select_region(region_code),
            InteractionEvent::YearSelected(year_filter) => self.select_year(year_filter),
        }
    }

    /// A copy of the selection suitable for serializing alongside a view.
    #[must_use]
    pub const fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            region_code: self.selected_region,
            year_filter: self.selected_year,
        }
    }
}
