#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic region types.
//!
//! Every table the dashboard loads is keyed by a US region. Source tables
//! spell regions as free text; [`normalize_region_name`] maps that text to
//! a [`RegionCode`], the only key the rest of the system joins on.

pub mod region;

pub use region::{RegionCode, normalize_region_name};
