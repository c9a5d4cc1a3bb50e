//! Canonical US region codes.
//!
//! Provides the closed set of region codes the dashboard joins on (the 50
//! states, the District of Columbia, and the national aggregate) plus the
//! mapping from free-text region names to those codes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A canonical two-letter region code.
///
/// Variants are declared in canonical enumeration order: the 50 states
/// alphabetically by full name, then `DC`, then the national aggregate
/// `US`. The derived [`Ord`] follows that order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RegionCode {
    Al,
    Ak,
    Az,
    Ar,
    Ca,
    Co,
    Ct,
    De,
    Fl,
    Ga,
    Hi,
    Id,
    Il,
    In,
    Ia,
    Ks,
    Ky,
    La,
    Me,
    Md,
    Ma,
    Mi,
    Mn,
    Ms,
    Mo,
    Mt,
    Ne,
    Nv,
    Nh,
    Nj,
    Nm,
    Ny,
    Nc,
    Nd,
    Oh,
    Ok,
    Or,
    Pa,
    Ri,
    Sc,
    Sd,
    Tn,
    Tx,
    Ut,
    Vt,
    Va,
    Wa,
    Wv,
    Wi,
    Wy,
    /// District of Columbia
    Dc,
    /// National aggregate
    Us,
}

impl RegionCode {
    /// All region codes in canonical enumeration order.
    pub const ALL: &'static [Self] = &[
        Self::Al,
        Self::Ak,
        Self::Az,
        Self::Ar,
        Self::Ca,
        Self::Co,
        Self::Ct,
        Self::De,
        Self::Fl,
        Self::Ga,
        Self::Hi,
        Self::Id,
        Self::Il,
        Self::In,
        Self::Ia,
        Self::Ks,
        Self::Ky,
        Self::La,
        Self::Me,
        Self::Md,
        Self::Ma,
        Self::Mi,
        Self::Mn,
        Self::Ms,
        Self::Mo,
        Self::Mt,
        Self::Ne,
        Self::Nv,
        Self::Nh,
        Self::Nj,
        Self::Nm,
        Self::Ny,
        Self::Nc,
        Self::Nd,
        Self::Oh,
        Self::Ok,
        Self::Or,
        Self::Pa,
        Self::Ri,
        Self::Sc,
        Self::Sd,
        Self::Tn,
        Self::Tx,
        Self::Ut,
        Self::Vt,
        Self::Va,
        Self::Wa,
        Self::Wv,
        Self::Wi,
        Self::Wy,
        Self::Dc,
        Self::Us,
    ];

    /// The first code in canonical order, used when nothing has been
    /// selected yet.
    #[must_use]
    pub const fn first() -> Self {
        Self::ALL[0]
    }

    /// Whether this is the national aggregate rather than a state or
    /// district.
    #[must_use]
    pub const fn is_national(self) -> bool {
        matches!(self, Self::Us)
    }

    /// Full region name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Al => "Alabama",
            Self::Ak => "Alaska",
            Self::Az => "Arizona",
            Self::Ar => "Arkansas",
            Self::Ca => "California",
            Self::Co => "Colorado",
            Self::Ct => "Connecticut",
            Self::De => "Delaware",
            Self::Fl => "Florida",
            Self::Ga => "Georgia",
            Self::Hi => "Hawaii",
            Self::Id => "Idaho",
            Self::Il => "Illinois",
            Self::In => "Indiana",
            Self::Ia => "Iowa",
            Self::Ks => "Kansas",
            Self::Ky => "Kentucky",
            Self::La => "Louisiana",
            Self::Me => "Maine",
            Self::Md => "Maryland",
            Self::Ma => "Massachusetts",
            Self::Mi => "Michigan",
            Self::Mn => "Minnesota",
            Self::Ms => "Mississippi",
            Self::Mo => "Missouri",
            Self::Mt => "Montana",
            Self::Ne => "Nebraska",
            Self::Nv => "Nevada",
            Self::Nh => "New Hampshire",
            Self::Nj => "New Jersey",
            Self::Nm => "New Mexico",
            Self::Ny => "New York",
            Self::Nc => "North Carolina",
            Self::Nd => "North Dakota",
            Self::Oh => "Ohio",
            Self::Ok => "Oklahoma",
            Self::Or => "Oregon",
            Self::Pa => "Pennsylvania",
            Self::Ri => "Rhode Island",
            Self::Sc => "South Carolina",
            Self::Sd => "South Dakota",
            Self::Tn => "Tennessee",
            Self::Tx => "Texas",
            Self::Ut => "Utah",
            Self::Vt => "Vermont",
            Self::Va => "Virginia",
            Self::Wa => "Washington",
            Self::Wv => "West Virginia",
            Self::Wi => "Wisconsin",
            Self::Wy => "Wyoming",
            Self::Dc => "District of Columbia",
            Self::Us => "United States",
        }
    }
}

/// Maps a free-text region name to its canonical code.
///
/// Matching is case-insensitive and ignores surrounding whitespace, but
/// otherwise exact: abbreviations, typos, and alternate spellings return
/// `None`. Callers must treat `None` as an unjoinable region.
#[must_use]
pub fn normalize_region_name(name: &str) -> Option<RegionCode> {
    let code = match name.trim().to_uppercase().as_str() {
        "ALABAMA" => RegionCode::Al,
        "ALASKA" => RegionCode::Ak,
        "ARIZONA" => RegionCode::Az,
        "ARKANSAS" => RegionCode::Ar,
        "CALIFORNIA" => RegionCode::Ca,
        "COLORADO" => RegionCode::Co,
        "CONNECTICUT" => RegionCode::Ct,
        "DELAWARE" => RegionCode::De,
        "FLORIDA" => RegionCode::Fl,
        "GEORGIA" => RegionCode::Ga,
        "HAWAII" => RegionCode::Hi,
        "IDAHO" => RegionCode::Id,
        "ILLINOIS" => RegionCode::Il,
        "INDIANA" => RegionCode::In,
        "IOWA" => RegionCode::Ia,
        "KANSAS" => RegionCode::Ks,
        "KENTUCKY" => RegionCode::Ky,
        "LOUISIANA" => RegionCode::La,
        "MAINE" => RegionCode::Me,
        "MARYLAND" => RegionCode::Md,
        "MASSACHUSETTS" => RegionCode::Ma,
        "MICHIGAN" => RegionCode::Mi,
        "MINNESOTA" => RegionCode::Mn,
        "MISSISSIPPI" => RegionCode::Ms,
        "MISSOURI" => RegionCode::Mo,
        "MONTANA" => RegionCode::Mt,
        "NEBRASKA" => RegionCode::Ne,
        "NEVADA" => RegionCode::Nv,
        "NEW HAMPSHIRE" => RegionCode::Nh,
        "NEW JERSEY" => RegionCode::Nj,
        "NEW MEXICO" => RegionCode::Nm,
        "NEW YORK" => RegionCode::Ny,
        "NORTH CAROLINA" => RegionCode::Nc,
        "NORTH DAKOTA" => RegionCode::Nd,
        "OHIO" => RegionCode::Oh,
        "OKLAHOMA" => RegionCode::Ok,
        "OREGON" => RegionCode::Or,
        "PENNSYLVANIA" => RegionCode::Pa,
        "RHODE ISLAND" => RegionCode::Ri,
        "SOUTH CAROLINA" => RegionCode::Sc,
        "SOUTH DAKOTA" => RegionCode::Sd,
        "TENNESSEE" => RegionCode::Tn,
        "TEXAS" => RegionCode::Tx,
        "UTAH" => RegionCode::Ut,
        "VERMONT" => RegionCode::Vt,
        "VIRGINIA" => RegionCode::Va,
        "WASHINGTON" => RegionCode::Wa,
        "WEST VIRGINIA" => RegionCode::Wv,
        "WISCONSIN" => RegionCode::Wi,
        "WYOMING" => RegionCode::Wy,
        "DISTRICT OF COLUMBIA" => RegionCode::Dc,
        "UNITED STATES" => RegionCode::Us,
        _ => return None,
    };
    Some(code)
}
