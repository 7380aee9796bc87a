use std::{fmt, sync::Arc};

use anyhow::{bail, Result};

use crate::district::District;

/// Sentinel code meaning "the whole country, no filter".
pub const NATIONAL_CODE: &str = "USA";

/// States that render poorly when the map is zoomed to their extent.
/// (fips, name)
pub const NON_FITTABLE_STATES: [(&str, &str); 2] = [
    ("02", "Alaska"),
    ("15", "Hawaii"),
];

/// Which ancestry column a region code is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    National,
    Region,
    Division,
    State,
}

impl RegionKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            RegionKind::National => "national",
            RegionKind::Region => "region",
            RegionKind::Division => "division",
            RegionKind::State => "state",
        }
    }
}

/// A parsed geographic selection.
/// Codes live in disjoint namespaces: `USA`, `R…` census regions,
/// `D…` census divisions, and bare 2-digit state FIPS codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionCode {
    National,
    Region(Arc<str>),
    Division(Arc<str>),
    State(Arc<str>),
}

impl RegionCode {
    /// Parse a selection code, failing on anything outside the known namespaces.
    pub fn parse(code: &str) -> Result<Self> {
        if code == NATIONAL_CODE { return Ok(RegionCode::National) }

        let mut chars = code.chars();
        match chars.next() {
            Some('R') if !chars.as_str().is_empty() => Ok(RegionCode::Region(Arc::from(code))),
            Some('D') if !chars.as_str().is_empty() => Ok(RegionCode::Division(Arc::from(code))),
            _ if code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(RegionCode::State(Arc::from(code)))
            }
            _ => bail!("[RegionCode::parse] Unrecognized selection code {code:?}"),
        }
    }

    /// The code as it appears in the region directory.
    pub fn as_str(&self) -> &str {
        match self {
            RegionCode::National => NATIONAL_CODE,
            RegionCode::Region(code) | RegionCode::Division(code) | RegionCode::State(code) => code,
        }
    }

    pub fn kind(&self) -> RegionKind {
        match self {
            RegionCode::National => RegionKind::National,
            RegionCode::Region(_) => RegionKind::Region,
            RegionCode::Division(_) => RegionKind::Division,
            RegionCode::State(_) => RegionKind::State,
        }
    }

    /// Whether `district` falls inside this selection.
    pub fn matches(&self, district: &District) -> bool {
        match self {
            RegionCode::National => true,
            RegionCode::Region(code) => *district.region_code == **code,
            RegionCode::Division(code) => *district.division_code == **code,
            RegionCode::State(fips) => *district.state_fips == **fips,
        }
    }

    /// Whether the map should zoom to the selected geometry.
    pub fn fit_bounds(&self) -> bool {
        match self {
            RegionCode::National => false,
            RegionCode::Region(_) | RegionCode::Division(_) => true,
            RegionCode::State(fips) => !NON_FITTABLE_STATES.iter().any(|(code, _)| **fips == **code),
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
