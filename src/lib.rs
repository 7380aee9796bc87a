#![doc = "SNAP district explorer public API"]
mod chart;
mod dashboard;
mod district;
mod region;
mod selection;

pub mod io;

#[doc(inline)]
pub use chart::*;

#[doc(inline)]
pub use dashboard::{render_charts, Dashboard};

#[doc(inline)]
pub use district::{District, DistrictTable, Party};

#[doc(inline)]
pub use region::{RegionCode, RegionDirectory, RegionEntry, RegionKind, NATIONAL_CODE, NON_FITTABLE_STATES};

#[doc(inline)]
pub use selection::Selection;
