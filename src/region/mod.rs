mod code;
mod directory;

pub use code::{RegionCode, RegionKind, NATIONAL_CODE, NON_FITTABLE_STATES};
pub use directory::{RegionDirectory, RegionEntry};
