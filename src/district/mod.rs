mod io;
mod party;
mod table;

pub(crate) use io::districts_to_geojson;
pub use party::Party;
pub use table::{District, DistrictTable};
