use anyhow::Result;
use snapmap::RegionDirectory;

use crate::cli::{Cli, RegionsArgs};

pub fn run(_cli: &Cli, args: &RegionsArgs) -> Result<()> {
    let directory = RegionDirectory::read_csv(&args.regions)?;

    for entry in directory.entries() {
        let fit = if entry.code.fit_bounds() { "fit" } else { "national" };
        println!("{:<6} {:<9} {:<9} {}", entry.code, entry.code.kind().to_str(), fit, entry.name);
    }
    Ok(())
}
