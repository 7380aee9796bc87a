use std::collections::BTreeMap;

use anyhow::Result;
use snapmap::{DistrictTable, Party};

use crate::cli::{Cli, InspectArgs};

pub fn run(_cli: &Cli, args: &InspectArgs) -> Result<()> {
    let table = DistrictTable::read_geojson(&args.districts)?;

    println!("Number of districts: {}", table.len());
    for party in Party::ALL {
        let (count, households) = table.districts().iter()
            .filter(|d| d.party == party)
            .fold((0usize, 0u64), |(n, hh), d| (n + 1, hh + d.household_count));
        println!("  - ({}) districts: {count}, SNAP households: {households}", party.code());
    }

    let mut per_state: BTreeMap<&str, usize> = BTreeMap::new();
    for district in table.districts() {
        *per_state.entry(&district.state_fips).or_default() += 1;
    }
    println!("States: {}", per_state.len());
    for (fips, count) in per_state {
        println!("  - {fips}: {count}");
    }
    Ok(())
}
