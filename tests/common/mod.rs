#![allow(dead_code)]

use std::sync::Arc;

use geo::{Coord, MultiPolygon, Rect};
use serde_json::{json, Value};
use snapmap::{District, DistrictTable, Party, RegionDirectory};

/// A one-degree square district. The state FIPS picks the column and the
/// district number (last two GEOID digits) picks the row.
pub fn district(geoid: &str, state: (&str, &str), region: &str, division: &str, party: Party, rate: f64, households: u64) -> District {
    let (fips, state_name) = state;
    let x = fips.parse::<f64>().unwrap() * 2.0 - 130.0;
    let y = 30.0 + geoid[2..].parse::<f64>().unwrap();
    let square = Rect::new(Coord { x, y }, Coord { x: x + 1.0, y: y + 1.0 }).to_polygon();

    District {
        geoid: Arc::from(geoid),
        geometry: MultiPolygon(vec![square]),
        state_fips: Arc::from(fips),
        region_code: Arc::from(region),
        division_code: Arc::from(division),
        participation_rate: rate,
        household_count: households,
        party,
        party_sign: party.sign(),
        state_name: Arc::from(state_name),
        district_name: Arc::from(format!("Congressional District {}", geoid[2..].trim_start_matches('0'))),
    }
}

pub const CALIFORNIA: (&str, &str) = ("06", "California");
pub const ALASKA: (&str, &str) = ("02", "Alaska");
pub const HAWAII: (&str, &str) = ("15", "Hawaii");
pub const OHIO: (&str, &str) = ("39", "Ohio");
pub const NEW_YORK: (&str, &str) = ("36", "New York");

pub fn districts() -> Vec<District> {
    vec![
        district("0601", CALIFORNIA, "R4", "D9", Party::Democratic, 0.12, 1000),
        district("0602", CALIFORNIA, "R4", "D9", Party::Republican, 0.22, 500),
        district("0201", ALASKA, "R4", "D9", Party::Republican, 0.09, 300),
        district("1501", HAWAII, "R4", "D9", Party::Democratic, 0.08, 200),
        district("3901", OHIO, "R2", "D3", Party::Republican, 0.31, 4000),
        district("3902", OHIO, "R2", "D3", Party::Republican, 0.40, 2500),
        district("3601", NEW_YORK, "R1", "D2", Party::Democratic, 0.18, 6000),
    ]
}

pub fn table() -> DistrictTable {
    DistrictTable::new(districts()).unwrap()
}

pub const DIRECTORY_CSV: &str = "\
FIPS,STATE_NAME
USA,United States
R1,Northeast Region
R2,Midwest Region
R4,West Region
D2,Middle Atlantic Division
D3,East North Central Division
D9,Pacific Division
02,Alaska
06,California
15,Hawaii
36,New York
39,Ohio
56,Wyoming
";

pub fn directory() -> RegionDirectory {
    RegionDirectory::read_csv_str(DIRECTORY_CSV).unwrap()
}

/// The fixture districts as a GeoJSON FeatureCollection, the way the dataset ships.
pub fn districts_geojson() -> Value {
    let features: Vec<Value> = districts().iter()
        .map(|d| {
            let ring: Vec<[f64; 2]> = d.geometry.0[0].exterior().coords().map(|c| [c.x, c.y]).collect();
            json!({
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [ring] },
                "properties": {
                    "GEOID": &*d.geoid,
                    "STATEFP": &*d.state_fips,
                    "reg_codes": &*d.region_code,
                    "div_codes": &*d.division_code,
                    "hh_snap_pct": d.participation_rate,
                    "hh_snap": d.household_count,
                    "PARTY": d.party.code(),
                    "PARTYNUM": d.party_sign,
                    "state": &*d.state_name,
                    "NAMELSAD": &*d.district_name,
                },
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}
