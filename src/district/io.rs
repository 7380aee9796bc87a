use std::sync::Arc;

use anyhow::{anyhow, bail, ensure, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{party::Party, table::District};

/// Feature properties expected on every district.
#[derive(Debug, Deserialize)]
struct DistrictProperties {
    #[serde(rename = "GEOID")]
    geoid: String,
    #[serde(rename = "STATEFP")]
    state_fips: String,
    #[serde(rename = "reg_codes")]
    region_code: String,
    #[serde(rename = "div_codes")]
    division_code: String,
    hh_snap_pct: f64,
    hh_snap: f64,
    #[serde(rename = "PARTY")]
    party: String,
    #[serde(rename = "PARTYNUM", default)]
    party_num: Option<f64>,
    state: String,
    #[serde(rename = "NAMELSAD")]
    district_name: String,
}

/// Read district records from GeoJSON FeatureCollection bytes.
pub(crate) fn read_districts_geojson(bytes: &[u8]) -> Result<Vec<District>> {
    let value: Value = serde_json::from_slice(bytes).context("[district::io] Failed to parse GeoJSON bytes")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[district::io] GeoJSON has no \"features\" array"))?;

    features.iter().enumerate()
        .map(|(idx, feature)| parse_feature(feature).with_context(|| format!("[district::io] Invalid feature {idx}")))
        .collect()
}

fn parse_feature(feature: &Value) -> Result<District> {
    let props = DistrictProperties::deserialize(&feature["properties"])
        .context("missing or malformed properties")?;
    let geometry = parse_geometry(&feature["geometry"])
        .with_context(|| format!("bad geometry for district {}", props.geoid))?;

    let party = Party::from_code(&props.party)?;
    let party_sign = match props.party_num {
        None => party.sign(),
        Some(n) if n == 1.0 => 1,
        Some(n) if n == -1.0 => -1,
        Some(n) => bail!("PARTYNUM {n} for district {} must be 1 or -1", props.geoid),
    };

    ensure!(
        props.hh_snap.is_finite() && props.hh_snap >= 0.0 && props.hh_snap.fract() == 0.0,
        "hh_snap {} for district {} is not a non-negative integer", props.hh_snap, props.geoid
    );

    Ok(District {
        geoid: Arc::from(props.geoid),
        geometry,
        state_fips: Arc::from(props.state_fips),
        region_code: Arc::from(props.region_code),
        division_code: Arc::from(props.division_code),
        participation_rate: props.hh_snap_pct,
        household_count: props.hh_snap as u64,
        party,
        party_sign,
        state_name: Arc::from(props.state),
        district_name: Arc::from(props.district_name),
    })
}

/// Parse a GeoJSON `Polygon` or `MultiPolygon` geometry object.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coords = geometry["coordinates"].as_array()
        .ok_or_else(|| anyhow!("geometry has no coordinates"))?;

    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
        Some("MultiPolygon") => coords.iter()
            .map(|polygon| {
                let rings = polygon.as_array().ok_or_else(|| anyhow!("polygon is not an array"))?;
                parse_polygon_coords(rings)
            })
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon),
        other => bail!("unsupported geometry type {other:?}"),
    }
}

/// Parse polygon rings: the first is the exterior, the rest are holes.
/// `Polygon::new` closes any ring left open.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()
        .ok_or_else(|| anyhow!("polygon has no exterior ring"))?;

    let exterior = parse_ring_coords(exterior)?;
    let interiors = interiors.iter()
        .map(parse_ring_coords)
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring of `[x, y]` positions.
fn parse_ring_coords(ring: &Value) -> Result<LineString<f64>> {
    let positions = ring.as_array().ok_or_else(|| anyhow!("ring is not an array"))?;

    positions.iter()
        .map(|position| {
            let x = position[0].as_f64().ok_or_else(|| anyhow!("invalid coordinate: x must be a number"))?;
            let y = position[1].as_f64().ok_or_else(|| anyhow!("invalid coordinate: y must be a number"))?;
            Ok(Coord { x, y })
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

/// Convert a MultiPolygon to a GeoJSON geometry value.
pub(crate) fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<Vec<Vec<[f64; 2]>>> = mp.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        })
        .collect();

    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

/// Build a FeatureCollection keyed by `properties.GEOID`.
pub(crate) fn districts_to_geojson<'a>(districts: impl IntoIterator<Item = &'a District>) -> Value {
    let features: Vec<Value> = districts.into_iter()
        .map(|district| json!({
            "type": "Feature",
            "id": &*district.geoid,
            "geometry": multipolygon_to_geojson(&district.geometry),
            "properties": { "GEOID": &*district.geoid },
        }))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
