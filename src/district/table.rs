use std::{path::Path, sync::Arc};

use ahash::AHashMap;
use anyhow::{ensure, Context, Result};
use geo::MultiPolygon;

use super::{io::read_districts_geojson, party::Party};

/// One congressional district, already joined with its SNAP and election data.
#[derive(Debug, Clone)]
pub struct District {
    pub geoid: Arc<str>,
    pub geometry: MultiPolygon<f64>,
    pub state_fips: Arc<str>,
    pub region_code: Arc<str>,
    pub division_code: Arc<str>,
    pub participation_rate: f64, // fraction of households enrolled, in [0, 1]
    pub household_count: u64,    // enrolled households
    pub party: Party,
    pub party_sign: i8,
    pub state_name: Arc<str>,
    pub district_name: Arc<str>,
}

impl District {
    /// Participation rate signed by party lean (D negative, R positive).
    #[inline] pub fn signed_rate(&self) -> f64 { self.participation_rate * f64::from(self.party_sign) }

    /// Hover label, e.g. "Ohio Congressional District 3 (R)".
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.state_name, self.district_name, self.party.code())
    }
}

/// The immutable district dataset, loaded once per process.
#[derive(Debug, Default)]
pub struct DistrictTable {
    districts: Vec<District>,
    index: AHashMap<Arc<str>, u32>, // geoid -> row
}

impl DistrictTable {
    /// Build a table from records, rejecting duplicate ids and malformed values.
    pub fn new(districts: Vec<District>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(districts.len());
        for (row, district) in districts.iter().enumerate() {
            ensure!(
                district.participation_rate.is_finite() && (0.0..=1.0).contains(&district.participation_rate),
                "[DistrictTable::new] District {} has participation rate {} outside [0, 1]",
                district.geoid, district.participation_rate
            );
            ensure!(
                district.party_sign == district.party.sign(),
                "[DistrictTable::new] District {} has party sign {} inconsistent with party {}",
                district.geoid, district.party_sign, district.party.code()
            );
            ensure!(
                index.insert(district.geoid.clone(), row as u32).is_none(),
                "[DistrictTable::new] Duplicate district id {}", district.geoid
            );
        }
        Ok(Self { districts, index })
    }

    /// Load districts from a GeoJSON FeatureCollection on disk.
    pub fn read_geojson(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[DistrictTable::read_geojson] Failed to read {}", path.display()))?;
        let table = Self::from_geojson_bytes(&bytes)
            .with_context(|| format!("[DistrictTable::read_geojson] Invalid district file {}", path.display()))?;
        tracing::info!(districts = table.len(), path = %path.display(), "loaded district table");
        Ok(table)
    }

    /// Load districts from GeoJSON bytes.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(read_districts_geojson(bytes)?)
    }

    #[inline] pub fn len(&self) -> usize { self.districts.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.districts.is_empty() }

    #[inline] pub fn districts(&self) -> &[District] { &self.districts }

    /// Look up a district by its GEOID.
    pub fn get(&self, geoid: &str) -> Option<&District> {
        self.index.get(geoid).map(|&row| &self.districts[row as usize])
    }
}
