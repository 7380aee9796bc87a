use geo::{BoundingRect, Coord, Rect};

use crate::{district::{District, DistrictTable, Party}, region::RegionCode};

/// Districts matching a region code, borrowed from the shared table.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    code: RegionCode,
    districts: Vec<&'a District>,
}

impl<'a> Selection<'a> {
    /// Apply the region predicate to every district in `table`.
    pub fn resolve(table: &'a DistrictTable, code: RegionCode) -> Self {
        let districts: Vec<&District> = table.districts().iter()
            .filter(|district| code.matches(district))
            .collect();

        tracing::debug!(code = %code, selected = districts.len(), total = table.len(), "resolved selection");
        Self { code, districts }
    }

    #[inline] pub fn code(&self) -> &RegionCode { &self.code }

    /// Every selected district, in table order.
    #[inline] pub fn districts(&self) -> &[&'a District] { &self.districts }

    #[inline] pub fn len(&self) -> usize { self.districts.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.districts.is_empty() }

    /// Selected districts won by `party`.
    pub fn party_subset(&self, party: Party) -> Vec<&'a District> {
        self.districts.iter().copied()
            .filter(|district| district.party == party)
            .collect()
    }

    /// Whether the map should zoom to this selection.
    #[inline] pub fn fit_bounds(&self) -> bool { self.code.fit_bounds() }

    /// Bounding rectangle of all selected geometry, `None` if nothing has extent.
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.districts.iter()
            .filter_map(|district| district.geometry.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }
}
