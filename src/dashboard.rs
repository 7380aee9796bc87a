use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::{
    chart::{build_distribution, build_map, build_share, Charts, Viewport},
    district::{DistrictTable, Party},
    region::{RegionCode, RegionDirectory, NATIONAL_CODE},
    selection::Selection,
};

/// Recompute all three charts for a selection code and viewport.
///
/// Fails if `selection_code` does not parse or is not listed in `directory`;
/// an empty selection still yields three (empty) charts.
pub fn render_charts(
    table: &DistrictTable,
    directory: &RegionDirectory,
    selection_code: &str,
    viewport: Viewport,
) -> Result<Charts> {
    let code = RegionCode::parse(selection_code)?;
    let region_name = directory.name(code.as_str())
        .ok_or_else(|| anyhow!("[render_charts] Selection code {selection_code:?} is not in the region directory"))?;

    let layout = viewport.layout();
    let selection = Selection::resolve(table, code);

    let map = build_map(&selection, &layout, region_name);
    let share = build_share(selection.districts().iter().copied(), region_name);
    let distribution = build_distribution(
        selection.party_subset(Party::Democratic),
        selection.party_subset(Party::Republican),
        layout.legend,
    );

    tracing::debug!(
        code = %selection.code(),
        viewport = viewport.to_str(),
        districts = selection.len(),
        republican_share = share.republican_share,
        tick_spacing = distribution.tick_spacing,
        "rendered charts"
    );
    Ok(Charts { map, share, distribution })
}

/// The loaded dataset and region directory, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Arc<DistrictTable>,
    directory: Arc<RegionDirectory>,
}

impl Dashboard {
    pub fn new(table: impl Into<Arc<DistrictTable>>, directory: impl Into<Arc<RegionDirectory>>) -> Self {
        Self { table: table.into(), directory: directory.into() }
    }

    #[inline] pub fn table(&self) -> &DistrictTable { &self.table }

    #[inline] pub fn directory(&self) -> &RegionDirectory { &self.directory }

    /// Charts for a selection code and viewport.
    pub fn render(&self, selection_code: &str, viewport: Viewport) -> Result<Charts> {
        render_charts(&self.table, &self.directory, selection_code, viewport)
    }

    /// Charts for the initial view: the whole country, wide layout.
    pub fn render_default(&self) -> Result<Charts> {
        self.render(NATIONAL_CODE, Viewport::default())
    }
}
