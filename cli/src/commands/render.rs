use anyhow::{Context, Result};
use snapmap::{io::write_json, Dashboard, DistrictTable, RegionDirectory};

use crate::cli::{Cli, RenderArgs};

pub fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let viewport = args.viewport();
    tracing::info!(
        districts = %args.districts.display(),
        regions = %args.regions.display(),
        selection = %args.selection,
        viewport = viewport.to_str(),
        "[render] loading inputs"
    );

    let dashboard = Dashboard::new(
        DistrictTable::read_geojson(&args.districts)?,
        RegionDirectory::read_csv(&args.regions)?,
    );
    let figures = dashboard.render(&args.selection, viewport)
        .with_context(|| format!("[render] Failed to render selection {:?}", args.selection))?
        .to_plotly();

    match &args.output {
        Some(path) => write_json(path, &figures, args.pretty, args.force)?,
        None if args.pretty => println!("{}", serde_json::to_string_pretty(&figures)?),
        None => println!("{}", serde_json::to_string(&figures)?),
    }
    Ok(())
}
