use std::path::PathBuf;

/// SNAP district explorer CLI
#[derive(clap::Parser, Debug)]
#[command(name = "snapmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render the map, donut and histogram for one selection as Plotly JSON
    Render(RenderArgs),

    /// List the selectable regions
    Regions(RegionsArgs),

    /// Summarize a district dataset
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum ViewportArg { Narrow, Wide }

impl From<ViewportArg> for snapmap::Viewport {
    fn from(arg: ViewportArg) -> Self {
        match arg {
            ViewportArg::Narrow => snapmap::Viewport::Narrow,
            ViewportArg::Wide => snapmap::Viewport::Wide,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// District GeoJSON (FeatureCollection with SNAP and party properties)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub districts: PathBuf,

    /// Region directory CSV (FIPS,STATE_NAME)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub regions: PathBuf,

    /// Region code: USA, a census region (R…), division (D…) or state FIPS
    #[arg(short, long, default_value = snapmap::NATIONAL_CODE)]
    pub selection: String,

    /// Layout mode, defaults to wide
    #[arg(long, value_enum, conflicts_with = "width")]
    pub viewport: Option<ViewportArg>,

    /// Viewport width in pixels, classified against --breakpoint
    #[arg(long)]
    pub width: Option<u32>,

    /// Width (px) below which the narrow layout is used
    #[arg(long, default_value_t = snapmap::DEFAULT_BREAKPOINT_PX)]
    pub breakpoint: u32,

    /// Output file, prints to stdout when omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

impl RenderArgs {
    /// Viewport from --viewport, else --width, else the default.
    pub fn viewport(&self) -> snapmap::Viewport {
        match (self.viewport, self.width) {
            (Some(viewport), _) => viewport.into(),
            (None, Some(width)) => snapmap::Viewport::from_width(width, self.breakpoint),
            (None, None) => snapmap::Viewport::default(),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RegionsArgs {
    /// Region directory CSV (FIPS,STATE_NAME)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub regions: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// District GeoJSON
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub districts: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn render_defaults() {
        let cli = Cli::parse_from(["snapmap", "render", "d.geojson", "fips.csv"]);
        let Commands::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.selection, "USA");
        assert_eq!(args.viewport(), snapmap::Viewport::Wide);
        assert!(args.output.is_none());
    }

    #[test]
    fn width_is_classified() {
        let cli = Cli::parse_from(["snapmap", "-v", "render", "d.geojson", "fips.csv", "--width", "800", "-s", "06"]);
        assert_eq!(cli.verbose, 1);
        let Commands::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.selection, "06");
        assert_eq!(args.viewport(), snapmap::Viewport::Narrow);
    }

    #[test]
    fn viewport_and_width_conflict() {
        let result = Cli::try_parse_from(["snapmap", "render", "d", "r", "--viewport", "wide", "--width", "800"]);
        assert!(result.is_err());
    }
}
