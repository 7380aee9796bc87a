//! Chart specifications derived from a selection.
//!
//! Each builder is a pure function of the selected districts and the layout
//! parameters; `to_plotly` turns the typed spec into Plotly figure JSON.

mod distribution;
mod layout;
mod map;
mod share;
mod theme;

use serde_json::{json, Value};

pub use distribution::{
    bucket_counts, bucket_index, build_distribution, tick_spacing, DistributionChart, Series,
    BUCKET_EDGES, BUCKET_LABELS, NUM_BUCKETS,
};
pub use layout::{tick_label, Colorbar, LayoutParams, Legend, Orientation, Viewport, DEFAULT_BREAKPOINT_PX, TICK_VALUES};
pub use map::{band_color, band_index, build_map, discrete_colorscale, hover_percent, MapChart, MapPoint, MapViewport, COLOR_LIMIT, DIVERGING_BANDS};
pub use share::{build_share, format_share, republican_share, slice_label, ShareChart, Slice};
pub use theme::{party_color, Rgb, DEMOCRATIC_COLOR, REPUBLICAN_COLOR};

/// The three linked charts for one selection and viewport.
#[derive(Debug, Clone)]
pub struct Charts {
    pub map: MapChart,
    pub share: ShareChart,
    pub distribution: DistributionChart,
}

impl Charts {
    /// `{ "map": …, "share": …, "distribution": … }` as Plotly figures.
    pub fn to_plotly(&self) -> Value {
        json!({
            "map": self.map.to_plotly(),
            "share": self.share.to_plotly(),
            "distribution": self.distribution.to_plotly(),
        })
    }
}
