use std::str::FromStr;

use anyhow::{bail, Result};
use serde_json::{json, Value};

use super::theme::title_font;

/// Default width (px) separating narrow and wide layouts.
pub const DEFAULT_BREAKPOINT_PX: u32 = 1200;

/// Signed participation rates marked on the map colorbar.
pub const TICK_VALUES: [f64; 7] = [-0.30, -0.20, -0.10, 0.0, 0.10, 0.20, 0.30];

const COLORBAR_TITLE: &str = "SNAP Participation Rate";

/// Viewport width classification reported by the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Viewport {
    Narrow,
    #[default]
    Wide,
}

impl Viewport {
    /// Classify a viewport width: narrow strictly below the breakpoint.
    pub fn from_width(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px < breakpoint_px { Viewport::Narrow } else { Viewport::Wide }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Viewport::Narrow => "narrow",
            Viewport::Wide => "wide",
        }
    }

    /// Presentation parameters for this viewport.
    pub fn layout(&self) -> LayoutParams {
        match self {
            Viewport::Narrow => LayoutParams {
                viewport: *self,
                colorbar: Colorbar { orientation: Orientation::Horizontal, x: None, y: Some(-0.125), title_on_top: true },
                legend: Legend { visible: false, orientation: Orientation::Vertical },
            },
            Viewport::Wide => LayoutParams {
                viewport: *self,
                colorbar: Colorbar { orientation: Orientation::Vertical, x: Some(-0.125), y: None, title_on_top: false },
                legend: Legend { visible: true, orientation: Orientation::Vertical },
            },
        }
    }
}

impl FromStr for Viewport {
    type Err = anyhow::Error;

    /// Accepts `narrow`/`wide` and the breakpoint names `sm`/`lg`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" | "sm" => Ok(Viewport::Narrow),
            "wide" | "lg" => Ok(Viewport::Wide),
            other => bail!("[Viewport::from_str] Unknown viewport {other:?}, expected \"narrow\" or \"wide\""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Plotly orientation flag.
    pub fn to_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        }
    }
}

/// Map colorbar placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub orientation: Orientation,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub title_on_top: bool,
}

impl Colorbar {
    pub fn tick_values(&self) -> &'static [f64] { &TICK_VALUES }

    pub fn tick_labels(&self) -> Vec<String> {
        TICK_VALUES.iter().map(|&value| tick_label(value)).collect()
    }

    pub(crate) fn to_plotly(&self) -> Value {
        let mut title = json!({ "text": COLORBAR_TITLE, "font": title_font(20) });
        if self.title_on_top {
            title["side"] = json!("top");
        }

        let mut colorbar = json!({
            "title": title,
            "orientation": self.orientation.to_str(),
            "tickvals": self.tick_values(),
            "ticktext": self.tick_labels(),
        });
        if let Some(x) = self.x { colorbar["x"] = json!(x) }
        if let Some(y) = self.y { colorbar["y"] = json!(y) }
        colorbar
    }
}

/// Histogram legend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legend {
    pub visible: bool,
    pub orientation: Orientation,
}

/// Everything the chart builders need to know about the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub viewport: Viewport,
    pub colorbar: Colorbar,
    pub legend: Legend,
}

/// Label a signed rate as a whole percentage with its party suffix: 0.3 -> "30% (R)".
pub fn tick_label(value: f64) -> String {
    let pct = (value.abs() * 100.0).round() as i64;
    if pct == 0 {
        "0%".to_string()
    } else if value < 0.0 {
        format!("{pct}% (D)")
    } else {
        format!("{pct}% (R)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 7] = ["30% (D)", "20% (D)", "10% (D)", "0%", "10% (R)", "20% (R)", "30% (R)"];

    #[test]
    fn breakpoint_classification() {
        assert_eq!(Viewport::from_width(0, DEFAULT_BREAKPOINT_PX), Viewport::Narrow);
        assert_eq!(Viewport::from_width(1199, DEFAULT_BREAKPOINT_PX), Viewport::Narrow);
        assert_eq!(Viewport::from_width(1200, DEFAULT_BREAKPOINT_PX), Viewport::Wide);
        assert_eq!(Viewport::from_width(2560, DEFAULT_BREAKPOINT_PX), Viewport::Wide);
        assert_eq!(Viewport::default(), Viewport::Wide);
    }

    #[test]
    fn parses_names() {
        assert_eq!("narrow".parse::<Viewport>().unwrap(), Viewport::Narrow);
        assert_eq!("LG".parse::<Viewport>().unwrap(), Viewport::Wide);
        assert!("medium".parse::<Viewport>().is_err());
    }

    #[test]
    fn narrow_layout() {
        let params = Viewport::Narrow.layout();
        assert_eq!(params.colorbar.orientation, Orientation::Horizontal);
        assert_eq!(params.colorbar.y, Some(-0.125));
        assert!(params.colorbar.title_on_top);
        assert!(!params.legend.visible);

        let json = params.colorbar.to_plotly();
        assert_eq!(json["orientation"], "h");
        assert_eq!(json["title"]["side"], "top");
        assert!(json.get("x").is_none());
    }

    #[test]
    fn wide_layout() {
        let params = Viewport::Wide.layout();
        assert_eq!(params.colorbar.orientation, Orientation::Vertical);
        assert_eq!(params.colorbar.x, Some(-0.125));
        assert!(params.legend.visible);
        assert_eq!(params.legend.orientation, Orientation::Vertical);

        let json = params.colorbar.to_plotly();
        assert_eq!(json["orientation"], "v");
        assert!(json["title"].get("side").is_none());
    }

    #[test]
    fn both_layouts_share_ticks() {
        for viewport in [Viewport::Narrow, Viewport::Wide] {
            let colorbar = viewport.layout().colorbar;
            assert_eq!(colorbar.tick_values(), &TICK_VALUES);
            assert_eq!(colorbar.tick_labels(), LABELS);
        }
    }
}
