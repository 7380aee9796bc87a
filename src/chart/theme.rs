//! Shared colors, fonts, and figure chrome.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::district::Party;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #RRGGBB
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const TEXT_COLOR: Rgb = Rgb::new(0x4C, 0x5B, 0x5C);
pub const PAPER_COLOR: Rgb = Rgb::new(0xF5, 0xF5, 0xF0);
pub const PLOT_COLOR: Rgb = Rgb::new(0xEB, 0xEB, 0xE8); // also land fill on the map

pub const DEMOCRATIC_COLOR: Rgb = Rgb::new(0x38, 0x91, 0xA6);
pub const REPUBLICAN_COLOR: Rgb = Rgb::new(0xDB, 0x54, 0x61);

pub const TITLE_FONT: &str = "EB Garamond";

/// Fixed party color, shared by the donut and histogram.
pub fn party_color(party: Party) -> Rgb {
    match party {
        Party::Democratic => DEMOCRATIC_COLOR,
        Party::Republican => REPUBLICAN_COLOR,
    }
}

/// `{ family, size }` font object in the title face.
pub(crate) fn title_font(size: u32) -> Value {
    json!({ "family": TITLE_FONT, "size": size })
}

/// Layout keys every figure shares: font color, centered title, paper color, margins.
pub(crate) fn base_layout(title: &str, title_size: u32, top_margin: u32) -> Value {
    json!({
        "font": { "color": TEXT_COLOR },
        "title": {
            "text": title,
            "x": 0.5,
            "xanchor": "center",
            "font": title_font(title_size),
        },
        "paper_bgcolor": PAPER_COLOR,
        "margin": { "l": 20, "r": 20, "t": top_margin, "b": 20 },
        "autosize": true,
    })
}

/// Shallow-merge `extra` into the object `base`.
pub(crate) fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_hex() {
        assert_eq!(DEMOCRATIC_COLOR.to_string(), "#3891A6");
        assert_eq!(Rgb::new(0, 10, 255).to_string(), "#000AFF");
        assert_eq!(json!(REPUBLICAN_COLOR), json!("#DB5461"));
    }

    #[test]
    fn merge_overrides_keys() {
        let merged = merge(json!({ "a": 1, "b": 2 }), json!({ "b": 3, "c": 4 }));
        assert_eq!(merged, json!({ "a": 1, "b": 3, "c": 4 }));
    }
}
