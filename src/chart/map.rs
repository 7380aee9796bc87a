use std::sync::Arc;

use geo::Rect;
use serde_json::{json, Value};

use crate::{district::districts_to_geojson, selection::Selection};
use super::{layout::{Colorbar, LayoutParams}, theme::{base_layout, merge, Rgb, PAPER_COLOR, PLOT_COLOR}};

/// Signed rate at which the color scale saturates.
pub const COLOR_LIMIT: f64 = 0.30;

/// Diverging bands from strong Democratic (teal) to strong Republican (red).
/// The two middle bands are both white so that values near zero read as neutral.
pub const DIVERGING_BANDS: [Rgb; 12] = [
    Rgb::new(0x1F, 0x50, 0x5C),
    Rgb::new(0x2A, 0x6B, 0x80),
    Rgb::new(0x38, 0x91, 0xA6),
    Rgb::new(0x76, 0xC6, 0xD6),
    Rgb::new(0xC1, 0xF5, 0xFF),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xFF, 0xC7, 0xC8),
    Rgb::new(0xF0, 0x99, 0x9B),
    Rgb::new(0xDB, 0x54, 0x61),
    Rgb::new(0xAD, 0x30, 0x32),
    Rgb::new(0x96, 0x29, 0x2B),
];

const HOVER_TEMPLATE: &str = "%{text}<br>SNAP HH Participation Rate: %{customdata}%<extra></extra>";

/// Signed rates are snapped to this many steps per unit before banding,
/// so band edges such as -0.25 land in the band they open.
const BAND_RESOLUTION: f64 = 1_000_000.0;

/// Band index for a signed rate; values beyond ±COLOR_LIMIT land in the end bands.
///
/// Bands are closed below and open above. This is the lookup Plotly applies
/// to the flat [`discrete_colorscale`] with `zmin = -COLOR_LIMIT` and
/// `zmax = COLOR_LIMIT`; the figure itself only carries the colorscale.
pub fn band_index(z: f64) -> usize {
    if !z.is_finite() { return DIVERGING_BANDS.len() / 2 }
    let offset = ((z.clamp(-COLOR_LIMIT, COLOR_LIMIT) + COLOR_LIMIT) * BAND_RESOLUTION).round() as usize;
    let span = (2.0 * COLOR_LIMIT * BAND_RESOLUTION).round() as usize;
    (offset * DIVERGING_BANDS.len() / span).min(DIVERGING_BANDS.len() - 1)
}

/// Color a signed rate is drawn with.
#[inline] pub fn band_color(z: f64) -> Rgb { DIVERGING_BANDS[band_index(z)] }

/// Participation rate as a hover percentage with two decimals, halves to even.
pub fn hover_percent(rate: f64) -> f64 {
    ((rate * 100.0 * 100.0).round_ties_even() / 100.0).abs()
}

/// Plotly colorscale: each band as a flat `[start, color], [end, color]` pair.
pub fn discrete_colorscale() -> Vec<(f64, Rgb)> {
    let n = DIVERGING_BANDS.len() as f64;
    DIVERGING_BANDS.iter().enumerate()
        .flat_map(|(i, &color)| [(i as f64 / n, color), ((i + 1) as f64 / n, color)])
        .collect()
}

/// How the map frames the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapViewport {
    /// Fixed national projection.
    National,
    /// Zoomed to the selected geometry.
    Fit(Rect<f64>),
}

/// One shaded district.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub geoid: Arc<str>,
    pub z: f64,        // rate * party sign, unclamped
    pub text: String,  // "{state} {district} ({party})"
    pub rate_pct: f64, // |rate| as a percentage, 2 decimals
}

/// Choropleth of signed participation rates.
#[derive(Debug, Clone)]
pub struct MapChart {
    pub title: String,
    pub points: Vec<MapPoint>,
    pub viewport: MapViewport,
    pub colorbar: Colorbar,
    geojson: Value,
}

/// Build the choropleth for a selection.
pub fn build_map(selection: &Selection, layout: &LayoutParams, region_name: &str) -> MapChart {
    let points = selection.districts().iter()
        .map(|district| MapPoint {
            geoid: district.geoid.clone(),
            z: district.signed_rate(),
            text: district.label(),
            rate_pct: hover_percent(district.participation_rate),
        })
        .collect();

    let viewport = match selection.fit_bounds().then(|| selection.extent()).flatten() {
        Some(extent) => MapViewport::Fit(extent),
        None => MapViewport::National,
    };

    MapChart {
        title: format!("Map of SNAP Participation by Congressional District in {region_name}"),
        points,
        viewport,
        colorbar: layout.colorbar.clone(),
        geojson: districts_to_geojson(selection.districts().iter().copied()),
    }
}

impl MapChart {
    /// Features embedded in the figure, keyed by `properties.GEOID`.
    #[inline] pub fn geojson(&self) -> &Value { &self.geojson }

    /// Plotly figure JSON.
    pub fn to_plotly(&self) -> Value {
        let colorscale: Vec<Value> = discrete_colorscale().into_iter()
            .map(|(stop, color)| json!([stop, color]))
            .collect();

        let trace = json!({
            "type": "choropleth",
            "geojson": self.geojson,
            "featureidkey": "properties.GEOID",
            "locations": self.points.iter().map(|p| &*p.geoid).collect::<Vec<_>>(),
            "z": self.points.iter().map(|p| p.z).collect::<Vec<_>>(),
            "text": self.points.iter().map(|p| p.text.as_str()).collect::<Vec<_>>(),
            "customdata": self.points.iter().map(|p| p.rate_pct).collect::<Vec<_>>(),
            "hovertemplate": HOVER_TEMPLATE,
            "colorscale": colorscale,
            "zmin": -COLOR_LIMIT,
            "zmax": COLOR_LIMIT,
            "colorbar": self.colorbar.to_plotly(),
        });

        let mut geo = json!({
            "bgcolor": PAPER_COLOR,
            "landcolor": PLOT_COLOR,
            "showframe": false,
            "showcoastlines": false,
            "scope": "usa",
            "projection": { "type": "albers usa" },
            "fitbounds": false,
        });
        if let MapViewport::Fit(extent) = self.viewport {
            let center = extent.center();
            geo["fitbounds"] = json!("geojson");
            geo["center"] = json!({ "lon": center.x, "lat": center.y });
        }

        json!({
            "data": [trace],
            "layout": merge(base_layout(&self.title, 24, 50), json!({ "geo": geo })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_and_clamping() {
        assert_eq!(band_index(-0.30), 0);
        assert_eq!(band_index(-0.75), 0);
        assert_eq!(band_index(0.0), 6);
        assert_eq!(band_index(0.30), 11);
        assert_eq!(band_index(0.90), 11);
        assert_eq!(band_color(-0.28), Rgb::new(0x1F, 0x50, 0x5C));
        assert_eq!(band_color(0.01), Rgb::new(0xFF, 0xFF, 0xFF));
        assert_eq!(band_color(-0.01), Rgb::new(0xFF, 0xFF, 0xFF));
        assert_eq!(band_color(0.22), Rgb::new(0xAD, 0x30, 0x32));
        assert_eq!(band_color(f64::NAN), Rgb::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn scale_is_symmetric() {
        for i in 0..DIVERGING_BANDS.len() / 2 {
            let low = band_index(-0.29 + i as f64 * 0.05);
            let high = band_index(0.29 - i as f64 * 0.05);
            assert_eq!(low + high, DIVERGING_BANDS.len() - 1);
        }
    }

    #[test]
    fn band_edges_open_their_band() {
        // -0.25, -0.20, ..., 0.25 built from integer steps like user input would be.
        for step in -5_i32..=5 {
            let z = f64::from(step) * 5.0 / 100.0;
            assert_eq!(band_index(z), (step + 6) as usize, "z={z}");
        }
        for step in 0..DIVERGING_BANDS.len() {
            let z = -0.275 + step as f64 * 0.05;
            assert_eq!(band_index(z), step, "z={z}");
            assert_eq!(band_index(-z) + band_index(z), DIVERGING_BANDS.len() - 1, "z={z}");
        }
    }

    #[test]
    fn colorscale_matches_band_lookup() {
        let scale = discrete_colorscale();
        for (band, pair) in scale.chunks(2).enumerate() {
            let mid = (pair[0].0 + pair[1].0) / 2.0;
            let z = -COLOR_LIMIT + mid * 2.0 * COLOR_LIMIT;
            assert_eq!(band_index(z), band);
            assert_eq!(band_color(z), pair[0].1);
            assert_eq!(pair[0].1, pair[1].1);
        }
    }

    #[test]
    fn hover_percent_rounds_halves_to_even() {
        assert_eq!(hover_percent(0.12), 12.0);
        assert_eq!(hover_percent(-0.1234), 12.34);
        assert_eq!(hover_percent(0.00025), 0.02);
        assert_eq!(hover_percent(0.00045), 0.04);
        assert_eq!(hover_percent(0.00065), 0.06);
    }

    #[test]
    fn colorscale_spans_unit_interval() {
        let scale = discrete_colorscale();
        assert_eq!(scale.len(), 24);
        assert_eq!(scale[0], (0.0, DIVERGING_BANDS[0]));
        assert_eq!(scale[23], (1.0, DIVERGING_BANDS[11]));
        assert!(scale.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
