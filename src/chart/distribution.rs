use serde_json::{json, Value};

use crate::district::{District, Party};
use super::{layout::Legend, theme::{base_layout, merge, party_color, title_font, PLOT_COLOR}};

pub const NUM_BUCKETS: usize = 8;

/// Lower edge of each participation-rate bucket; the last bucket is unbounded.
pub const BUCKET_EDGES: [f64; NUM_BUCKETS] = [0.0, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35];

pub const BUCKET_LABELS: [&str; NUM_BUCKETS] = [
    "0%-5%", "5%-10%", "10%-15%", "15%-20%", "20%-25%", "25%-30%", "30%-35%", "35% & up",
];

const TITLE: &str = "Distribution of (R) and (D) SNAP Participation Rates";
const X_TITLE: &str = "← Lower SNAP Participation    |    Higher SNAP Participation →";
const Y_TITLE: &str = "District Count";

/// Bucket a rate falls in: `[edge_i, edge_i+1)`, with the last bucket open-ended.
/// Rates below zero are clamped into the first bucket.
pub fn bucket_index(rate: f64) -> usize {
    BUCKET_EDGES.iter().rposition(|&edge| rate >= edge).unwrap_or(0)
}

/// Count districts per bucket.
pub fn bucket_counts<'a>(districts: impl IntoIterator<Item = &'a District>) -> [usize; NUM_BUCKETS] {
    let mut counts = [0; NUM_BUCKETS];
    for district in districts {
        counts[bucket_index(district.participation_rate)] += 1;
    }
    counts
}

/// Y-axis tick spacing for the tallest bar.
pub fn tick_spacing(max_count: usize) -> u32 {
    match max_count {
        50.. => 20,
        25.. => 10,
        10.. => 5,
        6.. => 2,
        _ => 1,
    }
}

/// One bar series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub party: Party,
    pub counts: [usize; NUM_BUCKETS],
}

impl Series {
    pub fn name(&self) -> String { format!("({}) Districts", self.party.code()) }

    #[inline] pub fn total(&self) -> usize { self.counts.iter().sum() }
}

/// Side-by-side histogram of participation rates by party.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionChart {
    pub series: [Series; 2], // Republican first, then Democratic
    pub tick_spacing: u32,
    pub legend: Legend,
}

/// Build the histogram from the two party subsets of a selection.
pub fn build_distribution<'a>(
    democratic: impl IntoIterator<Item = &'a District>,
    republican: impl IntoIterator<Item = &'a District>,
    legend: Legend,
) -> DistributionChart {
    let series = [
        Series { party: Party::Republican, counts: bucket_counts(republican) },
        Series { party: Party::Democratic, counts: bucket_counts(democratic) },
    ];
    let max_count = series.iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);

    DistributionChart { tick_spacing: tick_spacing(max_count), series, legend }
}

impl DistributionChart {
    /// Counts for one party.
    pub fn counts(&self, party: Party) -> &[usize; NUM_BUCKETS] {
        let slot = match party {
            Party::Republican => 0,
            Party::Democratic => 1,
        };
        &self.series[slot].counts
    }

    /// Plotly figure JSON.
    pub fn to_plotly(&self) -> Value {
        let traces: Vec<Value> = self.series.iter()
            .map(|series| json!({
                "type": "bar",
                "x": BUCKET_LABELS,
                "y": series.counts,
                "name": series.name(),
                "marker": { "color": party_color(series.party) },
            }))
            .collect();

        let layout = json!({
            "plot_bgcolor": PLOT_COLOR,
            "xaxis": {
                "title": { "text": X_TITLE, "font": title_font(17) },
                "tickformat": ".1%",
            },
            "yaxis": {
                "title": { "text": Y_TITLE, "font": title_font(17) },
                "tickmode": "linear",
                "tick0": 0,
                "dtick": self.tick_spacing,
            },
            "showlegend": self.legend.visible,
            "legend": { "orientation": self.legend.orientation.to_str() },
        });

        json!({
            "data": traces,
            "layout": merge(base_layout(TITLE, 20, 70), layout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::Orientation;

    #[test]
    fn bucket_boundaries_are_closed_open() {
        assert_eq!(bucket_index(0.0), 0);
        assert_eq!(bucket_index(0.0499), 0);
        assert_eq!(bucket_index(0.05), 1);
        assert_eq!(bucket_index(0.12), 2);
        assert_eq!(bucket_index(0.15), 3);
        assert_eq!(bucket_index(0.22), 4);
        assert_eq!(bucket_index(0.3499), 6);
        assert_eq!(bucket_index(0.35), 7);
        assert_eq!(bucket_index(1.0), 7);
    }

    #[test]
    fn tick_spacing_steps() {
        let cases = [(0, 1), (1, 1), (5, 1), (6, 2), (8, 2), (9, 2), (10, 5), (24, 5), (25, 10), (30, 10), (49, 10), (50, 20), (435, 20)];
        for (max, spacing) in cases {
            assert_eq!(tick_spacing(max), spacing, "max={max}");
        }
    }

    #[test]
    fn empty_subsets_render_zero_bars() {
        let legend = Legend { visible: false, orientation: Orientation::Vertical };
        let chart = build_distribution(std::iter::empty(), std::iter::empty(), legend);
        assert_eq!(chart.counts(Party::Democratic), &[0; NUM_BUCKETS]);
        assert_eq!(chart.tick_spacing, 1);

        let fig = chart.to_plotly();
        assert_eq!(fig["data"][0]["name"], "(R) Districts");
        assert_eq!(fig["data"][1]["name"], "(D) Districts");
        assert_eq!(fig["layout"]["showlegend"], false);
        assert_eq!(fig["layout"]["yaxis"]["dtick"], 1);
    }
}
