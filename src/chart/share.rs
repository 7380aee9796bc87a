use serde_json::{json, Value};

use crate::district::{District, Party};
use super::theme::{base_layout, merge, party_color, Rgb};

/// One donut slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub party: Party,
    pub label: &'static str,
    pub households: u64,
    pub color: Rgb,
}

/// Donut of enrolled households split by the party of their district.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareChart {
    pub title: String,
    pub slices: Vec<Slice>,
    pub republican_share: f64, // percent of households in Republican districts
}

pub fn slice_label(party: Party) -> &'static str {
    match party {
        Party::Democratic => "Democratic Districts",
        Party::Republican => "Republican Districts",
    }
}

/// Percent of `totals` held by Republican districts; 0 when there is nothing to divide.
pub fn republican_share(totals: &[u64; 2]) -> f64 {
    let total: u64 = totals.iter().sum();
    let republican = totals[Party::Republican.index()];
    if total == 0 || republican == 0 { return 0.0 }
    100.0 * republican as f64 / total as f64
}

/// Render a share with one decimal, e.g. "33.3".
pub fn format_share(share: f64) -> String {
    if share.is_finite() { format!("{share:.1}") } else { "0.0".to_string() }
}

/// Build the donut from the selected districts.
pub fn build_share<'a>(districts: impl IntoIterator<Item = &'a District>, region_name: &str) -> ShareChart {
    let mut totals = [0u64; 2];
    let mut present = [false; 2];
    for district in districts {
        totals[district.party.index()] += district.household_count;
        present[district.party.index()] = true;
    }

    let slices = Party::ALL.into_iter()
        .filter(|party| present[party.index()])
        .map(|party| Slice {
            party,
            label: slice_label(party),
            households: totals[party.index()],
            color: party_color(party),
        })
        .collect();

    let republican_share = republican_share(&totals);
    ShareChart {
        title: format!(
            "{}% of {region_name} SNAP<br>Households Live in Red Districts",
            format_share(republican_share)
        ),
        slices,
        republican_share,
    }
}

impl ShareChart {
    /// The title percentage as displayed.
    pub fn share_label(&self) -> String { format_share(self.republican_share) }

    /// Plotly figure JSON.
    pub fn to_plotly(&self) -> Value {
        let trace = json!({
            "type": "pie",
            "labels": self.slices.iter().map(|s| s.label).collect::<Vec<_>>(),
            "values": self.slices.iter().map(|s| s.households).collect::<Vec<_>>(),
            "marker": { "colors": self.slices.iter().map(|s| s.color).collect::<Vec<_>>() },
            "hole": 0.4,
            "sort": false,
            "textinfo": "none",
        });

        json!({
            "data": [trace],
            "layout": merge(base_layout(&self.title, 20, 70), json!({ "showlegend": false })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_of_mixed_selection() {
        assert_eq!(format_share(republican_share(&[1000, 500])), "33.3");
        assert_eq!(format_share(republican_share(&[1, 1])), "50.0");
        assert_eq!(format_share(republican_share(&[0, 42])), "100.0");
    }

    #[test]
    fn share_defaults_to_zero() {
        assert_eq!(republican_share(&[0, 0]), 0.0);
        assert_eq!(format_share(republican_share(&[0, 0])), "0.0");
        assert_eq!(format_share(republican_share(&[1200, 0])), "0.0");
        assert_eq!(format_share(f64::NAN), "0.0");
    }

    #[test]
    fn share_stays_in_range() {
        for totals in [[0, 0], [3, 0], [0, 3], [7, 11], [u32::MAX as u64, 1], [1, u32::MAX as u64]] {
            let share = republican_share(&totals);
            assert!((0.0..=100.0).contains(&share), "{totals:?} -> {share}");
        }
    }

    #[test]
    fn empty_selection_still_renders() {
        let chart = build_share(std::iter::empty(), "Nowhere");
        assert!(chart.slices.is_empty());
        assert_eq!(chart.title, "0.0% of Nowhere SNAP<br>Households Live in Red Districts");
        let fig = chart.to_plotly();
        assert_eq!(fig["data"][0]["values"], json!([]));
        assert_eq!(fig["layout"]["showlegend"], false);
    }
}
