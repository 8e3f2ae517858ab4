//! Chart configuration built from a measurement set.
//!
//! The types mirror the Plotly figure schema (`{"data": [...], "layout": {...}}`)
//! so a [`ChartSpec`] serializes to the figure a browser renderer expects,
//! while native front ends read the same fields directly.

use serde::Serialize;

use crate::palette::{Palette, Rgb};
use crate::sample::{otu_positions, MeasurementSet, OtuId};

/// Maximum number of slices in the pie chart.
pub const PIE_SLICE_LIMIT: usize = 10;
/// Bubble chart height in pixels.
pub const BUBBLE_HEIGHT: u32 = 600;
/// Bubble chart width in pixels.
pub const BUBBLE_WIDTH: u32 = 1500;

/// Display region a chart is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartTarget {
    Pie,
    Bubble,
}

impl std::fmt::Display for ChartTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartTarget::Pie => write!(f, "Pie Chart"),
            ChartTarget::Bubble => write!(f, "Bubble Chart"),
        }
    }
}

/// A single data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub values: Vec<f64>,
    pub labels: Vec<OtuId>,
    pub hovertext: Vec<String>,
    pub marker: PieMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<OtuId>,
    pub y: Vec<f64>,
    pub mode: String,
    pub text: Vec<String>,
    pub marker: BubbleMarker,
}

/// Marker color follows the OTU id (or its index for text ids), marker size
/// follows the sample value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMarker {
    pub color: Vec<f64>,
    pub size: Vec<f64>,
    pub colorscale: Vec<(f64, Rgb)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

/// Display configuration independent of the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Trace plus layout for one chart region. Rebuilt on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(skip)]
    pub target: ChartTarget,
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    /// The pie trace, if this is a pie chart.
    #[must_use]
    pub fn pie_trace(&self) -> Option<&PieTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Pie(p) => Some(p),
            Trace::Scatter(_) => None,
        })
    }

    /// The scatter trace, if this is a bubble chart.
    #[must_use]
    pub fn scatter_trace(&self) -> Option<&ScatterTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Scatter(s) => Some(s),
            Trace::Pie(_) => None,
        })
    }

    /// Plotly figure JSON (`{"data": [...], "layout": {...}}`).
    #[must_use]
    pub fn to_plotly_json(&self) -> serde_json::Value {
        serde_json::json!({
            "data": self.data,
            "layout": self.layout,
        })
    }
}

/// Both charts for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPair {
    pub pie: ChartSpec,
    pub bubble: ChartSpec,
}

impl ChartPair {
    /// Plotly JSON for both charts keyed by region.
    #[must_use]
    pub fn to_plotly_json(&self) -> serde_json::Value {
        serde_json::json!({
            "pie": self.pie.to_plotly_json(),
            "bubble": self.bubble.to_plotly_json(),
        })
    }
}

/// Pie chart of the first ten entries.
#[must_use]
pub fn pie_chart(set: &MeasurementSet, palette: &Palette) -> ChartSpec {
    let n = set.len().min(PIE_SLICE_LIMIT);
    let trace = PieTrace {
        values: set.values()[..n].to_vec(),
        labels: set.ids()[..n].to_vec(),
        hovertext: set.labels()[..n].to_vec(),
        marker: PieMarker {
            colors: palette.colors().to_vec(),
        },
    };
    ChartSpec {
        target: ChartTarget::Pie,
        data: vec![Trace::Pie(trace)],
        layout: Layout {
            title: Title::new("Pie Chart"),
            xaxis: None,
            showlegend: true,
            height: None,
            width: None,
        },
    }
}

/// Bubble scatter of every entry, untruncated.
#[must_use]
pub fn bubble_chart(set: &MeasurementSet, palette: &Palette) -> ChartSpec {
    let trace = ScatterTrace {
        x: set.ids().to_vec(),
        y: set.values().to_vec(),
        mode: "markers".to_string(),
        text: set.labels().to_vec(),
        marker: BubbleMarker {
            color: otu_positions(set.ids()),
            size: set.values().to_vec(),
            colorscale: palette.colorscale(),
        },
    };
    ChartSpec {
        target: ChartTarget::Bubble,
        data: vec![Trace::Scatter(trace)],
        layout: Layout {
            title: Title::new("Bubble Chart"),
            xaxis: Some(Axis {
                title: Title::new("OTU ID"),
            }),
            showlegend: false,
            height: Some(BUBBLE_HEIGHT),
            width: Some(BUBBLE_WIDTH),
        },
    }
}

/// Build both charts for a measurement set.
#[must_use]
pub fn build_charts(set: &MeasurementSet, palette: &Palette) -> ChartPair {
    ChartPair {
        pie: pie_chart(set, palette),
        bubble: bubble_chart(set, palette),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otu(ids: &[u64]) -> Vec<OtuId> {
        ids.iter().copied().map(OtuId::from).collect()
    }

    fn set(n: u64) -> MeasurementSet {
        let ids: Vec<u64> = (1..=n).collect();
        #[allow(clippy::cast_precision_loss)]
        let values: Vec<f64> = ids.iter().map(|&i| (100 - i) as f64).collect();
        let labels: Vec<String> = ids.iter().map(|i| format!("Bacteria;{i}")).collect();
        MeasurementSet::new(otu(&ids), values, labels).unwrap()
    }

    #[test]
    fn test_two_entry_scenario() {
        let set = MeasurementSet::new(
            otu(&[1, 2]),
            vec![5.0, 9.0],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        let charts = build_charts(&set, &Palette::ocean());

        let pie = charts.pie.pie_trace().unwrap();
        assert_eq!(pie.values, vec![5.0, 9.0]);
        assert_eq!(pie.labels, otu(&[1, 2]));
        assert_eq!(pie.hovertext, vec!["a", "b"]);

        let bubble = charts.bubble.scatter_trace().unwrap();
        assert_eq!(bubble.x, otu(&[1, 2]));
        assert_eq!(bubble.y, vec![5.0, 9.0]);
        assert_eq!(bubble.text, vec!["a", "b"]);
        assert_eq!(bubble.marker.color, vec![1.0, 2.0]);
        assert_eq!(bubble.marker.size, vec![5.0, 9.0]);
    }

    #[test]
    fn test_pie_truncates_to_ten() {
        for n in [0, 3, 10, 11, 80] {
            let spec = pie_chart(&set(n), &Palette::ocean());
            let pie = spec.pie_trace().unwrap();
            let expected = usize::try_from(n).unwrap().min(PIE_SLICE_LIMIT);
            assert_eq!(pie.values.len(), expected);
            assert_eq!(pie.labels.len(), expected);
            assert_eq!(pie.hovertext.len(), expected);
            assert_eq!(pie.marker.colors.len(), 10);
        }
    }

    #[test]
    fn test_bubble_is_not_truncated() {
        let spec = bubble_chart(&set(42), &Palette::ocean());
        let trace = spec.scatter_trace().unwrap();
        assert_eq!(trace.x.len(), 42);
        assert_eq!(trace.y.len(), 42);
        assert_eq!(trace.text.len(), 42);
        assert!(!spec.layout.showlegend);
        assert_eq!(spec.layout.height, Some(600));
        assert_eq!(spec.layout.width, Some(1500));
    }

    #[test]
    fn test_plotly_json_shape() {
        let charts = build_charts(&set(2), &Palette::ocean());
        let pie = charts.pie.to_plotly_json();
        assert_eq!(pie["data"][0]["type"], "pie");
        assert_eq!(pie["data"][0]["marker"]["colors"][0], "#002047");
        assert_eq!(pie["layout"]["title"]["text"], "Pie Chart");
        assert_eq!(pie["layout"]["showlegend"], true);
        assert!(pie["layout"].get("height").is_none());

        let bubble = charts.bubble.to_plotly_json();
        assert_eq!(bubble["data"][0]["type"], "scatter");
        assert_eq!(bubble["data"][0]["mode"], "markers");
        assert_eq!(bubble["data"][0]["marker"]["colorscale"][1][0], 0.1);
        assert_eq!(bubble["data"][0]["marker"]["colorscale"][1][1], "#002047");
        assert_eq!(bubble["layout"]["xaxis"]["title"]["text"], "OTU ID");
        assert_eq!(bubble["layout"]["width"], 1500);
    }

    #[test]
    fn test_text_ids_color_by_index() {
        let set = MeasurementSet::new(
            vec![OtuId::from("OTU9"), OtuId::from("OTU3")],
            vec![4.0, 2.0],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        let bubble = bubble_chart(&set, &Palette::ocean());
        let json = bubble.to_plotly_json();
        assert_eq!(json["data"][0]["x"][0], "OTU9");
        assert_eq!(bubble.scatter_trace().unwrap().marker.color, vec![0.0, 1.0]);
    }
}
