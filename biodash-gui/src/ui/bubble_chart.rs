//! Bubble chart drawn with `egui_plot`.

use eframe::egui;
use egui_plot::{MarkerShape, Plot, Points};

use biodash_core::chart::BubbleMarker;
use biodash_core::{otu_positions, ChartSpec, Rgb};

use super::theme::{chart_color, section_header};
use crate::app::BiodashApp;
use crate::util::f64_to_f32;

impl BiodashApp {
    /// Draw the bubble chart at the size its layout asks for.
    pub(crate) fn render_bubble(&self, ui: &mut egui::Ui, chart: &ChartSpec) {
        let Some(trace) = chart.scatter_trace() else {
            return;
        };
        let layout = &chart.layout;
        let width = layout
            .width
            .map_or(ui.available_width(), |w| f64_to_f32(f64::from(w)));
        let height = layout.height.map_or(400.0, |h| f64_to_f32(f64::from(h)));
        let x_label = layout
            .xaxis
            .as_ref()
            .map(|axis| axis.title.text.clone())
            .unwrap_or_default();
        let colors = bubble_colors(&trace.marker);
        let positions = otu_positions(&trace.x);

        ui.label(section_header(&layout.title.text));
        egui::ScrollArea::horizontal()
            .id_salt("bubble_scroll")
            .show(ui, |ui| {
                Plot::new("bubble")
                    .width(width)
                    .height(height)
                    .x_axis_label(x_label)
                    .label_formatter(|name, value| {
                        if name.is_empty() {
                            format!("{:.0}, {:.0}", value.x, value.y)
                        } else {
                            format!("{name}\n({:.0}, {:.0})", value.x, value.y)
                        }
                    })
                    .show(ui, |plot_ui| {
                        for (i, (&x, &y)) in positions.iter().zip(&trace.y).enumerate() {
                            let size = trace.marker.size.get(i).copied().unwrap_or(y);
                            let mut points = Points::new(vec![[x, y]])
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius((f64_to_f32(size) / 2.0).max(1.0))
                                .color(chart_color(colors[i]).gamma_multiply(0.8));
                            if let Some(text) = trace.text.get(i) {
                                points = points.name(text);
                            }
                            plot_ui.points(points);
                        }
                    });
            });
    }
}

/// Resolve each marker's color through the stepped colorscale, with the
/// color values normalized to the `[0, 1]` range of the scale.
pub(crate) fn bubble_colors(marker: &BubbleMarker) -> Vec<Rgb> {
    let fallback = Rgb::new(0x80, 0x80, 0x80);
    let min = marker.color.iter().copied().fold(f64::INFINITY, f64::min);
    let max = marker.color.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    marker
        .color
        .iter()
        .map(|&c| {
            let t = if span > 0.0 { (c - min) / span } else { 0.0 };
            marker
                .colorscale
                .iter()
                .take_while(|(stop, _)| *stop <= t)
                .last()
                .or_else(|| marker.colorscale.first())
                .map_or(fallback, |(_, color)| *color)
        })
        .collect()
}
