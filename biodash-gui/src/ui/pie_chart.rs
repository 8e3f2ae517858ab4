//! Pie chart painted directly with egui shapes.
//!
//! Slices run clockwise from 12 o'clock in trace order. Each slice is split
//! into wedges of at most a quarter turn so every polygon stays convex.

use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke};

use biodash_core::chart::PieTrace;
use biodash_core::ChartSpec;

use super::theme::{chart_color, section_header, ThemeColors};
use crate::app::BiodashApp;
use crate::util::f64_to_f32;

const PIE_RADIUS: f32 = 160.0;
const ARC_SEGMENTS: u32 = 16;
/// Slices smaller than this fraction get no percentage label.
const LABEL_MIN_FRACTION: f64 = 0.04;

impl BiodashApp {
    /// Draw the pie chart and its legend.
    pub(crate) fn render_pie(&self, ui: &mut egui::Ui, chart: &ChartSpec) {
        let Some(trace) = chart.pie_trace() else {
            return;
        };
        let colors = ThemeColors::from_ui(ui);
        let angles = slice_angles(&trace.values);
        let show_percentages = self.ui_state.show_percentages;

        ui.label(section_header(&chart.layout.title.text));
        ui.horizontal_top(|ui| {
            let side = PIE_RADIUS * 2.0 + 16.0;
            let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), Sense::hover());
            let center = rect.center();
            let painter = ui.painter_at(rect);

            for (i, &(start, end)) in angles.iter().enumerate() {
                for shape in wedge_shapes(center, start, end, slice_color(trace, i)) {
                    painter.add(shape);
                }
            }
            let divider = Stroke::new(1.0, colors.bg_panel);
            for &(start, end) in &angles {
                if end > start {
                    painter.line_segment([center, point_on_circle(center, PIE_RADIUS, start)], divider);
                }
            }

            if show_percentages {
                for (i, &(start, end)) in angles.iter().enumerate() {
                    let fraction = (end - start) / TAU;
                    if fraction < LABEL_MIN_FRACTION {
                        continue;
                    }
                    painter.text(
                        point_on_circle(center, PIE_RADIUS * 0.68, (start + end) / 2.0),
                        Align2::CENTER_CENTER,
                        format!("{:.1}%", fraction * 100.0),
                        FontId::proportional(11.0),
                        contrast_text(slice_color(trace, i)),
                    );
                }
            }

            if let Some(pos) = response.hover_pos() {
                let offset = pos - center;
                if offset.length() <= PIE_RADIUS {
                    if let Some(i) = slice_at(&angles, f64::from(offset.x), f64::from(offset.y)) {
                        response.on_hover_text_at_pointer(hover_text(trace, i));
                    }
                }
            }

            if chart.layout.showlegend {
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    for (i, id) in trace.labels.iter().enumerate() {
                        ui.horizontal(|ui| {
                            let (swatch, _) =
                                ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                            ui.painter().rect_filled(swatch, 2.0, slice_color(trace, i));
                            ui.label(egui::RichText::new(id.to_string()).size(11.0));
                        });
                    }
                });
            }
        });
    }
}

fn slice_color(trace: &PieTrace, index: usize) -> Color32 {
    let colors = &trace.marker.colors;
    if colors.is_empty() {
        return Color32::GRAY;
    }
    chart_color(colors[index % colors.len()])
}

/// Black or white, whichever reads better on `fill`.
fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn hover_text(trace: &PieTrace, index: usize) -> String {
    let label = trace.hovertext.get(index).map_or("", String::as_str);
    let id = trace
        .labels
        .get(index)
        .map(ToString::to_string)
        .unwrap_or_default();
    let value = trace.values.get(index).copied().unwrap_or_default();
    format!("{label}\n{id}: {value}")
}

/// Start and end angle of each slice, in radians clockwise from 12 o'clock.
///
/// Non-positive values get an empty slice so indices still line up with the
/// trace.
pub(crate) fn slice_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let mut cursor = 0.0;
    values
        .iter()
        .map(|&v| {
            let start = cursor;
            if total > 0.0 && v > 0.0 {
                cursor += v / total * TAU;
            }
            (start, cursor)
        })
        .collect()
}

/// Slice under a point at offset `(dx, dy)` from the center (screen axes).
pub(crate) fn slice_at(angles: &[(f64, f64)], dx: f64, dy: f64) -> Option<usize> {
    let mut angle = dx.atan2(-dy);
    if angle < 0.0 {
        angle += TAU;
    }
    angles
        .iter()
        .position(|&(start, end)| angle >= start && angle < end)
}

fn point_on_circle(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    let a = f64_to_f32(angle);
    center + egui::vec2(a.sin(), -a.cos()) * radius
}

fn wedge_shapes(center: Pos2, start: f64, end: f64, fill: Color32) -> Vec<Shape> {
    let sweep = end - start;
    if sweep <= 0.0 {
        return Vec::new();
    }
    let parts: u32 = (1..=4)
        .find(|&n| sweep <= FRAC_PI_2 * f64::from(n))
        .unwrap_or(4);
    let step = sweep / f64::from(parts);

    (0..parts)
        .map(|p| {
            let a0 = start + step * f64::from(p);
            let mut points = Vec::with_capacity(ARC_SEGMENTS as usize + 2);
            points.push(center);
            for s in 0..=ARC_SEGMENTS {
                let a = a0 + step * f64::from(s) / f64::from(ARC_SEGMENTS);
                points.push(point_on_circle(center, PIE_RADIUS, a));
            }
            Shape::convex_polygon(points, fill, Stroke::NONE)
        })
        .collect()
}
