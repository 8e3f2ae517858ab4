//! Main view (central panel) rendering.

use eframe::egui;

use biodash_core::{ChartTarget, Region};

use super::theme::{region_error, section_header, ThemeColors};
use crate::app::BiodashApp;

impl BiodashApp {
    /// Render the central panel with the pie chart above the bubble chart.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    match &self.view.pie {
                        Some(chart) => self.render_pie(ui, chart),
                        None => self.render_missing_chart(ui, ChartTarget::Pie, Region::Pie),
                    }
                    ui.add_space(16.0);
                    ui.separator();
                    match &self.view.bubble {
                        Some(chart) => self.render_bubble(ui, chart),
                        None => {
                            self.render_missing_chart(ui, ChartTarget::Bubble, Region::Bubble);
                        }
                    }
                });
        });
    }

    /// Placeholder for a chart region with nothing to draw.
    fn render_missing_chart(&self, ui: &mut egui::Ui, target: ChartTarget, region: Region) {
        let colors = ThemeColors::from_ui(ui);
        ui.label(section_header(&target.to_string()));
        let loading = self.controller.charts().is_loading();
        ui.allocate_ui(egui::vec2(ui.available_width(), 120.0), |ui| {
            ui.centered_and_justified(|ui| {
                if let Some(message) = self.view.error(region) {
                    ui.label(region_error(message));
                } else if loading {
                    ui.spinner();
                } else {
                    ui.label(egui::RichText::new("No Data").color(colors.text_dim));
                }
            });
        });
    }
}
