//! Left sidebar: sample metadata and request statistics.

use eframe::egui;

use biodash_core::Region;

use super::theme::{region_error, section_header, ThemeColors};
use crate::app::BiodashApp;

impl BiodashApp {
    /// Render the side panel with the metadata list.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::SidePanel::left("metadata_panel")
            .resizable(true)
            .default_width(240.0)
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_panel)
                    .inner_margin(egui::Margin::same(12.0)),
            )
            .show(ctx, |ui| {
                ui.label(section_header("Sample Metadata"));
                ui.add_space(6.0);
                self.render_metadata_lines(ui, colors);

                ui.add_space(16.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(section_header("Requests"));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.checkbox(&mut self.ui_state.show_statistics, "");
                    });
                });
                if self.ui_state.show_statistics {
                    self.render_statistics(ui);
                }
            });
    }

    fn render_metadata_lines(&self, ui: &mut egui::Ui, colors: ThemeColors) {
        if let Some(message) = self.view.error(Region::Selector) {
            ui.label(region_error(message));
            return;
        }
        if let Some(message) = self.view.error(Region::Metadata) {
            ui.label(region_error(message));
            return;
        }
        if self.view.metadata.is_empty() {
            let text = if self.controller.metadata().is_loading() {
                "Loading..."
            } else {
                "No metadata"
            };
            ui.label(egui::RichText::new(text).size(11.0).color(colors.text_dim));
            return;
        }
        for line in &self.view.metadata {
            ui.label(egui::RichText::new(line).size(12.0).strong());
        }
    }
}
