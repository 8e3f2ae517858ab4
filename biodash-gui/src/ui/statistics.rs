//! Request statistics block.

use eframe::egui;

use super::theme::{stat_label, stat_value};
use crate::app::BiodashApp;
use crate::util::format_duration;

impl BiodashApp {
    /// Render a single stat row with label on left and value on right.
    fn stat_row(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.horizontal(|ui| {
            ui.label(stat_label(label));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(stat_value(value));
            });
        });
    }

    /// Render the statistics block with two-column layout.
    pub(crate) fn render_statistics(&self, ui: &mut egui::Ui) {
        let stats = &self.statistics;
        let dash = || "-".to_string();

        Self::stat_row(ui, "Samples", &stats.sample_count.to_string());
        Self::stat_row(
            ui,
            "Names",
            &stats.names_duration.map_or_else(dash, format_duration),
        );
        Self::stat_row(ui, "OTUs", &stats.otu_count.to_string());
        Self::stat_row(
            ui,
            "Metadata",
            &stats.metadata_duration.map_or_else(dash, format_duration),
        );
        Self::stat_row(
            ui,
            "Measurements",
            &stats.measurements_duration.map_or_else(dash, format_duration),
        );
        Self::stat_row(
            ui,
            "Last refresh",
            &stats.refresh_latency().map_or_else(dash, format_duration),
        );
        Self::stat_row(ui, "Refreshes", &stats.refreshes.to_string());
        Self::stat_row(ui, "Stale dropped", &stats.stale_discarded.to_string());
        Self::stat_row(ui, "Failures", &stats.failures.to_string());
    }
}
