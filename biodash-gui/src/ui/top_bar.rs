//! Top bar: sample selector, palette selector, export and status.

use eframe::egui;
use rfd::FileDialog;

use biodash_core::{Palette, SampleId, BUILTIN_PALETTES};

use super::theme::{accent, form_label, primary_button, ThemeColors};
use crate::app::BiodashApp;

impl BiodashApp {
    /// Render the top panel.
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_header)
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                ui.set_min_height(36.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("BIODASH")
                            .size(14.0)
                            .strong()
                            .color(accent::BLUE),
                    );
                    ui.separator();
                    self.render_sample_selector(ui);
                    ui.separator();
                    self.render_palette_selector(ui);
                    ui.separator();
                    self.render_actions(ui);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let status = self
                            .ui_state
                            .export_status
                            .clone()
                            .unwrap_or_else(|| self.status_text());
                        ui.label(egui::RichText::new(status).color(colors.text_muted));
                        if self.names_pending || self.controller.is_loading() {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// The selection control: one option per sample, in names-list order.
    fn render_sample_selector(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Sample"));
        let current = self.view.selected.clone();
        let mut chosen: Option<SampleId> = None;

        ui.add_enabled_ui(!self.view.options.is_empty(), |ui| {
            egui::ComboBox::from_id_salt("sample_select")
                .selected_text(current.as_ref().map_or("-", SampleId::as_str))
                .width(140.0)
                .show_ui(ui, |ui| {
                    for option in &self.view.options {
                        let is_selected = current.as_ref() == Some(option);
                        if ui.selectable_label(is_selected, option.as_str()).clicked()
                            && !is_selected
                        {
                            chosen = Some(option.clone());
                        }
                    }
                });
        });

        if let Some(sample) = chosen {
            self.option_changed(sample);
        }
    }

    fn render_palette_selector(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Palette"));
        let current = self.controller.palette().clone();
        let mut chosen: Option<Palette> = None;

        egui::ComboBox::from_id_salt("palette_select")
            .selected_text(current.name())
            .width(90.0)
            .show_ui(ui, |ui| {
                for name in BUILTIN_PALETTES {
                    let is_selected = current.name() == name;
                    if ui.selectable_label(is_selected, name).clicked() && !is_selected {
                        chosen = Palette::builtin(name);
                    }
                }
            });

        if let Some(palette) = chosen {
            self.set_palette(palette);
        }

        ui.checkbox(&mut self.ui_state.show_percentages, "Pie %")
            .on_hover_text("Label pie slices with their share");
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let has_charts = self.controller.charts().content.is_some();
        if ui
            .add_enabled(has_charts, primary_button("Export"))
            .on_hover_text("Save both figures as Plotly JSON")
            .clicked()
        {
            let file_name = format!(
                "biodash-{}.json",
                self.controller.selected().map_or("figures", SampleId::as_str)
            );
            if let Some(path) = FileDialog::new()
                .add_filter("JSON", &["json"])
                .set_file_name(file_name)
                .save_file()
            {
                self.ui_state.export_status = Some(match self.export_figures(&path) {
                    Ok(()) => format!("Exported {}", path.display()),
                    Err(e) => {
                        log::warn!("export failed: {e:#}");
                        format!("Export failed: {e:#}")
                    }
                });
            }
        }

        let busy = self.names_pending || self.controller.is_loading();
        if ui.add_enabled(!busy, egui::Button::new("Reload")).clicked() {
            self.ui_state.export_status = None;
            if self.view.options.is_empty() {
                self.load_names();
            } else {
                self.reload();
            }
        }
    }
}
