//! Main application state and logic.
//!
//! Contains the `BiodashApp` struct which owns the view controller, the
//! rendered view, and the channel that background fetch workers report on.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use eframe::egui;

use biodash_core::{Palette, RefreshToken, SampleId, SampleSource, Status, ViewController};

use crate::message::AppMessage;
use crate::pipeline::{fetch_measurements_worker, fetch_metadata_worker, load_names_worker};
use crate::state::{DashboardView, Statistics, UiState};

/// Main application state.
pub struct BiodashApp {
    /// Where samples come from (HTTP endpoints or a fixture directory).
    pub(crate) source: Arc<dyn SampleSource>,
    /// Human-readable description of `source`.
    pub(crate) source_label: String,

    /// Selection state and refresh sequencing.
    pub(crate) controller: ViewController,
    /// What is on screen.
    pub(crate) view: DashboardView,

    /// Whether the names request is still in flight.
    pub(crate) names_pending: bool,
    /// Request counters and timings.
    pub(crate) statistics: Statistics,
    /// UI display state.
    pub(crate) ui_state: UiState,

    /// Message receiver for async operations.
    pub(crate) rx: Receiver<AppMessage>,
    /// Message sender for async operations.
    pub(crate) tx: Sender<AppMessage>,
}

impl BiodashApp {
    /// Create the app and start loading the names list.
    pub fn new(source: Arc<dyn SampleSource>, source_label: String, palette: Palette) -> Self {
        let (tx, rx) = channel();
        let mut app = Self {
            source,
            source_label,
            controller: ViewController::new(palette),
            view: DashboardView::default(),
            names_pending: false,
            statistics: Statistics::default(),
            ui_state: UiState::default(),
            rx,
            tx,
        };
        app.load_names();
        app
    }

    /// Request the names list in the background.
    pub fn load_names(&mut self) {
        self.names_pending = true;
        self.statistics.clear();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        log::info!("loading sample names from {}", self.source_label);
        thread::spawn(move || load_names_worker(source.as_ref(), &tx));
    }

    /// Selection-change handler.
    pub fn option_changed(&mut self, sample: SampleId) {
        if self.controller.selected() == Some(&sample) {
            return;
        }
        self.ui_state.export_status = None;
        let token = self.controller.select(sample);
        self.view.selected = Some(token.sample().clone());
        self.spawn_refresh(token);
    }

    /// Switch chart palette and redraw the current sample.
    pub fn set_palette(&mut self, palette: Palette) {
        if let Some(token) = self.controller.set_palette(palette) {
            self.spawn_refresh(token);
        }
    }

    /// Reload the selected sample.
    pub fn reload(&mut self) {
        if let Some(token) = self.controller.refresh_selected() {
            self.spawn_refresh(token);
        }
    }

    /// Issue one metadata and one measurement request for `token`.
    fn spawn_refresh(&mut self, token: RefreshToken) {
        self.statistics.refreshes += 1;
        log::info!(
            "refreshing sample {} (#{})",
            token.sample(),
            token.generation()
        );

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let metadata_token = token.clone();
        thread::spawn(move || fetch_metadata_worker(source.as_ref(), metadata_token, &tx));

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || fetch_measurements_worker(source.as_ref(), token, &tx));
    }

    /// Write the current figures as Plotly JSON.
    pub fn export_figures(&self, path: &Path) -> Result<()> {
        let charts = self
            .controller
            .charts()
            .content
            .as_ref()
            .context("no charts to export")?;
        let json = serde_json::to_string_pretty(&charts.to_plotly_json())
            .context("serializing figures")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("exported figures to {}", path.display());
        Ok(())
    }

    /// Short status line for the top bar.
    pub fn status_text(&self) -> String {
        if self.names_pending {
            return format!("Loading samples from {}...", self.source_label);
        }
        match self.controller.status() {
            Status::Failed(e) => format!("Failed to load samples: {e}"),
            Status::Empty => "No samples available".to_string(),
            Status::Starting => "Starting...".to_string(),
            Status::Ready if self.controller.is_loading() => {
                let sample = self.controller.selected().map_or("", SampleId::as_str);
                format!("Loading {sample}...")
            }
            Status::Ready => format!("{} samples • {}", self.statistics.sample_count, self.source_label),
        }
    }

    /// Handle pending messages from async workers.
    pub fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::NamesLoaded(result, dur) => {
                    self.names_pending = false;
                    self.statistics.names_duration = Some(dur);
                    if let Ok(names) = &result {
                        self.statistics.sample_count = names.len();
                    } else {
                        self.statistics.failures += 1;
                    }
                    let token = self.controller.initialize(result);
                    self.controller.present_options(&mut self.view);
                    if let Some(token) = token {
                        self.spawn_refresh(token);
                    }
                }
                AppMessage::MetadataLoaded(token, result, dur) => {
                    let failed = result.is_err();
                    if self.controller.accept_metadata(&token, result) {
                        self.statistics.metadata_duration = Some(dur);
                        self.statistics.failures += u64::from(failed);
                        self.controller.present_metadata(&mut self.view);
                    } else {
                        self.statistics.stale_discarded += 1;
                    }
                }
                AppMessage::MeasurementsLoaded(token, result, dur) => {
                    let failed = result.is_err();
                    let otu_count = result.as_ref().map_or(0, biodash_core::MeasurementSet::len);
                    if self.controller.accept_measurements(&token, result) {
                        self.statistics.measurements_duration = Some(dur);
                        self.statistics.otu_count = otu_count;
                        self.statistics.failures += u64::from(failed);
                        self.controller.present_charts(&mut self.view);
                    } else {
                        self.statistics.stale_discarded += 1;
                    }
                }
            }
        }
    }
}

impl eframe::App for BiodashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        crate::ui::theme::apply_system_theme(ctx);
        self.handle_messages();
        self.render_top_panel(ctx);
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);

        if self.names_pending || self.controller.is_loading() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use biodash_core::{Error, MeasurementSet, MetadataRecord, OtuId, Region, Result};

    use super::*;

    struct SlowSource;

    impl SampleSource for SlowSource {
        fn names(&self) -> Result<Vec<SampleId>> {
            Ok(vec!["S1".into(), "S2".into()])
        }

        fn metadata(&self, sample: &SampleId) -> Result<MetadataRecord> {
            // S1 answers late so it races a later selection.
            if sample.as_str() == "S1" {
                thread::sleep(Duration::from_millis(150));
            }
            MetadataRecord::from_json(&format!(r#"{{"sample": "{sample}"}}"#))
        }

        fn measurements(&self, sample: &SampleId) -> Result<MeasurementSet> {
            if sample.as_str() == "S2" {
                return Err(Error::Status {
                    url: format!("/samples/{sample}"),
                    code: 500,
                });
            }
            MeasurementSet::new(
                vec![OtuId::from(1u64), OtuId::from(2u64)],
                vec![5.0, 9.0],
                vec!["a".into(), "b".into()],
            )
        }
    }

    fn pump_until(app: &mut BiodashApp, done: impl Fn(&BiodashApp) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) {
            assert!(Instant::now() < deadline, "timed out waiting for workers");
            app.handle_messages();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_slow_stale_response_does_not_overwrite_newer_selection() {
        let mut app = BiodashApp::new(Arc::new(SlowSource), "test".into(), Palette::ocean());
        pump_until(&mut app, |app| !app.names_pending);
        assert_eq!(app.view.options.len(), 2);
        assert_eq!(app.view.selected.as_ref().map(SampleId::as_str), Some("S1"));

        // Switch before S1's slow metadata arrives.
        app.option_changed("S2".into());
        pump_until(&mut app, |app| !app.controller.is_loading());
        // Let the stale S1 reply land too.
        thread::sleep(Duration::from_millis(250));
        app.handle_messages();

        assert_eq!(app.view.metadata, vec!["sample: S2"]);
        assert!(app.view.pie.is_none());
        assert!(app.view.error(Region::Pie).unwrap().contains("500"));
        assert!(app.statistics.stale_discarded >= 1);
    }

    #[test]
    fn test_export_without_charts_fails() {
        let app = BiodashApp::new(Arc::new(SlowSource), "test".into(), Palette::ocean());
        let dir = std::env::temp_dir().join("biodash-export-test.json");
        assert!(app.export_figures(&dir).is_err());
    }
}
