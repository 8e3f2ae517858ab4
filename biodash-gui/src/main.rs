//! Biodash GUI application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod message;
mod pipeline;
mod state;
mod ui;
mod util;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use app::BiodashApp;
use biodash_core::config::{ENV_BASE_URL, ENV_PALETTE};
use biodash_core::{DashboardConfig, Palette, SampleSource};
use biodash_io::{DirectorySource, HttpSource};

/// Desktop sample explorer.
#[derive(Parser)]
#[command(name = "biodash-gui", version, about)]
struct Args {
    /// Root URL of the data endpoints
    #[arg(long, env = ENV_BASE_URL)]
    base_url: Option<String>,

    /// Read JSON fixtures from this directory instead of HTTP
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Chart palette: a built-in name or ten comma-separated #rrggbb colors
    #[arg(long, env = ENV_PALETTE)]
    palette: Option<Palette>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = DashboardConfig::from_env();
    if let Some(url) = args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(palette) = args.palette {
        config = config.with_palette(palette);
    }

    let (source, label): (Arc<dyn SampleSource>, String) = match &args.fixtures {
        Some(dir) => (
            Arc::new(DirectorySource::open(dir)?),
            dir.display().to_string(),
        ),
        None => (Arc::new(HttpSource::new(&config)), config.base_url.clone()),
    };
    let palette = config.palette;

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Biodash",
        opts,
        Box::new(move |cc| {
            ui::theme::apply_system_theme(&cc.egui_ctx);
            Ok(Box::new(BiodashApp::new(source, label, palette)))
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}
