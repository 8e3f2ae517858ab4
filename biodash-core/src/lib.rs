//! biodash-core: data model and view logic for the biodash sample explorer.
//!
//! This crate holds everything that does not touch the network or a window:
//! the payload types, the pure data -> chart/metadata transforms, palette
//! themes, and the [`ViewController`] that sequences refreshes and drops
//! stale responses.

pub mod chart;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod palette;
pub mod panel;
pub mod sample;
pub mod surface;

pub use chart::{build_charts, bubble_chart, pie_chart, ChartPair, ChartSpec, ChartTarget, Trace};
pub use config::DashboardConfig;
pub use controller::{Phase, RefreshToken, RegionView, Status, ViewController};
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use palette::{Palette, Rgb, BUILTIN_PALETTES, PALETTE_SIZE};
pub use panel::metadata_lines;
pub use sample::{
    otu_positions, parse_names, MeasurementSet, MetadataRecord, OtuId, SampleId, ScalarValue,
};
pub use surface::{DisplaySurface, Region, SampleSource};
