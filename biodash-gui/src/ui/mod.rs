//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `top_bar`: sample selector, palette selector, export and status
//! - `metadata_panel`: left sidebar with sample metadata
//! - `main_view`: central panel hosting both charts
//! - `pie_chart` / `bubble_chart`: chart widgets drawn from a `ChartSpec`
//! - `statistics`: request statistics block

mod bubble_chart;
mod main_view;
mod metadata_panel;
mod pie_chart;
mod statistics;
pub mod theme;
mod top_bar;
