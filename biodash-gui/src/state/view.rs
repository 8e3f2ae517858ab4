//! What is currently on screen, region by region.

use std::collections::HashMap;

use biodash_core::{ChartSpec, ChartTarget, DisplaySurface, Region, SampleId};

/// Rendered contents of the dashboard regions.
///
/// Updated only through [`DisplaySurface`], so every update is a full
/// replace of one region.
#[derive(Default)]
pub struct DashboardView {
    /// Options of the sample selector, in names-list order.
    pub options: Vec<SampleId>,
    /// Option currently shown as selected.
    pub selected: Option<SampleId>,
    /// Metadata panel lines.
    pub metadata: Vec<String>,
    /// Pie chart, rebuilt on every render.
    pub pie: Option<ChartSpec>,
    /// Bubble chart, rebuilt on every render.
    pub bubble: Option<ChartSpec>,
    errors: HashMap<Region, String>,
}

impl DashboardView {
    /// Load failure currently shown in `region`.
    #[must_use]
    pub fn error(&self, region: Region) -> Option<&str> {
        self.errors.get(&region).map(String::as_str)
    }
}

impl DisplaySurface for DashboardView {
    fn set_options(&mut self, options: &[SampleId], selected: Option<&SampleId>) {
        self.errors.remove(&Region::Selector);
        self.options = options.to_vec();
        self.selected = selected.cloned();
    }

    fn render_metadata(&mut self, lines: &[String]) {
        self.errors.remove(&Region::Metadata);
        self.metadata = lines.to_vec();
    }

    fn render_chart(&mut self, chart: &ChartSpec) {
        let (slot, region) = match chart.target {
            ChartTarget::Pie => (&mut self.pie, Region::Pie),
            ChartTarget::Bubble => (&mut self.bubble, Region::Bubble),
        };
        *slot = Some(chart.clone());
        self.errors.remove(&region);
    }

    fn show_region_error(&mut self, region: Region, message: &str) {
        match region {
            Region::Selector => self.options.clear(),
            Region::Metadata => self.metadata.clear(),
            Region::Pie => self.pie = None,
            Region::Bubble => self.bubble = None,
        }
        self.errors.insert(region, message.to_string());
    }
}
