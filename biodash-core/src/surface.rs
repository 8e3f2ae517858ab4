//! Seams between the controller and the outside world.
//!
//! [`SampleSource`] is the data side (HTTP endpoints, fixture directories,
//! test doubles). [`DisplaySurface`] is the rendering side (GUI panels, a
//! text printer, recording mocks).

use std::sync::Arc;

use crate::chart::ChartSpec;
use crate::error::Result;
use crate::sample::{MeasurementSet, MetadataRecord, SampleId};

/// Provider of the three dashboard payloads.
pub trait SampleSource: Send + Sync {
    /// Ordered list of sample identifiers (`/names`).
    fn names(&self) -> Result<Vec<SampleId>>;

    /// Metadata for one sample (`/metadata/{sample}`).
    fn metadata(&self, sample: &SampleId) -> Result<MetadataRecord>;

    /// Measurements for one sample (`/samples/{sample}`).
    fn measurements(&self, sample: &SampleId) -> Result<MeasurementSet>;
}

impl<S: SampleSource + ?Sized> SampleSource for Arc<S> {
    fn names(&self) -> Result<Vec<SampleId>> {
        (**self).names()
    }

    fn metadata(&self, sample: &SampleId) -> Result<MetadataRecord> {
        (**self).metadata(sample)
    }

    fn measurements(&self, sample: &SampleId) -> Result<MeasurementSet> {
        (**self).measurements(sample)
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn names(&self) -> Result<Vec<SampleId>> {
        (**self).names()
    }

    fn metadata(&self, sample: &SampleId) -> Result<MetadataRecord> {
        (**self).metadata(sample)
    }

    fn measurements(&self, sample: &SampleId) -> Result<MeasurementSet> {
        (**self).measurements(sample)
    }
}

/// Display regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The sample selection control.
    Selector,
    /// The metadata list.
    Metadata,
    /// The pie chart.
    Pie,
    /// The bubble chart.
    Bubble,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Selector => write!(f, "samples"),
            Region::Metadata => write!(f, "metadata"),
            Region::Pie => write!(f, "pie chart"),
            Region::Bubble => write!(f, "bubble chart"),
        }
    }
}

/// Something the dashboard can render into.
///
/// Every call is a full replace of the named region.
pub trait DisplaySurface {
    /// Replace the selection control's options.
    fn set_options(&mut self, options: &[SampleId], selected: Option<&SampleId>);

    /// Replace the metadata region with these lines.
    fn render_metadata(&mut self, lines: &[String]);

    /// Destroy and rebuild the chart in `chart.target`.
    fn render_chart(&mut self, chart: &ChartSpec);

    /// Replace a region with a visible load failure.
    fn show_region_error(&mut self, region: Region, message: &str);
}
