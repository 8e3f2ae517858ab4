//! View controller: selection state and refresh sequencing.
//!
//! The controller owns the explicit application state (options, current
//! selection, committed region contents) and decides which responses are
//! allowed to reach the display. Every refresh hands out a [`RefreshToken`];
//! a response is committed only if its token is still the latest one, so a
//! slow reply for an old selection can never overwrite a newer render.
//!
//! Fetching is left to the caller. The synchronous [`crate::Dashboard`]
//! fetches inline; the GUI fetches on worker threads and feeds results back
//! through [`ViewController::accept_metadata`] and
//! [`ViewController::accept_measurements`].

use crate::chart::{build_charts, ChartPair};
use crate::error::Result;
use crate::palette::Palette;
use crate::panel::metadata_lines;
use crate::sample::{MeasurementSet, MetadataRecord, SampleId};
use crate::surface::{DisplaySurface, Region};

/// Identifies one refresh: the sample requested and its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    generation: u64,
    sample: SampleId,
}

impl RefreshToken {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn sample(&self) -> &SampleId {
        &self.sample
    }
}

/// Outcome of loading the names list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Names not loaded yet.
    Starting,
    /// Options populated.
    Ready,
    /// Names loaded but the list was empty.
    Empty,
    /// Names request failed.
    Failed(String),
}

/// Load phase of one display region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Failed(String),
}

/// Committed content of a region plus its load phase.
///
/// Content from the previous sample stays visible while the next one loads
/// and is replaced wholesale when the response arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionView<T> {
    pub content: Option<T>,
    pub phase: Phase,
}

impl<T> Default for RegionView<T> {
    fn default() -> Self {
        Self {
            content: None,
            phase: Phase::Idle,
        }
    }
}

impl<T> RegionView<T> {
    fn commit(&mut self, result: Result<T>) {
        match result {
            Ok(content) => {
                self.content = Some(content);
                self.phase = Phase::Idle;
            }
            Err(e) => {
                self.content = None;
                self.phase = Phase::Failed(e.to_string());
            }
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

/// Selection state and committed renders for the dashboard.
#[derive(Debug, Clone)]
pub struct ViewController {
    palette: Palette,
    options: Vec<SampleId>,
    selected: Option<SampleId>,
    generation: u64,
    status: Status,
    metadata: RegionView<Vec<String>>,
    charts: RegionView<ChartPair>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl ViewController {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: Vec::new(),
            selected: None,
            generation: 0,
            status: Status::Starting,
            metadata: RegionView::default(),
            charts: RegionView::default(),
        }
    }

    /// Populate the options from the names response and start the first refresh.
    ///
    /// Returns `None` (and leaves the options empty) if the request failed
    /// or returned no identifiers.
    pub fn initialize(&mut self, names: Result<Vec<SampleId>>) -> Option<RefreshToken> {
        let names = match names {
            Ok(names) => names,
            Err(e) => {
                log::warn!("failed to load sample names: {e}");
                self.status = Status::Failed(e.to_string());
                return None;
            }
        };
        let Some(first) = names.first().cloned() else {
            log::warn!("sample names list is empty; nothing to display");
            self.status = Status::Empty;
            return None;
        };

        log::info!("loaded {} sample names", names.len());
        self.options = names;
        self.status = Status::Ready;
        Some(self.refresh(first))
    }

    /// Selection-change handler: record the new selection and refresh it.
    pub fn select(&mut self, sample: SampleId) -> RefreshToken {
        self.refresh(sample)
    }

    /// Start loading both regions for `sample`.
    ///
    /// The caller must issue exactly one metadata request and one
    /// measurement request for [`RefreshToken::sample`].
    pub fn refresh(&mut self, sample: SampleId) -> RefreshToken {
        self.generation += 1;
        self.selected = Some(sample.clone());
        self.metadata.phase = Phase::Loading;
        self.charts.phase = Phase::Loading;
        log::debug!("refresh #{} for sample {sample}", self.generation);
        RefreshToken {
            generation: self.generation,
            sample,
        }
    }

    /// Refresh the current selection again, if there is one.
    pub fn refresh_selected(&mut self) -> Option<RefreshToken> {
        self.selected.clone().map(|sample| self.refresh(sample))
    }

    /// Switch chart theme. Returns a token if the current sample needs redrawing.
    pub fn set_palette(&mut self, palette: Palette) -> Option<RefreshToken> {
        if palette == self.palette {
            return None;
        }
        self.palette = palette;
        self.refresh_selected()
    }

    /// Whether `token` belongs to the latest refresh.
    #[must_use]
    pub fn is_current(&self, token: &RefreshToken) -> bool {
        token.generation == self.generation && self.selected.as_ref() == Some(&token.sample)
    }

    /// Commit a metadata response. Returns `false` if it was stale and dropped.
    pub fn accept_metadata(
        &mut self,
        token: &RefreshToken,
        result: Result<MetadataRecord>,
    ) -> bool {
        if !self.is_current(token) {
            log::debug!(
                "discarding stale metadata for {} (refresh #{}, latest #{})",
                token.sample,
                token.generation,
                self.generation
            );
            return false;
        }
        if let Err(e) = &result {
            log::warn!("failed to load metadata for {}: {e}", token.sample);
        }
        self.metadata.commit(result.map(|record| metadata_lines(&record)));
        true
    }

    /// Commit a measurement response. Returns `false` if it was stale and dropped.
    pub fn accept_measurements(
        &mut self,
        token: &RefreshToken,
        result: Result<MeasurementSet>,
    ) -> bool {
        if !self.is_current(token) {
            log::debug!(
                "discarding stale measurements for {} (refresh #{}, latest #{})",
                token.sample,
                token.generation,
                self.generation
            );
            return false;
        }
        if let Err(e) = &result {
            log::warn!("failed to load measurements for {}: {e}", token.sample);
        }
        let palette = &self.palette;
        self.charts
            .commit(result.map(|set| build_charts(&set, palette)));
        true
    }

    /// Push the options to a display.
    pub fn present_options(&self, display: &mut impl DisplaySurface) {
        match &self.status {
            Status::Failed(msg) => display.show_region_error(Region::Selector, msg),
            Status::Empty => display.show_region_error(Region::Selector, "no samples available"),
            Status::Starting | Status::Ready => {
                display.set_options(&self.options, self.selected.as_ref());
            }
        }
    }

    /// Push the committed metadata region to a display.
    pub fn present_metadata(&self, display: &mut impl DisplaySurface) {
        if let Phase::Failed(msg) = &self.metadata.phase {
            display.show_region_error(Region::Metadata, msg);
        } else if let Some(lines) = &self.metadata.content {
            display.render_metadata(lines);
        }
    }

    /// Push the committed charts to a display.
    pub fn present_charts(&self, display: &mut impl DisplaySurface) {
        if let Phase::Failed(msg) = &self.charts.phase {
            display.show_region_error(Region::Pie, msg);
            display.show_region_error(Region::Bubble, msg);
        } else if let Some(charts) = &self.charts.content {
            display.render_chart(&charts.pie);
            display.render_chart(&charts.bubble);
        }
    }

    #[must_use]
    pub fn options(&self) -> &[SampleId] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SampleId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn metadata(&self) -> &RegionView<Vec<String>> {
        &self.metadata
    }

    #[must_use]
    pub fn charts(&self) -> &RegionView<ChartPair> {
        &self.charts
    }

    /// Whether either region of the latest refresh is still pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.metadata.is_loading() || self.charts.is_loading()
    }
}
