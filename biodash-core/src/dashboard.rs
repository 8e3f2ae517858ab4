//! Synchronous dashboard driver.

use crate::controller::{RefreshToken, ViewController};
use crate::palette::Palette;
use crate::sample::SampleId;
use crate::surface::{DisplaySurface, SampleSource};

/// Wires a [`SampleSource`], a [`DisplaySurface`] and a [`ViewController`].
///
/// Requests run inline on the calling thread, one metadata and one
/// measurement request per refresh.
pub struct Dashboard<S, D> {
    source: S,
    display: D,
    controller: ViewController,
}

impl<S: SampleSource, D: DisplaySurface> Dashboard<S, D> {
    pub fn new(source: S, display: D, palette: Palette) -> Self {
        Self {
            source,
            display,
            controller: ViewController::new(palette),
        }
    }

    /// Load the names, populate the options and render the first sample.
    ///
    /// Returns `false` if there was nothing to render.
    pub fn initialize(&mut self) -> bool {
        let token = self.controller.initialize(self.source.names());
        self.controller.present_options(&mut self.display);
        match token {
            Some(token) => {
                self.run(&token);
                true
            }
            None => false,
        }
    }

    /// Selection-change entry point.
    pub fn option_changed(&mut self, sample: SampleId) {
        let token = self.controller.select(sample);
        self.run(&token);
    }

    /// Reload both regions for `sample`.
    pub fn refresh(&mut self, sample: SampleId) {
        let token = self.controller.refresh(sample);
        self.run(&token);
    }

    fn run(&mut self, token: &RefreshToken) {
        self.build_metadata(token);
        self.build_charts(token);
    }

    fn build_metadata(&mut self, token: &RefreshToken) {
        let result = self.source.metadata(token.sample());
        if self.controller.accept_metadata(token, result) {
            self.controller.present_metadata(&mut self.display);
        }
    }

    fn build_charts(&mut self, token: &RefreshToken) {
        let result = self.source.measurements(token.sample());
        if self.controller.accept_measurements(token, result) {
            self.controller.present_charts(&mut self.display);
        }
    }

    #[must_use]
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}
