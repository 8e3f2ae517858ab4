//! Blocking HTTP sample source.
//!
//! One `GET` per call, no retries and no caching: every refresh re-fetches.
//! The agent carries the configured global timeout so a hung server shows up
//! as a failed region instead of an endless load.

use biodash_core::{
    parse_names, DashboardConfig, MeasurementSet, MetadataRecord, SampleId, SampleSource,
};

use crate::endpoint::{metadata_path, samples_path, NAMES_PATH};
use crate::error::{Error, Result};

/// [`SampleSource`] backed by the dashboard's JSON endpoints.
#[derive(Clone)]
pub struct HttpSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    /// Build a source for `config.base_url` with `config.timeout`.
    #[must_use]
    pub fn new(config: &DashboardConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(config.timeout)
            .build()
            .into();
        Self {
            base_url: config.base_url.clone(),
            agent,
        }
    }

    /// Full URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and return the body text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] for non-2xx responses and
    /// [`Error::Transport`] for everything else that stops the request.
    pub fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| Error::from_ureq(&url, e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| Error::from_ureq(&url, e))
    }
}

impl SampleSource for HttpSource {
    fn names(&self) -> biodash_core::Result<Vec<SampleId>> {
        let body = self.get_text(NAMES_PATH)?;
        parse_names(&body)
    }

    fn metadata(&self, sample: &SampleId) -> biodash_core::Result<MetadataRecord> {
        let body = self.get_text(&metadata_path(sample)?)?;
        MetadataRecord::from_json(&body)
    }

    fn measurements(&self, sample: &SampleId) -> biodash_core::Result<MeasurementSet> {
        let body = self.get_text(&samples_path(sample)?)?;
        MeasurementSet::from_json(&body)
    }
}
