//! Application message types for async communication.
//!
//! Messages are sent from background fetch threads to the main UI thread
//! via channels. Per-sample results carry the refresh token they were
//! requested under so the controller can drop stale ones.

use std::time::Duration;

use biodash_core::{MeasurementSet, MetadataRecord, RefreshToken, Result, SampleId};

/// Messages sent from background workers to the UI thread.
pub enum AppMessage {
    /// Names list request finished.
    NamesLoaded(Result<Vec<SampleId>>, Duration),

    /// Metadata request for `token.sample()` finished.
    MetadataLoaded(RefreshToken, Result<MetadataRecord>, Duration),

    /// Measurement request for `token.sample()` finished.
    MeasurementsLoaded(RefreshToken, Result<MeasurementSet>, Duration),
}
