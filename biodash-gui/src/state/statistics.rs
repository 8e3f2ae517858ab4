//! Request statistics for the current session.

use std::time::Duration;

/// Counters and timings of the fetch workers.
#[derive(Default)]
pub struct Statistics {
    /// Number of sample identifiers loaded.
    pub sample_count: usize,
    /// Time taken by the names request.
    pub names_duration: Option<Duration>,
    /// Time taken by the last committed metadata request.
    pub metadata_duration: Option<Duration>,
    /// Time taken by the last committed measurement request.
    pub measurements_duration: Option<Duration>,
    /// Number of OTUs in the current sample.
    pub otu_count: usize,
    /// Refreshes started this session.
    pub refreshes: u64,
    /// Responses dropped because a newer refresh superseded them.
    pub stale_discarded: u64,
    /// Requests that failed.
    pub failures: u64,
}

impl Statistics {
    /// Clear all statistics.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Slowest of the two per-sample requests of the last refresh.
    #[must_use]
    pub fn refresh_latency(&self) -> Option<Duration> {
        match (self.metadata_duration, self.measurements_duration) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}
