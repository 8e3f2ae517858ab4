//! Error types for biodash-core.

use thiserror::Error;

/// Result type alias for biodash operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for biodash operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    /// The server answered with a non-success status code.
    #[error("request to {url} returned status {code}")]
    Status { url: String, code: u16 },

    /// A response body could not be decoded into the expected shape.
    #[error("could not decode {what}: {reason}")]
    Decode { what: String, reason: String },

    /// The three measurement sequences have different lengths.
    #[error("misaligned measurements: {ids} ids, {values} values, {labels} labels")]
    MisalignedMeasurements {
        ids: usize,
        values: usize,
        labels: usize,
    },

    /// Sample identifier cannot be used to address a request.
    #[error("invalid sample identifier: {0:?}")]
    InvalidSample(String),

    /// Palette specification could not be parsed.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// File I/O error (fixture directories, exports).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a decode error for the named payload.
    pub fn decode(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}
