//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level HTTP failure (DNS, connect, timeout, body read).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// Non-success HTTP status.
    #[error("request to {url} returned status {code}")]
    Status { url: String, code: u16 },

    /// Core library error (decode, invalid sample id).
    #[error("core error: {0}")]
    CoreError(#[from] biodash_core::Error),
}

impl Error {
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Status {
                url: url.to_string(),
                code,
            },
            other => Self::Transport {
                url: url.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<Error> for biodash_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io { path, source } => biodash_core::Error::Io(std::io::Error::new(
                source.kind(),
                format!("{path}: {source}"),
            )),
            Error::Transport { url, reason } => biodash_core::Error::Http { url, reason },
            Error::Status { url, code } => biodash_core::Error::Status { url, code },
            Error::CoreError(e) => e,
        }
    }
}
