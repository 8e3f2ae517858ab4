//! biodash-io: sample sources for biodash.
//!
//! Two implementations of [`biodash_core::SampleSource`]:
//! [`HttpSource`] talks to the `/names`, `/metadata/{sample}` and
//! `/samples/{sample}` endpoints, and [`DirectorySource`] serves the same
//! payloads from JSON files on disk.

pub mod endpoint;
mod error;
mod fixtures;
mod http;

pub use error::{Error, Result};
pub use fixtures::DirectorySource;
pub use http::HttpSource;
