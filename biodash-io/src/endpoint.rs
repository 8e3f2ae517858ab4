//! Request paths of the three data endpoints.
//!
//! Sample identifiers are opaque, so each one is percent-encoded into a
//! single path segment.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use biodash_core::{Result, SampleId};

/// Path of the sample names list.
pub const NAMES_PATH: &str = "/names";

/// Directory (and URL prefix) of the per-sample metadata payloads.
pub const METADATA_DIR: &str = "metadata";

/// Directory (and URL prefix) of the per-sample measurement payloads.
pub const SAMPLES_DIR: &str = "samples";

/// Bytes escaped inside a path segment (WHATWG path percent-encode set plus
/// `/` and `%`).
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

fn sample_path(dir: &str, sample: &SampleId) -> Result<String> {
    let segment = utf8_percent_encode(sample.path_segment()?, SEGMENT);
    Ok(format!("/{dir}/{segment}"))
}

/// `/metadata/{sample}`
///
/// # Errors
///
/// Fails if the identifier cannot be used as a path segment.
pub fn metadata_path(sample: &SampleId) -> Result<String> {
    sample_path(METADATA_DIR, sample)
}

/// `/samples/{sample}`
///
/// # Errors
///
/// Fails if the identifier cannot be used as a path segment.
pub fn samples_path(sample: &SampleId) -> Result<String> {
    sample_path(SAMPLES_DIR, sample)
}
