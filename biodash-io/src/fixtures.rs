//! Directory-backed sample source.
//!
//! Serves the same payloads as the HTTP endpoints from JSON files laid out
//! like the URL space:
//!
//! ```text
//! <root>/names.json
//! <root>/metadata/<sample>.json
//! <root>/samples/<sample>.json
//! ```

use std::path::{Path, PathBuf};

use biodash_core::{parse_names, MeasurementSet, MetadataRecord, SampleId, SampleSource};

use crate::endpoint::{METADATA_DIR, NAMES_PATH, SAMPLES_DIR};
use crate::error::{Error, Result};

/// [`SampleSource`] reading JSON fixtures from a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Use `root` as the fixture directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if `root` is not a readable directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let meta = std::fs::metadata(&root).map_err(|source| Error::Io {
            path: root.display().to_string(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(Error::Io {
                path: root.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }
        Ok(Self { root })
    }

    /// File backing the names list.
    #[must_use]
    pub fn names_file(&self) -> PathBuf {
        self.root.join(format!("{}.json", NAMES_PATH.trim_start_matches('/')))
    }

    /// File backing a per-sample payload (`samples`, `S1` -> `<root>/samples/S1.json`).
    ///
    /// The identifier is used unencoded.
    ///
    /// # Errors
    ///
    /// Fails if the identifier would escape `dir`.
    pub fn sample_file(&self, dir: &str, sample: &SampleId) -> biodash_core::Result<PathBuf> {
        Ok(self
            .root
            .join(dir)
            .join(format!("{}.json", sample.path_segment()?)))
    }

    fn read(&self, path: &Path) -> Result<String> {
        log::debug!("reading {}", path.display());
        std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl SampleSource for DirectorySource {
    fn names(&self) -> biodash_core::Result<Vec<SampleId>> {
        parse_names(&self.read(&self.names_file())?)
    }

    fn metadata(&self, sample: &SampleId) -> biodash_core::Result<MetadataRecord> {
        let path = self.sample_file(METADATA_DIR, sample)?;
        MetadataRecord::from_json(&self.read(&path)?)
    }

    fn measurements(&self, sample: &SampleId) -> biodash_core::Result<MeasurementSet> {
        let path = self.sample_file(SAMPLES_DIR, sample)?;
        MeasurementSet::from_json(&self.read(&path)?)
    }
}
