//! Sample identifiers, metadata records and measurement sets.
//!
//! These are the three payloads served by the data endpoints. They are
//! decoded fresh on every refresh and dropped once rendered.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Opaque token identifying one data sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(String);

impl SampleId {
    /// Wrap an identifier as received from the names list.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as a single path segment, unencoded.
    ///
    /// Callers building URLs percent-encode the result; callers building
    /// file names use it as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSample`] if the identifier is blank or would
    /// escape its directory.
    pub fn path_segment(&self) -> Result<&str> {
        let id = self.0.as_str();
        if id.trim().is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(Error::InvalidSample(self.0.clone()));
        }
        Ok(id)
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SampleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SampleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Decode the names list (a JSON array of strings).
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body is not an array of strings.
pub fn parse_names(body: &str) -> Result<Vec<SampleId>> {
    serde_json::from_str(body).map_err(|e| Error::decode("sample names", e))
}

/// Scalar metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<Value> for ScalarValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            // Nested values are not expected; keep them readable instead of failing.
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Text(nested.to_string()),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(n, f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn fmt_number(n: &serde_json::Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(i) = n.as_i64() {
        write!(f, "{i}")
    } else if let Some(u) = n.as_u64() {
        write!(f, "{u}")
    } else if let Some(x) = n.as_f64() {
        // f64 Display drops a zero fraction: 34.0 -> "34".
        write!(f, "{x}")
    } else {
        write!(f, "{n}")
    }
}

/// OTU identifier: an opaque category key, numeric in most data sets.
///
/// Serializes back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OtuId {
    Number(serde_json::Number),
    Text(String),
}

impl OtuId {
    /// Numeric value of the id, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for OtuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt_number(n, f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for OtuId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for OtuId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Position of each id on a numeric axis.
///
/// When every id is numeric the ids are their own positions; otherwise the
/// ids are treated as categories and placed at their index.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn otu_positions(ids: &[OtuId]) -> Vec<f64> {
    let numeric: Option<Vec<f64>> = ids.iter().map(OtuId::as_f64).collect();
    numeric.unwrap_or_else(|| (0..ids.len()).map(|i| i as f64).collect())
}

/// Field name to scalar mapping, kept in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    entries: Vec<(String, ScalarValue)>,
}

impl MetadataRecord {
    /// Decode a metadata response body (a JSON object).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| Error::decode("sample metadata", e))?;
        Self::from_value(value)
    }

    /// Convert an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (k, ScalarValue::from(v)))
                    .collect(),
            }),
            other => Err(Error::decode(
                "sample metadata",
                format!("expected an object, got {other}"),
            )),
        }
    }

    /// Entries in response order.
    #[must_use]
    pub fn entries(&self) -> &[(String, ScalarValue)] {
        &self.entries
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ScalarValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
struct RawMeasurementSet {
    otu_ids: Vec<OtuId>,
    sample_values: Vec<f64>,
    otu_labels: Vec<String>,
}

impl TryFrom<RawMeasurementSet> for MeasurementSet {
    type Error = Error;

    fn try_from(raw: RawMeasurementSet) -> Result<Self> {
        Self::new(raw.otu_ids, raw.sample_values, raw.otu_labels)
    }
}

/// Three index-aligned measurement sequences for one sample.
///
/// Invariant: `ids`, `values` and `labels` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawMeasurementSet")]
pub struct MeasurementSet {
    otu_ids: Vec<OtuId>,
    sample_values: Vec<f64>,
    otu_labels: Vec<String>,
}

impl MeasurementSet {
    /// Build a measurement set, checking that the sequences line up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MisalignedMeasurements`] if the lengths differ.
    pub fn new(
        otu_ids: Vec<OtuId>,
        sample_values: Vec<f64>,
        otu_labels: Vec<String>,
    ) -> Result<Self> {
        if otu_ids.len() != sample_values.len() || otu_ids.len() != otu_labels.len() {
            return Err(Error::MisalignedMeasurements {
                ids: otu_ids.len(),
                values: sample_values.len(),
                labels: otu_labels.len(),
            });
        }
        Ok(Self {
            otu_ids,
            sample_values,
            otu_labels,
        })
    }

    /// Decode a `/samples/{sample}` response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for malformed JSON or missing fields, and
    /// [`Error::MisalignedMeasurements`] if the sequences differ in length.
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawMeasurementSet =
            serde_json::from_str(body).map_err(|e| Error::decode("sample measurements", e))?;
        Self::try_from(raw)
    }

    #[must_use]
    pub fn ids(&self) -> &[OtuId] {
        &self.otu_ids
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.sample_values
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.otu_labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.otu_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.otu_ids.is_empty()
    }
}
