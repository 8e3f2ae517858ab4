//! Metadata panel text.

use crate::sample::MetadataRecord;

/// One `"<key>: <value>"` line per entry, in response order.
#[must_use]
pub fn metadata_lines(record: &MetadataRecord) -> Vec<String> {
    record
        .entries()
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect()
}
