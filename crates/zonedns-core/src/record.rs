//! Generic DNS record contract
//!
//! [`Record`] is the provider-agnostic shape that callers hand to and receive
//! from every [`DnsProvider`](crate::DnsProvider). Names are always relative
//! to the zone they belong to; an empty name denotes the zone apex.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key under which providers expose the zone-file line a record was
/// read from.
///
/// The value is only meaningful for the read that produced it and is stale
/// after any mutation of the zone.
pub const LINE_INDEX_KEY: &str = "line_index";

/// A single DNS resource record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Record type (e.g. "A", "TXT", "SOA")
    #[serde(rename = "type")]
    pub record_type: String,

    /// Owner name relative to the zone
    pub name: String,

    /// Presentation-format record data
    pub value: String,

    /// Time-to-live in seconds
    pub ttl: u32,

    /// Opaque provider-specific metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Record {
    /// Create a new record without metadata
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            value: value.into(),
            ttl,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether `other` has the same type, name and value
    ///
    /// TTL and metadata are ignored; this is the identity used when deleting.
    pub fn same_rrdata(&self, other: &Record) -> bool {
        self.record_type == other.record_type
            && self.name == other.name
            && self.value == other.value
    }

    /// The line index recorded by the last read, if any
    pub fn line_index(&self) -> Option<&str> {
        self.metadata.get(LINE_INDEX_KEY).map(String::as_str)
    }
}
