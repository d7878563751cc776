//! Zone reading: `DNS::parse_zone` payload decoding
//!
//! The zone parser returns one entry per zone-file line. Record lines carry a
//! base64-encoded owner name and a list of base64-encoded data fragments;
//! control lines (`$TTL`, `$ORIGIN`) and comments carry neither and are
//! skipped.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use zonedns_core::{Error, LINE_INDEX_KEY, Record, Result};

/// Fallback serial sent when the zone has no usable SOA record
pub const FALLBACK_SERIAL: &str = "0";

/// One line of the zone file as reported by `DNS::parse_zone`
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneLineEntry {
    /// Zero-based line number in the zone file
    pub line_index: u64,

    /// Record type, absent on control and comment lines
    #[serde(default)]
    pub record_type: Option<String>,

    #[serde(default)]
    pub ttl: u32,

    /// Base64-encoded fully qualified owner name
    #[serde(default)]
    pub dname_b64: String,

    /// Base64-encoded data fragments, in order
    #[serde(default)]
    pub data_b64: Vec<String>,
}

impl ZoneLineEntry {
    /// Project this line into the generic record contract
    ///
    /// Returns `Ok(None)` for lines that do not hold a record.
    pub fn to_record(&self, zone: &str) -> Result<Option<Record>> {
        let Some(record_type) = self.record_type.as_deref() else {
            return Ok(None);
        };

        let fqdn = decode_b64(&self.dname_b64, self.line_index, "dname_b64")?;

        let mut fragments = Vec::with_capacity(self.data_b64.len());
        for fragment in &self.data_b64 {
            fragments.push(decode_b64(fragment, self.line_index, "data_b64")?);
        }

        let record = Record::new(
            record_type,
            relative_name(&fqdn, zone),
            fragments.join(" "),
            self.ttl,
        )
        .with_metadata(LINE_INDEX_KEY, self.line_index.to_string());

        Ok(Some(record))
    }
}

fn decode_b64(encoded: &str, line: u64, field: &str) -> Result<String> {
    let bytes = BASE64.decode(encoded).map_err(|e| {
        Error::decode(format!("line {}: invalid base64 in {}: {}", line, field, e))
    })?;
    String::from_utf8(bytes)
        .map_err(|e| Error::decode(format!("line {}: {} is not UTF-8: {}", line, field, e)))
}

/// Strip one trailing `.<zone>` from a fully qualified name
///
/// The zone apex itself maps to the empty name. Names outside the zone are
/// returned unchanged.
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    if fqdn == zone {
        return String::new();
    }
    let suffix = format!(".{}", zone);
    fqdn.strip_suffix(&suffix).unwrap_or(fqdn).to_string()
}

/// Inverse of [`relative_name`]: `name + "." + zone`, with `""` and `"@"`
/// denoting the apex
pub fn absolute_name(name: &str, zone: &str) -> String {
    if name.is_empty() || name == "@" {
        zone.to_string()
    } else {
        format!("{}.{}", name, zone)
    }
}

/// Zone-file line number, valid only within the [`ZoneSnapshot`] it came from
///
/// Any mutation of the zone may renumber lines, so a `LineIndex` must never
/// be reused across reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineIndex(u64);

impl LineIndex {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LineIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SOA serial used as the optimistic-concurrency token for `mass_edit_zone`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serial {
    /// Third field of the SOA record's value
    Known(String),
    /// No SOA record, or one with fewer than three fields
    Unknown,
}

impl Serial {
    /// Extract the serial from an SOA value (`mname rname serial ...`)
    pub fn from_soa_value(value: &str) -> Self {
        match value.split_whitespace().nth(2) {
            Some(serial) => Serial::Known(serial.to_string()),
            None => Serial::Unknown,
        }
    }

    /// Serial of the first SOA record in `records`
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        records
            .into_iter()
            .find(|r| r.record_type == "SOA")
            .map(|soa| Serial::from_soa_value(&soa.value))
            .unwrap_or(Serial::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Serial::Known(_))
    }

    /// Value sent in the `serial` query parameter
    pub fn wire_value(&self) -> &str {
        match self {
            Serial::Known(serial) => serial,
            Serial::Unknown => FALLBACK_SERIAL,
        }
    }
}

/// The decoded result of a single `parse_zone` call
#[derive(Debug, Clone)]
pub struct ZoneSnapshot {
    lines: Vec<(LineIndex, Record)>,
    serial: Serial,
}

impl ZoneSnapshot {
    /// Decode every entry; any decoding failure fails the whole snapshot
    pub fn decode(zone: &str, entries: &[ZoneLineEntry]) -> Result<Self> {
        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(record) = entry.to_record(zone)? {
                lines.push((LineIndex(entry.line_index), record));
            }
        }

        let serial = Serial::from_records(lines.iter().map(|(_, record)| record));
        Ok(Self { lines, serial })
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Records in zone-file order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.lines.iter().map(|(_, record)| record)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.lines.into_iter().map(|(_, record)| record).collect()
    }

    /// Lines whose type, name and value exactly match one of `targets`
    ///
    /// Every matching line is returned, so duplicated records are all
    /// removed. Targets without a match contribute nothing. Each line appears
    /// at most once, in first-match order.
    pub fn matching_lines(&self, targets: &[Record]) -> Vec<LineIndex> {
        let mut matched: Vec<LineIndex> = Vec::new();
        for target in targets {
            for (index, existing) in &self.lines {
                if target.same_rrdata(existing) && !matched.contains(index) {
                    matched.push(*index);
                }
            }
        }
        matched
    }
}
