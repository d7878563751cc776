//! Zone writing: `DNS::mass_edit_zone` request construction
//!
//! A mass edit carries the zone, the serial the edit was computed against,
//! and JSON-encoded `add` and/or `remove` lists. The remote side rejects the
//! edit when the serial no longer matches the zone.

use serde::Serialize;
use zonedns_core::{Record, Result};

use crate::zone::{LineIndex, absolute_name};

/// One entry of the `add` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddEntry {
    pub record_type: String,
    /// Fully qualified owner name
    pub dname: String,
    pub ttl: u32,
    /// Record data; always a single element, long TXT values are not chunked
    pub data: Vec<String>,
}

impl AddEntry {
    pub fn from_record(record: &Record, zone: &str) -> Self {
        Self {
            record_type: record.record_type.clone(),
            dname: absolute_name(&record.name, zone),
            ttl: record.ttl,
            data: vec![record.value.clone()],
        }
    }
}

/// Parameters of a single `mass_edit_zone` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassEdit {
    zone: String,
    serial: String,
    add: Option<Vec<AddEntry>>,
    remove: Option<Vec<LineIndex>>,
}

impl MassEdit {
    pub fn new(zone: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            serial: serial.into(),
            add: None,
            remove: None,
        }
    }

    /// Add `records`; an empty slice still sends `add=[]`
    pub fn with_additions(mut self, records: &[Record]) -> Self {
        let add = records
            .iter()
            .map(|record| AddEntry::from_record(record, &self.zone))
            .collect();
        self.add = Some(add);
        self
    }

    /// Remove `lines`; an empty list still sends `remove=[]`
    pub fn with_removals(mut self, lines: Vec<LineIndex>) -> Self {
        self.remove = Some(lines);
        self
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn additions(&self) -> &[AddEntry] {
        self.add.as_deref().unwrap_or_default()
    }

    pub fn removals(&self) -> &[LineIndex] {
        self.remove.as_deref().unwrap_or_default()
    }

    /// Query parameters in the order they are sent
    pub fn to_params(&self) -> Result<Vec<(&'static str, String)>> {
        let mut params = vec![("zone", self.zone.clone()), ("serial", self.serial.clone())];

        if let Some(add) = &self.add {
            params.push(("add", serde_json::to_string(add)?));
        }
        if let Some(remove) = &self.remove {
            params.push(("remove", serde_json::to_string(remove)?));
        }

        Ok(params)
    }
}
