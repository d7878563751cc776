//! Test doubles and common utilities for cPanel provider contract tests
//!
//! [`FakeCpanel`] is a stateful wiremock responder that keeps one zone in
//! memory and implements just enough of `DNS::parse_zone` and
//! `DNS::mass_edit_zone` to observe what the provider sends.

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use zonedns_provider_cpanel::CpanelProvider;

pub const USERNAME: &str = "alice";
pub const API_TOKEN: &str = "TOKEN123";
pub const PARSE_ZONE_PATH: &str = "/execute/DNS/parse_zone";
pub const MASS_EDIT_PATH: &str = "/execute/DNS/mass_edit_zone";

pub fn b64(s: &str) -> String {
    BASE64.encode(s)
}

/// Successful UAPI envelope
pub fn uapi_ok(data: Value) -> Value {
    json!({ "result": { "status": 1, "data": data, "errors": null, "messages": null } })
}

/// Failed UAPI envelope
pub fn uapi_error(errors: &[&str]) -> Value {
    json!({ "result": { "status": 0, "data": null, "errors": errors, "messages": null } })
}

/// One `parse_zone` record entry
pub fn zone_entry(line: u64, record_type: &str, ttl: u32, dname: &str, data: &[&str]) -> Value {
    json!({
        "line_index": line,
        "type": "record",
        "record_type": record_type,
        "ttl": ttl,
        "dname_b64": b64(dname),
        "data_b64": data.iter().map(|d| b64(d)).collect::<Vec<_>>(),
    })
}

/// Provider pointed at the mock server
pub fn provider_for(server: &MockServer) -> CpanelProvider {
    CpanelProvider::new(server.uri(), USERNAME, API_TOKEN).expect("mock server URI is valid")
}

/// Query parameters of every request the server received for `path`
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<HashMap<String, String>> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter(|request| request.url.path() == path)
        .map(|request| request.url.query_pairs().into_owned().collect())
        .collect()
}

/// Parse a JSON query parameter
pub fn json_param(params: &HashMap<String, String>, key: &str) -> Value {
    let raw = params
        .get(key)
        .unwrap_or_else(|| panic!("missing query parameter {}", key));
    serde_json::from_str(raw).expect("parameter is JSON")
}

/// A zone-file line held by [`FakeCpanel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeLine {
    pub line_index: u64,
    pub record_type: String,
    /// Fully qualified owner name
    pub dname: String,
    pub ttl: u32,
    pub data: Vec<String>,
}

struct FakeZoneState {
    zone: String,
    serial: u64,
    lines: Vec<FakeLine>,
    next_line: u64,
    fail_additions: bool,
}

impl FakeZoneState {
    fn bump_serial(&mut self) {
        self.serial += 1;
        let serial = self.serial.to_string();
        for line in self.lines.iter_mut().filter(|l| l.record_type == "SOA") {
            if line.data.len() > 2 {
                line.data[2] = serial.clone();
            }
        }
    }
}

/// In-memory cPanel zone behind a wiremock server
#[derive(Clone)]
pub struct FakeCpanel {
    state: Arc<Mutex<FakeZoneState>>,
}

impl FakeCpanel {
    /// Zone with a `$TTL` control line (line 0) and an SOA (line 1)
    pub fn new(zone: &str, serial: u64) -> Self {
        let soa = FakeLine {
            line_index: 1,
            record_type: "SOA".to_string(),
            dname: zone.to_string(),
            ttl: 86400,
            data: vec![
                format!("ns1.{}", zone),
                format!("admin.{}", zone),
                serial.to_string(),
                "3600".to_string(),
                "1800".to_string(),
                "1209600".to_string(),
                "86400".to_string(),
            ],
        };
        Self {
            state: Arc::new(Mutex::new(FakeZoneState {
                zone: zone.to_string(),
                serial,
                lines: vec![soa],
                next_line: 2,
                fail_additions: false,
            })),
        }
    }

    /// Add a record; `name` is relative to the zone
    pub fn with_record(self, record_type: &str, name: &str, ttl: u32, data: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let dname = if name.is_empty() {
                state.zone.clone()
            } else {
                format!("{}.{}", name, state.zone)
            };
            let line_index = state.next_line;
            state.next_line += 1;
            state.lines.push(FakeLine {
                line_index,
                record_type: record_type.to_string(),
                dname,
                ttl,
                data: data.iter().map(|d| d.to_string()).collect(),
            });
        }
        self
    }

    /// Answer every `mass_edit_zone` call carrying `add` with an HTTP 500
    pub fn failing_additions(self) -> Self {
        self.state.lock().unwrap().fail_additions = true;
        self
    }

    pub fn serial(&self) -> u64 {
        self.state.lock().unwrap().serial
    }

    pub fn lines(&self) -> Vec<FakeLine> {
        self.state.lock().unwrap().lines.clone()
    }

    /// Lines of the given type, as `(dname, joined data)`
    pub fn records_of_type(&self, record_type: &str) -> Vec<(String, String)> {
        self.lines()
            .into_iter()
            .filter(|l| l.record_type == record_type)
            .map(|l| (l.dname, l.data.join(" ")))
            .collect()
    }

    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("GET"))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }

    fn parse_zone(&self) -> Value {
        let state = self.state.lock().unwrap();
        let mut entries = vec![json!({
            "line_index": 0,
            "type": "control",
            "text_b64": b64("$TTL 14400"),
        })];
        for line in &state.lines {
            let data: Vec<&str> = line.data.iter().map(String::as_str).collect();
            entries.push(zone_entry(
                line.line_index,
                &line.record_type,
                line.ttl,
                &line.dname,
                &data,
            ));
        }
        uapi_ok(Value::Array(entries))
    }

    fn mass_edit(&self, params: &HashMap<String, String>) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();

        if params.contains_key("add") && state.fail_additions {
            return ResponseTemplate::new(500).set_body_string("Internal Server Error");
        }

        let expected = state.serial.to_string();
        if params.get("serial") != Some(&expected) {
            return ResponseTemplate::new(200).set_body_json(uapi_error(&[
                "The zone has been modified since the given serial number.",
            ]));
        }

        if let Some(raw) = params.get("remove") {
            let remove: Vec<u64> = serde_json::from_str(raw).expect("remove is a JSON list");
            state.lines.retain(|line| !remove.contains(&line.line_index));
        }

        if let Some(raw) = params.get("add") {
            let add: Vec<Value> = serde_json::from_str(raw).expect("add is a JSON list");
            for entry in add {
                let line_index = state.next_line;
                state.next_line += 1;
                state.lines.push(FakeLine {
                    line_index,
                    record_type: entry["record_type"].as_str().unwrap_or_default().to_string(),
                    dname: entry["dname"].as_str().unwrap_or_default().to_string(),
                    ttl: entry["ttl"].as_u64().unwrap_or_default() as u32,
                    data: entry["data"]
                        .as_array()
                        .map(|d| {
                            d.iter()
                                .map(|v| v.as_str().unwrap_or_default().to_string())
                                .collect()
                        })
                        .unwrap_or_default(),
                });
            }
        }

        state.bump_serial();
        ResponseTemplate::new(200).set_body_json(uapi_ok(json!({
            "new_serial": state.serial.to_string(),
        })))
    }
}

impl Respond for FakeCpanel {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let params: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        match request.url.path() {
            PARSE_ZONE_PATH => ResponseTemplate::new(200).set_body_json(self.parse_zone()),
            MASS_EDIT_PATH => self.mass_edit(&params),
            _ => ResponseTemplate::new(404),
        }
    }
}
