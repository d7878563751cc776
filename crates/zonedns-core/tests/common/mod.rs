//! Test doubles and common utilities for provider contract tests
//!
//! This module provides a minimal in-memory provider that follows the
//! record-management contract without any remote service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use zonedns_core::config::ProviderConfig;
use zonedns_core::error::Result;
use zonedns_core::traits::{
    DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};
use zonedns_core::{Error, Record};

/// An in-memory provider for a single zone that tracks calls
pub struct MockDnsProvider {
    /// Zone served by this provider
    zone: String,
    /// Current records
    records: Arc<std::sync::Mutex<Vec<Record>>>,
    /// Call counter for every mutating operation
    write_call_count: Arc<AtomicUsize>,
}

impl MockDnsProvider {
    pub fn new(zone: &str) -> Self {
        Self {
            zone: zone.to_string(),
            records: Arc::new(std::sync::Mutex::new(Vec::new())),
            write_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of mutating calls
    pub fn write_call_count(&self) -> usize {
        self.write_call_count.load(Ordering::SeqCst)
    }

    /// Create a new MockDnsProvider that shares state with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            zone: other.zone.clone(),
            records: Arc::clone(&other.records),
            write_call_count: Arc::clone(&other.write_call_count),
        }
    }

    fn check_zone(&self, zone: &str) -> Result<()> {
        if zone == self.zone {
            Ok(())
        } else {
            Err(Error::invalid_input(format!("Unknown zone: {}", zone)))
        }
    }
}

#[async_trait::async_trait]
impl RecordGetter for MockDnsProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        self.check_zone(zone)?;
        Ok(self.records.lock().unwrap().clone())
    }
}

#[async_trait::async_trait]
impl RecordAppender for MockDnsProvider {
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.check_zone(zone)?;
        self.write_call_count.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(records.to_vec())
    }
}

#[async_trait::async_trait]
impl RecordDeleter for MockDnsProvider {
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.check_zone(zone)?;
        self.write_call_count.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .retain(|existing| !records.iter().any(|r| r.same_rrdata(existing)));
        Ok(records.to_vec())
    }
}

#[async_trait::async_trait]
impl RecordSetter for MockDnsProvider {
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.delete_records(zone, records).await?;
        self.append_records(zone, records).await
    }
}

impl DnsProvider for MockDnsProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory handing out providers that share one in-memory zone
pub struct MockFactory {
    pub shared: MockDnsProvider,
}

impl DnsProviderFactory for MockFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Custom { factory, .. } if factory == "mock" => {
                Ok(Box::new(MockDnsProvider::sharing_state_with(&self.shared)))
            }
            _ => Err(Error::config("Invalid config for mock provider")),
        }
    }
}

/// Helper to create the config selecting [`MockFactory`]
pub fn mock_config() -> ProviderConfig {
    ProviderConfig::Custom {
        factory: "mock".to_string(),
        config: serde_json::json!({ "zone": "example.com." }),
    }
}
