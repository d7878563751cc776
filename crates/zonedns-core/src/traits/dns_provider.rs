// # DNS Provider Traits
//
// Defines the record-management interface every provider implements.
//
// ## Implementations
//
// - cPanel UAPI: `zonedns-provider-cpanel` crate
//
// ## Usage
//
// ```rust,ignore
// use zonedns_core::{Record, RecordAppender};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     provider.append_records(
//         "example.com.",
//         &[Record::new("TXT", "_acme-challenge", "token", 120)],
//     ).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::Record;

/// Lists the records of a zone
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Return every record of `zone`, in the order the provider stores them
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, crate::Error>;
}

/// Adds records to a zone
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Add `records` to `zone` and return the records that were added
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;
}

/// Removes records from a zone
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Remove every record of `zone` whose type, name and value match one of
    /// `records`
    ///
    /// Records with no match are ignored.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;
}

/// Replaces records in a zone
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Ensure `records` are present in `zone`, replacing exact matches
    ///
    /// Whether this is atomic is provider-specific; check the implementation.
    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;
}

/// Trait for full DNS provider implementations
///
/// # Statelessness
///
/// Providers hold no state between calls. Every operation re-fetches what it
/// needs from the remote service, and retries are left to the caller.
///
/// # Cancellation
///
/// All operations are plain futures. Dropping the future (or wrapping it in
/// `tokio::time::timeout`) aborts any in-flight request.
pub trait DnsProvider: RecordGetter + RecordAppender + RecordDeleter + RecordSetter {
    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "cpanel")
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider
    ///
    /// # Returns
    ///
    /// A boxed DnsProvider trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
