// # cPanel DNS Provider
//
// This crate provides a cPanel UAPI DNS provider for zonedns.
//
// ## Behaviour
//
// - Reads go through `DNS::parse_zone`; every record keeps the zone-file line
//   it was read from (`metadata["line_index"]`).
// - Writes go through `DNS::mass_edit_zone` and always re-read the zone first
//   to obtain the current SOA serial, which the remote side checks before
//   applying the edit.
// - No retry logic, no caching, no background tasks. A failed call is
//   returned to the caller as-is.
// - Dry-run mode performs the reads and logs the edit it would send.
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - Provider MUST fail fast if credentials are empty
//
// ## API Reference
//
// - UAPI: https://api.docs.cpanel.net/cpanel/introduction/
// - Parse zone: GET `/execute/DNS/parse_zone?zone=...`
// - Edit zone: GET `/execute/DNS/mass_edit_zone?zone=...&serial=...&add=...&remove=...`

pub mod edit;
pub mod transport;
pub mod zone;

use async_trait::async_trait;
use std::time::Duration;
use zonedns_core::config::ProviderConfig;
use zonedns_core::traits::{
    DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};
use zonedns_core::{Error, Record, Result, SetStrategy};

pub use edit::{AddEntry, MassEdit};
pub use transport::UapiTransport;
pub use zone::{LineIndex, Serial, ZoneLineEntry, ZoneSnapshot};

/// UAPI module holding the zone functions
const DNS_MODULE: &str = "DNS";
const PARSE_ZONE: &str = "parse_zone";
const MASS_EDIT_ZONE: &str = "mass_edit_zone";

/// cPanel DNS provider
///
/// Stateless: each operation performs one `parse_zone` read and, for writes,
/// one `mass_edit_zone` call (two of each for [`SetStrategy::TwoPhase`]).
///
/// # Serial handling
///
/// Writes send the serial of the zone's SOA record as read immediately
/// before the edit. When the zone has no usable SOA, the provider either
/// sends `"0"` (default) or, with [`require_serial`](Self::with_require_serial),
/// refuses to write.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
#[derive(Debug, Clone)]
pub struct CpanelProvider {
    transport: UapiTransport,
    require_serial: bool,
    set_strategy: SetStrategy,
    dry_run: bool,
}

impl CpanelProvider {
    /// Create a new cPanel provider
    ///
    /// # Parameters
    ///
    /// - `host`: base URL of the cPanel instance, e.g. `https://cpanel.example.com:2083`
    /// - `username`: cPanel account name
    /// - `api_token`: cPanel API token
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if any parameter is empty or the host is not an http(s) URL.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let config = ProviderConfig::cpanel(host, username, api_token);
        Self::from_config(&config)
    }

    /// Create a provider from a validated [`ProviderConfig::Cpanel`]
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let ProviderConfig::Cpanel {
            host,
            username,
            api_token,
            timeout_secs,
            require_serial,
            set_strategy,
            dry_run,
        } = config
        else {
            return Err(Error::config("Invalid config for cPanel provider"));
        };

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let transport = UapiTransport::new(host.clone(), username.clone(), api_token.clone(), client)
            .with_timeout(timeout_secs.map(Duration::from_secs));

        Ok(Self {
            transport,
            require_serial: *require_serial,
            set_strategy: *set_strategy,
            dry_run: *dry_run,
        })
    }

    /// Refuse to write when the zone has no usable SOA serial
    pub fn with_require_serial(mut self, require_serial: bool) -> Self {
        self.require_serial = require_serial;
        self
    }

    pub fn with_set_strategy(mut self, set_strategy: SetStrategy) -> Self {
        self.set_strategy = set_strategy;
        self
    }

    /// Read and log, but never send `mass_edit_zone`
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }

    pub fn set_strategy(&self) -> SetStrategy {
        self.set_strategy
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Read and decode the zone once
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /execute/DNS/parse_zone?zone=example.com.
    /// Authorization: Basic <username:token>
    /// ```
    pub async fn snapshot(&self, zone: &str) -> Result<ZoneSnapshot> {
        let data = self
            .transport
            .call(DNS_MODULE, PARSE_ZONE, &[("zone", zone)])
            .await?;

        // A successful call may carry `null` data for a zone with no lines
        let entries: Vec<ZoneLineEntry> = match data {
            serde_json::Value::Null => Vec::new(),
            data => serde_json::from_value(data).map_err(|e| {
                Error::decode(format!("Malformed parse_zone data for {}: {}", zone, e))
            })?,
        };

        let snapshot = ZoneSnapshot::decode(zone, &entries)?;
        tracing::debug!(
            "Read zone {}: {} record(s), serial {:?}",
            zone,
            snapshot.len(),
            snapshot.serial()
        );
        Ok(snapshot)
    }

    fn resolve_serial(&self, zone: &str, snapshot: &ZoneSnapshot) -> Result<String> {
        let serial = snapshot.serial();
        if !serial.is_known() {
            if self.require_serial {
                return Err(Error::serial_unknown(zone));
            }
            tracing::warn!(
                "Zone {} has no usable SOA serial; sending fallback serial {}",
                zone,
                serial.wire_value()
            );
        }
        Ok(serial.wire_value().to_string())
    }

    /// Send one mass edit, or log it in dry-run mode
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /execute/DNS/mass_edit_zone?zone=...&serial=...&add=[...]&remove=[...]
    /// ```
    async fn apply(&self, zone: &str, edit: &MassEdit) -> Result<()> {
        let params = edit.to_params()?;

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would call {}::{} on {} (serial {}, {} addition(s), {} removal(s))",
                DNS_MODULE,
                MASS_EDIT_ZONE,
                zone,
                edit.serial(),
                edit.additions().len(),
                edit.removals().len()
            );
            return Ok(());
        }

        tracing::info!(
            "Editing zone {} (serial {}): {} addition(s), {} removal(s)",
            zone,
            edit.serial(),
            edit.additions().len(),
            edit.removals().len()
        );

        let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let data = self
            .transport
            .call(DNS_MODULE, MASS_EDIT_ZONE, &borrowed)
            .await?;

        if let Some(new_serial) = data.get("new_serial") {
            tracing::debug!("Zone {} now at serial {}", zone, new_serial);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordGetter for CpanelProvider {
    /// Records in zone-file order, names relative to `zone`
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        Ok(self.snapshot(zone).await?.into_records())
    }
}

#[async_trait]
impl RecordAppender for CpanelProvider {
    /// Returns `records` unchanged; the zone is not re-read afterwards
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let snapshot = self.snapshot(zone).await?;
        let serial = self.resolve_serial(zone, &snapshot)?;

        let edit = MassEdit::new(zone, serial).with_additions(records);
        self.apply(zone, &edit).await?;

        Ok(records.to_vec())
    }
}

#[async_trait]
impl RecordDeleter for CpanelProvider {
    /// Removes every line exactly matching one of `records`
    ///
    /// The edit is sent even when nothing matched.
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let snapshot = self.snapshot(zone).await?;
        let serial = self.resolve_serial(zone, &snapshot)?;

        let lines = snapshot.matching_lines(records);
        if lines.is_empty() {
            tracing::debug!("No records in {} match the deletion request", zone);
        }

        let edit = MassEdit::new(zone, serial).with_removals(lines);
        self.apply(zone, &edit).await?;

        Ok(records.to_vec())
    }
}

#[async_trait]
impl RecordSetter for CpanelProvider {
    /// Replace exact matches of `records` with `records`
    ///
    /// With [`SetStrategy::Combined`] this is a single edit. With
    /// [`SetStrategy::TwoPhase`] a failure of the append step leaves the zone
    /// without the deleted records and without the new ones.
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        match self.set_strategy {
            SetStrategy::Combined => {
                let snapshot = self.snapshot(zone).await?;
                let serial = self.resolve_serial(zone, &snapshot)?;

                let edit = MassEdit::new(zone, serial)
                    .with_removals(snapshot.matching_lines(records))
                    .with_additions(records);
                self.apply(zone, &edit).await?;

                Ok(records.to_vec())
            }
            SetStrategy::TwoPhase => {
                self.delete_records(zone, records).await?;
                self.append_records(zone, records).await
            }
        }
    }
}

impl DnsProvider for CpanelProvider {
    fn provider_name(&self) -> &'static str {
        "cpanel"
    }
}

/// Factory for creating cPanel providers
pub struct CpanelFactory;

impl DnsProviderFactory for CpanelFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Cpanel { dry_run, .. } => {
                if *dry_run {
                    tracing::warn!("cPanel provider running in DRY-RUN mode - no changes will be made");
                }
                Ok(Box::new(CpanelProvider::from_config(config)?))
            }
            _ => Err(Error::config("Invalid config for cPanel provider")),
        }
    }
}

/// Register the cPanel provider with a registry
///
/// # Example
///
/// ```rust
/// use zonedns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// zonedns_provider_cpanel::register(&registry);
/// assert!(registry.has_provider("cpanel"));
/// ```
pub fn register(registry: &zonedns_core::ProviderRegistry) {
    registry.register_provider("cpanel", Box::new(CpanelFactory));
}
