//! Configuration types for zonedns
//!
//! This module defines the provider configuration consumed by
//! [`ProviderRegistry`](crate::ProviderRegistry) and the provider factories.

use serde::{Deserialize, Serialize};
use url::Url;

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// cPanel UAPI provider
    Cpanel {
        /// Base URL of the cPanel instance (e.g. "https://cpanel.example.com:2083")
        host: String,
        /// cPanel account name
        username: String,
        /// cPanel API token
        api_token: String,
        /// Per-request timeout in seconds (none by default)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
        /// Fail writes instead of sending serial "0" when the zone has no SOA
        #[serde(default)]
        require_serial: bool,
        /// How `set_records` applies its changes
        #[serde(default)]
        set_strategy: SetStrategy,
        /// Read and log intended mutations without sending them
        #[serde(default)]
        dry_run: bool,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

// Keeps credentials out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Cpanel {
                host,
                username,
                timeout_secs,
                require_serial,
                set_strategy,
                dry_run,
                ..
            } => f
                .debug_struct("Cpanel")
                .field("host", host)
                .field("username", username)
                .field("api_token", &"<REDACTED>")
                .field("timeout_secs", timeout_secs)
                .field("require_serial", require_serial)
                .field("set_strategy", set_strategy)
                .field("dry_run", dry_run)
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .finish_non_exhaustive(),
        }
    }
}

impl ProviderConfig {
    /// Create a cPanel configuration with default options
    pub fn cpanel(
        host: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        ProviderConfig::Cpanel {
            host: host.into(),
            username: username.into(),
            api_token: api_token.into(),
            timeout_secs: None,
            require_serial: false,
            set_strategy: SetStrategy::default(),
            dry_run: false,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cpanel {
                host,
                username,
                api_token,
                timeout_secs,
                ..
            } => {
                validate_host(host)?;
                if username.is_empty() {
                    return Err(crate::Error::config("cPanel username cannot be empty"));
                }
                if api_token.is_empty() {
                    return Err(crate::Error::config("cPanel API token cannot be empty"));
                }
                if *timeout_secs == Some(0) {
                    return Err(crate::Error::config("cPanel timeout must be > 0"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Cpanel { .. } => "cpanel",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

fn validate_host(host: &str) -> Result<(), crate::Error> {
    if host.is_empty() {
        return Err(crate::Error::config("cPanel host cannot be empty"));
    }

    let url = Url::parse(host)
        .map_err(|e| crate::Error::config(format!("Invalid cPanel host '{}': {}", host, e)))?;

    match url.scheme() {
        "https" | "http" => {}
        other => {
            return Err(crate::Error::config(format!(
                "cPanel host must use http or https, got '{}'",
                other
            )));
        }
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(crate::Error::config(
            "cPanel host must not carry a query string or fragment",
        ));
    }

    Ok(())
}

/// Strategy used by `set_records`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetStrategy {
    /// One read and one mutation carrying both removals and additions under
    /// a single serial
    #[default]
    Combined,

    /// Delete, then append, as two independent read/mutate cycles
    ///
    /// Not atomic: if the append fails after the delete succeeded, the zone
    /// is left without either the old or the new records.
    TwoPhase,
}

impl std::str::FromStr for SetStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "combined" => Ok(SetStrategy::Combined),
            "two-phase" | "two_phase" => Ok(SetStrategy::TwoPhase),
            _ => Err(crate::Error::config(format!(
                "Unknown set strategy '{}'. Valid: combined, two-phase",
                s
            ))),
        }
    }
}
