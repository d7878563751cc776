//! Error types for zonedns
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for zonedns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zonedns
#[derive(Error, Debug)]
pub enum Error {
    /// Network/connection failure or an HTTP response that could not be parsed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-success status
    #[error("API call {module}::{function} failed{}", format_remote_errors(.errors))]
    ApiCallFailed {
        /// Remote module name (e.g. "DNS")
        module: String,
        /// Remote function name (e.g. "parse_zone")
        function: String,
        /// Error messages reported by the remote service, if any
        errors: Vec<String>,
    },

    /// Malformed base64, UTF-8 or JSON inside a successful response
    #[error("Decode error: {0}")]
    Decode(String),

    /// The zone has no usable SOA serial and the provider refuses to guess
    #[error("No SOA serial found for zone {zone}")]
    SerialUnknown {
        /// Zone that was read
        zone: String,
    },

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure to encode a request payload as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

fn format_remote_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(": {}", errors.join("; "))
    }
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an API failure error
    pub fn api_call_failed(
        module: impl Into<String>,
        function: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Self::ApiCallFailed {
            module: module.into(),
            function: function.into(),
            errors,
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an unknown-serial error
    pub fn serial_unknown(zone: impl Into<String>) -> Self {
        Self::SerialUnknown { zone: zone.into() }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
