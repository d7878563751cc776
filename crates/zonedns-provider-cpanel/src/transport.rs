//! cPanel UAPI transport
//!
//! Every UAPI function is an HTTP GET on `<host>/execute/<Module>/<function>`
//! with its arguments in the query string. Responses share one envelope:
//!
//! ```json
//! { "result": { "status": 1, "data": ..., "errors": null, "messages": null } }
//! ```
//!
//! A `status` other than 1 means the call failed; `errors` then carries the
//! remote explanation.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use zonedns_core::{Error, Result};

#[derive(Debug, Deserialize)]
struct Envelope {
    result: EnvelopeResult,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResult {
    status: i64,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Option<Vec<String>>,
    #[serde(default)]
    messages: Option<Vec<String>>,
}

/// Authenticated UAPI client
///
/// Holds credentials and the HTTP client, nothing else. No retries and no
/// caching happen here; a failed call is reported once and returned.
#[derive(Clone)]
pub struct UapiTransport {
    /// Base URL without trailing slash
    host: String,
    username: String,
    /// ⚠️ NEVER log this value
    api_token: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for UapiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UapiTransport")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("api_token", &"<REDACTED>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl UapiTransport {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        let host = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            username: username.into(),
            api_token: api_token.into(),
            client,
            timeout: None,
        }
    }

    /// Apply a per-request timeout on top of the caller's own cancellation
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// URL of a UAPI function, without query string
    pub fn function_url(&self, module: &str, function: &str) -> String {
        format!("{}/execute/{}/{}", self.host, module, function)
    }

    /// Call a UAPI function and return its `data` payload
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`]: connection failure or a body that is not a UAPI envelope
    /// - [`Error::Authentication`]: HTTP 401/403
    /// - [`Error::ApiCallFailed`]: envelope status other than 1
    pub async fn call(
        &self,
        module: &str,
        function: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.function_url(module, function);
        tracing::debug!(module, function, "Calling cPanel UAPI");

        let mut request = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .query(params);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            Error::transport(format!(
                "HTTP request for {}::{} failed: {}",
                module, function, e
            ))
        })?;

        let status = response.status();
        if matches!(status.as_u16(), 401 | 403) {
            return Err(Error::auth(format!(
                "cPanel rejected credentials for user {} (HTTP {})",
                self.username, status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            Error::transport(format!(
                "Failed to read {}::{} response: {}",
                module, function, e
            ))
        })?;

        let envelope: Envelope = serde_json::from_slice(&body).map_err(|e| {
            Error::transport(format!(
                "Unparseable {}::{} response (HTTP {}): {}",
                module, function, status, e
            ))
        })?;

        let result = envelope.result;
        if let Some(messages) = result.messages.as_ref().filter(|m| !m.is_empty()) {
            tracing::debug!(module, function, "UAPI messages: {}", messages.join("; "));
        }

        if result.status != 1 {
            let errors = result.errors.unwrap_or_default();
            tracing::debug!(
                module,
                function,
                status = result.status,
                "UAPI call failed: {}",
                errors.join("; ")
            );
            return Err(Error::api_call_failed(module, function, errors));
        }

        Ok(result.data)
    }
}
