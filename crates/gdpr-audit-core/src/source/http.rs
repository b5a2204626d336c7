use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AuditError;
use crate::normalize::fields;
use crate::source::PayloadSource;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the scan API, e.g. `http://localhost:3000/api`.
    pub api_base: String,
    /// Whole-request deadline, connect through body.
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fetches the most recent scan for a domain from `GET {base}/scan/{domain}`.
///
/// Responses map as follows:
/// - 2xx with a JSON body → the body, handed to normalization untouched
/// - 404, or any error body with `found: false` → `NotFound`
/// - other statuses, timeouts, connection failures → `Transport`
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    api_base: Url,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, AuditError> {
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            AuditError::InvalidInput(format!("invalid API base URL {}: {e}", config.api_base))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(AuditError::InvalidInput(format!(
                "invalid API base URL {}",
                config.api_base
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuditError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self { client, api_base })
    }

    /// Scan endpoint for `domain`, percent-encoded as a single path segment.
    pub fn endpoint(&self, domain: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["scan", domain]);
        }
        url
    }
}

impl PayloadSource for HttpSource {
    fn load(&self, domain: &str) -> Result<Value, AuditError> {
        let url = self.endpoint(domain);
        debug!(%url, "fetching scan results");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| transport_error(&url, e))?;
        let parsed = serde_json::from_str::<Value>(&body).ok();

        if status.is_success() {
            return parsed.ok_or_else(|| {
                AuditError::Transport(format!("scan API returned a non-JSON body ({status})"))
            });
        }

        let flagged_missing = parsed
            .as_ref()
            .and_then(|v| v.get("found"))
            .and_then(Value::as_bool)
            == Some(false);

        if status == StatusCode::NOT_FOUND || flagged_missing {
            debug!(%domain, %status, "scan API has no results");
            return Err(AuditError::NotFound {
                domain: domain.to_string(),
            });
        }

        let message = parsed
            .as_ref()
            .and_then(|v| fields::text(v.get("message")).or_else(|| fields::text(v.get("error"))))
            .unwrap_or_else(|| format!("Failed to load scan results ({status})"));

        warn!(%status, %message, "scan API request failed");
        Err(AuditError::Transport(message))
    }
}

fn transport_error(url: &Url, e: reqwest::Error) -> AuditError {
    if e.is_timeout() {
        AuditError::Transport(format!("request to {url} timed out"))
    } else {
        AuditError::Transport(format!("request to {url} failed: {e}"))
    }
}
