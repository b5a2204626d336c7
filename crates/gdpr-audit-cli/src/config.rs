use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use gdpr_audit_core::source::HttpSourceConfig;
use gdpr_audit_core::source::http::{DEFAULT_API_BASE, DEFAULT_TIMEOUT};

/// Settings read from the environment, layered over `.env` files.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_base: String,
    pub timeout_secs: u64,
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv_layers();

        Ok(Self {
            api_base: read_optional_string("GDPR_AUDIT_API_BASE", DEFAULT_API_BASE),
            timeout_secs: read_optional_u64("GDPR_AUDIT_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?,
        })
    }

    /// Command-line flags win over the environment.
    pub fn http_source_config(
        &self,
        api_base: Option<String>,
        timeout_secs: Option<u64>,
    ) -> HttpSourceConfig {
        HttpSourceConfig {
            api_base: api_base.unwrap_or_else(|| self.api_base.clone()),
            timeout: Duration::from_secs(timeout_secs.unwrap_or(self.timeout_secs)),
        }
    }
}

fn read_optional_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn read_optional_u64(key: &str, default: u64) -> Result<u64> {
    parse_u64(key, env::var(key).ok(), default)
}

fn parse_u64(key: &str, value: Option<String>, default: u64) -> Result<u64> {
    match value {
        Some(v) => v.trim().parse::<u64>().with_context(|| format!("invalid {key}: {v}")),
        None => Ok(default),
    }
}

fn load_dotenv_layers() {
    for path in [".env", "../.env"] {
        let _ = dotenvy::from_path(path);
    }
}
