use serde_json::Value;
use tracing::debug;

use crate::error::AuditError;
use crate::source::PayloadSource;

/// Built-in demo audit in the legacy top-level layout.
pub const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo_audit.json");

/// Serves one fixed payload regardless of the requested domain.
///
/// Defaults to [`DEMO_FIXTURE`]; tests inject their own payload.
#[derive(Debug, Clone)]
pub struct DemoSource {
    payload: String,
}

impl DemoSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn from_value(payload: &Value) -> Self {
        Self::new(payload.to_string())
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new(DEMO_FIXTURE)
    }
}

impl PayloadSource for DemoSource {
    fn load(&self, domain: &str) -> Result<Value, AuditError> {
        debug!(%domain, "serving demo payload");
        Ok(serde_json::from_str(&self.payload)?)
    }
}
