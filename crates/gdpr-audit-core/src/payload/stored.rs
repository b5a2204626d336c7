use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::payload::fence::strip_code_fence;

/// Marker stored alongside the raw text when a blob fails to parse.
pub const PARSE_ERROR_MARKER: &str = "Failed to parse JSON";

/// Outcome of parsing a stored `results` blob.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredResults {
    Parsed(Value),
    /// The blob was not valid JSON even after fence stripping.
    Unparsed { raw: String, error: String },
}

impl StoredResults {
    pub fn is_parsed(&self) -> bool {
        matches!(self, StoredResults::Parsed(_))
    }

    /// The value embedded as `data` in an API response.
    ///
    /// Unparsed blobs become `{ "raw": <text>, "error": <marker> }`.
    pub fn into_value(self) -> Value {
        match self {
            StoredResults::Parsed(v) => v,
            StoredResults::Unparsed { raw, error } => json!({ "raw": raw, "error": error }),
        }
    }
}

/// Parse a stored scanner blob. Never fails; bad input is kept verbatim.
pub fn parse_stored_results(raw: &str) -> StoredResults {
    match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(v) => StoredResults::Parsed(v),
        Err(e) => {
            warn!(error = %e, len = raw.len(), "stored results are not valid JSON");
            StoredResults::Unparsed {
                raw: raw.to_string(),
                error: PARSE_ERROR_MARKER.to_string(),
            }
        }
    }
}

/// One persisted scan, as the scanner writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRow {
    pub id: i64,
    pub hostname: String,
    pub created_at: String,
    /// Raw scanner output, possibly wrapped in a markdown fence.
    pub results: String,
}

impl ScanRow {
    /// Build the `GET /api/scan/{domain}` success body for this row.
    pub fn into_response(self) -> ScanResponse {
        ScanResponse {
            id: self.id,
            hostname: self.hostname,
            created_at: self.created_at,
            data: parse_stored_results(&self.results).into_value(),
        }
    }
}

/// Success body of the scan API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub id: i64,
    pub hostname: String,
    pub created_at: String,
    pub data: Value,
}

impl ScanResponse {
    pub fn into_payload(self) -> Value {
        json!({
            "id": self.id,
            "hostname": self.hostname,
            "created_at": self.created_at,
            "data": self.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(results: &str) -> ScanRow {
        ScanRow {
            id: 7,
            hostname: "www.elmundo.es".into(),
            created_at: "2025-01-10T09:00:00Z".into(),
            results: results.into(),
        }
    }

    #[test]
    fn parses_fenced_blob() {
        let parsed = parse_stored_results("```json\n{\"checklist\": []}\n```");
        assert_eq!(parsed, StoredResults::Parsed(json!({"checklist": []})));
    }

    #[test]
    fn malformed_blob_keeps_raw_text() {
        let raw = "```json\n{\"checklist\": [\n```";
        let parsed = parse_stored_results(raw);

        assert!(!parsed.is_parsed());
        assert_eq!(
            parsed.into_value(),
            json!({"raw": raw, "error": "Failed to parse JSON"})
        );
    }

    #[test]
    fn row_becomes_api_envelope() {
        let response = row("{\"scorecard\": {\"total_score\": 20}}").into_response();

        assert_eq!(response.id, 7);
        assert_eq!(response.hostname, "www.elmundo.es");
        assert_eq!(response.data["scorecard"]["total_score"], 20);

        let payload = response.into_payload();
        assert_eq!(payload["created_at"], "2025-01-10T09:00:00Z");
        assert!(payload["data"].is_object());
    }

    #[test]
    fn unparsable_row_still_produces_envelope() {
        let payload = row("Sorry, I cannot help with that.")
            .into_response()
            .into_payload();

        assert_eq!(payload["data"]["error"], "Failed to parse JSON");
        assert_eq!(payload["data"]["raw"], "Sorry, I cannot help with that.");
    }
}
