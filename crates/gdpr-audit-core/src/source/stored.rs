use anyhow::{Context, Result};
use serde_json::Value;
use std::{fs, path::Path};
use tracing::debug;

use crate::error::AuditError;
use crate::payload::stored::ScanRow;
use crate::source::PayloadSource;

/// A scanner `results` blob read from disk, served through the same
/// envelope the scan API builds around a database row.
#[derive(Debug, Clone)]
pub struct StoredBlobSource {
    row: ScanRow,
}

impl StoredBlobSource {
    pub fn new(row: ScanRow) -> Self {
        Self { row }
    }

    /// Read a blob file and attribute it to `hostname`.
    ///
    /// The file's modification time stands in for the row's `created_at`.
    pub fn from_path(path: &Path, hostname: &str) -> Result<Self> {
        let results = fs::read_to_string(path)
            .with_context(|| format!("failed to read stored results: {}", path.display()))?;

        let created_at = fs::metadata(path)
            .and_then(|m| m.modified())
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339())
            .unwrap_or_default();

        Ok(Self::new(ScanRow {
            id: 0,
            hostname: hostname.to_string(),
            created_at,
            results,
        }))
    }

    /// Exact or partial hostname match, like the API's row lookup.
    /// An empty domain matches nothing.
    fn matches(&self, domain: &str) -> bool {
        !domain.is_empty()
            && (self.row.hostname == domain || self.row.hostname.contains(domain))
    }
}

impl PayloadSource for StoredBlobSource {
    fn load(&self, domain: &str) -> Result<Value, AuditError> {
        if !self.matches(domain) {
            return Err(AuditError::NotFound {
                domain: domain.to_string(),
            });
        }

        debug!(hostname = %self.row.hostname, "serving stored results blob");
        Ok(self.row.clone().into_response().into_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn blob_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn wraps_blob_in_api_envelope() {
        let file = blob_file("```json\n{\"checklist\": []}\n```");
        let source = StoredBlobSource::from_path(file.path(), "www.elmundo.es").unwrap();

        let payload = source.load("elmundo.es").unwrap();
        assert_eq!(payload["hostname"], "www.elmundo.es");
        assert_eq!(payload["data"]["checklist"], serde_json::json!([]));
        assert!(payload["created_at"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn unrelated_domain_is_not_found() {
        let file = blob_file("{}");
        let source = StoredBlobSource::from_path(file.path(), "www.elmundo.es").unwrap();

        assert!(matches!(
            source.load("example.com"),
            Err(AuditError::NotFound { .. })
        ));
    }

    #[test]
    fn empty_domain_is_not_found() {
        let file = blob_file("{}");
        let source = StoredBlobSource::from_path(file.path(), "www.elmundo.es").unwrap();

        assert!(matches!(source.load(""), Err(AuditError::NotFound { .. })));
    }

    #[test]
    fn missing_file_returns_error() {
        let result = StoredBlobSource::from_path(Path::new("non_existent.json"), "a.com");
        assert!(result.is_err());
    }
}
