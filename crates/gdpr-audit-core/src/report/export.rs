//! Audit record export.
//!
//! The export is the normalized record itself, pretty-printed. Importing
//! it back yields an identical record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::AuditError;
use crate::record::model::AuditRecord;
use crate::util::domain::extract_domain;

pub fn export_json(record: &AuditRecord) -> Result<String, AuditError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn import_json(input: &str) -> Result<AuditRecord, AuditError> {
    Ok(serde_json::from_str(input)?)
}

/// `gdpr-audit-<domain>-<YYYY-MM-DD>.json`, with `unknown` for a blank domain.
pub fn export_file_name(record: &AuditRecord, date: NaiveDate) -> String {
    let domain = extract_domain(&record.domain);
    let domain = if domain.is_empty() { "unknown" } else { domain.as_str() };
    format!("gdpr-audit-{}-{}.json", domain, date.format("%Y-%m-%d"))
}

/// Write the export into `dir`, creating it if needed. Returns the file path.
pub fn write_export(
    record: &AuditRecord,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, AuditError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(record, date));
    fs::write(&path, export_json(record)?)?;

    info!(path = %path.display(), "audit exported");
    Ok(path)
}
