pub mod error;
pub mod normalize;
pub mod payload;
pub mod record;
pub mod report;
pub mod scoring;
pub mod session;
pub mod source;
pub mod util;

use tracing::info;

use crate::error::AuditError;
use crate::record::model::AuditRecord;
use crate::source::PayloadSource;
use crate::util::domain::extract_domain;

pub const TOOL_NAME: &str = "gdpr-audit";

/// Version of the exported audit JSON layout.
/// Bump only when `AuditRecord` changes shape.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Load and normalize the audit for `input` from `source`.
///
/// `input` may be a full URL; it is reduced to a bare domain first.
/// A payload that normalizes to `found = false` becomes `AuditError::NotFound`.
/// Malformed or partial upstream data never fails here; it degrades inside
/// [`normalize::normalize`].
pub fn audit(source: &dyn PayloadSource, input: &str) -> Result<AuditRecord, AuditError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AuditError::InvalidInput(
            "Please enter a website URL".to_string(),
        ));
    }

    let domain = extract_domain(trimmed);
    if domain.is_empty() {
        return Err(AuditError::InvalidInput("Invalid domain.".to_string()));
    }

    let raw = source.load(&domain)?;
    let record = normalize::normalize(&raw);

    if !record.found {
        return Err(AuditError::NotFound { domain });
    }

    info!(
        domain = %record.domain,
        score = record.compliance_score,
        items = record.checklist.len(),
        cookies = record.cookies.len(),
        "audit loaded"
    );

    Ok(record)
}
