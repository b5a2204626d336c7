//! Raw payload → canonical [`AuditRecord`].
//!
//! `normalize` is total: every input, however malformed, yields a record.
//! The shape decides where each field is read from; see [`shape`] for the
//! detection order.

pub mod fields;
pub mod shape;

use serde_json::Value;
use tracing::warn;

use crate::payload::stored::PARSE_ERROR_MARKER;
use crate::record::model::{AuditRecord, UNKNOWN_LEVEL, UpstreamDiagnostics};
use shape::{DEMO_CHECKLIST_PATHS, LIVE_CHECKLIST_PATHS, PayloadShape, detect_shape, probe};

pub fn normalize(raw: &Value) -> AuditRecord {
    match detect_shape(raw) {
        PayloadShape::Unparsed => from_unparsed(raw),
        PayloadShape::Live => from_live(raw),
        PayloadShape::Flagged { found: true } | PayloadShape::Demo => from_demo(raw),
        PayloadShape::Flagged { found: false } | PayloadShape::NotFound => {
            AuditRecord::not_found(domain_of(raw))
        }
    }
}

/// `hostname` (live) wins over `domain` (demo).
fn domain_of(raw: &Value) -> String {
    fields::text(raw.get("hostname"))
        .or_else(|| fields::text(raw.get("domain")))
        .unwrap_or_default()
}

fn from_live(raw: &Value) -> AuditRecord {
    let data = &raw["data"];
    let scorecard = fields::scorecard(data.get("scorecard"));

    AuditRecord {
        found: true,
        domain: domain_of(raw),
        scan_timestamp: fields::text(raw.get("created_at")),
        compliance_score: scorecard.total_score.unwrap_or(0),
        compliance_level: scorecard
            .compliance_level
            .clone()
            .unwrap_or_else(|| UNKNOWN_LEVEL.to_string()),
        checklist: fields::checklist(&probe(raw, LIVE_CHECKLIST_PATHS)),
        scorecard,
        cookies: fields::cookies(data.get("cookies")),
        cookies_set_before_consent: fields::counter(data.get("cookies_set_before_consent")),
        non_essential_before_consent: fields::counter(data.get("non_essential_before_consent")),
        diagnostics: None,
    }
}

fn from_demo(raw: &Value) -> AuditRecord {
    let scorecard = fields::scorecard(
        fields::at(raw, &["gdpr_analysis", "scorecard"]).or_else(|| raw.get("scorecard")),
    );

    AuditRecord {
        found: true,
        domain: domain_of(raw),
        scan_timestamp: fields::text(raw.get("scan_timestamp")),
        compliance_score: fields::integer(raw.get("compliance_score"))
            .or(scorecard.total_score)
            .unwrap_or(0),
        compliance_level: fields::text(raw.get("compliance_level"))
            .or_else(|| scorecard.compliance_level.clone())
            .unwrap_or_else(|| UNKNOWN_LEVEL.to_string()),
        checklist: fields::checklist(&probe(raw, DEMO_CHECKLIST_PATHS)),
        scorecard,
        cookies: fields::cookies(raw.get("cookies")),
        cookies_set_before_consent: fields::counter(raw.get("cookies_set_before_consent")),
        non_essential_before_consent: fields::counter(raw.get("non_essential_before_consent")),
        diagnostics: None,
    }
}

/// A scan exists but its blob is unreadable: keep the raw text, show no analysis.
fn from_unparsed(raw: &Value) -> AuditRecord {
    let data = &raw["data"];
    let diagnostics = UpstreamDiagnostics {
        raw: data["raw"].as_str().unwrap_or_default().to_string(),
        error: fields::text(data.get("error"))
            .unwrap_or_else(|| PARSE_ERROR_MARKER.to_string()),
    };

    let domain = domain_of(raw);
    warn!(%domain, error = %diagnostics.error, "upstream analysis unreadable; showing empty checklist");

    AuditRecord {
        scan_timestamp: fields::text(raw.get("created_at")),
        diagnostics: Some(diagnostics),
        ..AuditRecord::empty(domain)
    }
}
