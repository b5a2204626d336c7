use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SCHEMA_VERSION;
use crate::record::model::{AuditRecord, ChecklistItem};
use crate::scoring::cookies::{CategoryCount, ConsentCounts, consent_counts, cookie_category_counts};
use crate::scoring::distribution::{VerdictDistribution, verdict_distribution};
use crate::scoring::indicators::{KEY_INDICATOR_IDS, is_api_queued, top_questions};
use crate::scoring::parts::{Part, PartSummary, overall_score};
use crate::scoring::risk::{RiskTier, risk_icon};

/// Maximum compliance score: 17 questions at 2 points each.
pub const MAX_COMPLIANCE_SCORE: i64 = 34;

/// Every display metric for one audit, computed once from the record.
///
/// This is what the presentation layer consumes; it holds no state of its
/// own and is rebuilt whenever the record changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub domain: String,
    pub scan_timestamp: Option<String>,
    pub score: ScoreInfo,
    /// Scan exists but the policy analysis has not been produced.
    pub api_queued: bool,
    /// Part A then Part B; empty while queued.
    pub parts: Vec<PartSummary>,
    pub overall_score: u32,
    pub distribution: VerdictDistribution,
    pub cookies: CookieStats,
    pub key_indicators: Vec<ChecklistItem>,
    pub priority_actions: Vec<String>,
}

impl AuditSummary {
    pub fn from_record(record: &AuditRecord, tool: ToolInfo) -> Self {
        let api_queued = is_api_queued(&record.checklist);
        let parts = if api_queued {
            vec![]
        } else {
            Part::ALL
                .iter()
                .map(|&part| PartSummary::for_part(&record.checklist, part))
                .collect()
        };

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            domain: record.domain.clone(),
            scan_timestamp: record.scan_timestamp.clone(),
            score: ScoreInfo::from_record(record),
            api_queued,
            parts,
            overall_score: overall_score(&record.checklist),
            distribution: verdict_distribution(&record.checklist),
            cookies: CookieStats::from_record(record),
            key_indicators: top_questions(&record.checklist, &KEY_INDICATOR_IDS)
                .into_iter()
                .cloned()
                .collect(),
            priority_actions: record.scorecard.priority_actions.clone(),
        }
    }

    pub fn part(&self, part: Part) -> Option<&PartSummary> {
        self.parts.iter().find(|p| p.part == part)
    }
}

/// Tool metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Headline score block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInfo {
    pub compliance_score: i64,
    pub max_score: i64,
    pub compliance_level: String,
    pub risk_tier: RiskTier,
    pub risk_icon: String,
}

impl ScoreInfo {
    pub fn from_record(record: &AuditRecord) -> Self {
        Self {
            compliance_score: record.compliance_score,
            max_score: record.scorecard.max_score.unwrap_or(MAX_COMPLIANCE_SCORE),
            compliance_level: record.compliance_level.clone(),
            risk_tier: RiskTier::from_score(record.compliance_score),
            risk_icon: risk_icon(record),
        }
    }
}

/// Cookie analysis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieStats {
    pub total: usize,
    /// As reported upstream.
    pub set_before_consent: u64,
    /// As reported upstream.
    pub non_essential_before_consent: u64,
    /// Recomputed from the cookie list; may disagree with upstream.
    pub observed: ConsentCounts,
    pub categories: Vec<CategoryCount>,
    /// Names of non-essential cookies set before consent.
    pub violations: Vec<String>,
}

impl CookieStats {
    pub fn from_record(record: &AuditRecord) -> Self {
        let observed = consent_counts(&record.cookies);
        if observed.set_before_consent != record.cookies_set_before_consent
            || observed.non_essential_before_consent != record.non_essential_before_consent
        {
            debug!(
                upstream = record.cookies_set_before_consent,
                observed = observed.set_before_consent,
                "before-consent counters differ from cookie list"
            );
        }

        Self {
            total: record.cookies.len(),
            set_before_consent: record.cookies_set_before_consent,
            non_essential_before_consent: record.non_essential_before_consent,
            observed,
            categories: cookie_category_counts(&record.cookies),
            violations: record
                .cookies
                .iter()
                .filter(|c| c.is_consent_violation())
                .map(|c| c.name.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::model::{CookieRecord, Verdict};

    fn tool() -> ToolInfo {
        ToolInfo {
            name: "gdpr-audit".into(),
            version: "0.1.0-test".into(),
        }
    }

    fn item(id: u64, category: &str, verdict: Verdict) -> ChecklistItem {
        ChecklistItem {
            id,
            category: category.into(),
            question: format!("q{id}"),
            verdict,
            evidence: None,
            notes: None,
        }
    }

    #[test]
    fn queued_record_has_no_parts() {
        let mut record = AuditRecord::empty("queued.example");
        record.cookies.push(CookieRecord {
            name: "_ga".into(),
            domain: ".queued.example".into(),
            category: "analytics".into(),
            set_before_consent: true,
            is_third_party: false,
        });
        record.cookies_set_before_consent = 1;

        let summary = AuditSummary::from_record(&record, tool());

        assert!(summary.api_queued);
        assert!(summary.parts.is_empty());
        assert!(summary.key_indicators.is_empty());
        assert_eq!(summary.cookies.total, 1);
        assert_eq!(summary.cookies.violations, vec!["_ga"]);
        assert_eq!(summary.cookies.observed.non_essential_before_consent, 1);
        assert_eq!(summary.cookies.non_essential_before_consent, 0);
        assert_eq!(summary.distribution.total, 0);
    }

    #[test]
    fn score_block_uses_defaults() {
        let summary = AuditSummary::from_record(&AuditRecord::empty("a.com"), tool());

        assert_eq!(summary.score.compliance_score, 0);
        assert_eq!(summary.score.max_score, 34);
        assert_eq!(summary.score.compliance_level, "Unknown");
        assert_eq!(summary.score.risk_tier, RiskTier::HighRisk);
        assert_eq!(summary.score.risk_icon, "🔴");
        assert_eq!(summary.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn parts_are_ordered_a_then_b() {
        let mut record = AuditRecord::empty("a.com");
        record.checklist = vec![
            item(7, "PART B: COOKIES", Verdict::Yes),
            item(1, "PART A: GOVERNANCE", Verdict::Partial),
        ];

        let summary = AuditSummary::from_record(&record, tool());

        assert_eq!(summary.parts[0].part, Part::A);
        assert_eq!(summary.part(Part::A).unwrap().score, 1);
        assert_eq!(summary.part(Part::B).unwrap().score, 2);
        assert_eq!(summary.overall_score, 3);
        assert_eq!(summary.key_indicators.len(), 1);
    }
}
