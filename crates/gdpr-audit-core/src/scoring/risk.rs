use serde::{Deserialize, Serialize};

use crate::record::model::AuditRecord;

/// Risk band for a compliance score out of 34.
///
/// Each band includes its lower bound:
///
///   - `>= 31`   → high compliance
///   - `25..=30` → moderate
///   - `16..=24` → elevated risk
///   - `< 16`    → high risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    HighRisk,
    ElevatedRisk,
    Moderate,
    HighCompliance,
}

impl RiskTier {
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= 31 => RiskTier::HighCompliance,
            s if s >= 25 => RiskTier::Moderate,
            s if s >= 16 => RiskTier::ElevatedRisk,
            _ => RiskTier::HighRisk,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskTier::HighCompliance => "🟢",
            RiskTier::Moderate => "🟡",
            RiskTier::ElevatedRisk => "🟠",
            RiskTier::HighRisk => "🔴",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::HighCompliance => "high-compliance",
            RiskTier::Moderate => "moderate",
            RiskTier::ElevatedRisk => "elevated-risk",
            RiskTier::HighRisk => "high-risk",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown next to the score: the scorecard's own icon if it has one.
pub fn risk_icon(record: &AuditRecord) -> String {
    record
        .scorecard
        .risk_icon
        .clone()
        .unwrap_or_else(|| RiskTier::from_score(record.compliance_score).icon().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_scores_map_to_expected_tiers() {
        let cases = [
            (15, RiskTier::HighRisk),
            (16, RiskTier::ElevatedRisk),
            (24, RiskTier::ElevatedRisk),
            (25, RiskTier::Moderate),
            (30, RiskTier::Moderate),
            (31, RiskTier::HighCompliance),
        ];

        for (score, tier) in cases {
            assert_eq!(RiskTier::from_score(score), tier, "score {score}");
        }
    }

    #[test]
    fn out_of_range_scores_still_classify() {
        assert_eq!(RiskTier::from_score(-5), RiskTier::HighRisk);
        assert_eq!(RiskTier::from_score(0), RiskTier::HighRisk);
        assert_eq!(RiskTier::from_score(100), RiskTier::HighCompliance);
    }

    #[test]
    fn tier_is_monotonic_in_score() {
        let tiers: Vec<RiskTier> = (0..=34).map(RiskTier::from_score).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn scorecard_icon_overrides_computed_icon() {
        let mut record = AuditRecord::empty("a.com");
        record.compliance_score = 10;
        assert_eq!(risk_icon(&record), "🔴");

        record.scorecard.risk_icon = Some("🟡".into());
        assert_eq!(risk_icon(&record), "🟡");
    }

    #[test]
    fn tier_serializes_kebab_case() {
        let s = serde_json::to_string(&RiskTier::ElevatedRisk).unwrap();
        assert_eq!(s, "\"elevated-risk\"");
        assert_eq!(RiskTier::HighCompliance.to_string(), "high-compliance");
    }
}
