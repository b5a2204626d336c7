use serde::{Deserialize, Deserializer, Serialize};

/// Canonical audit view model.
///
/// This is the output of [`crate::normalize::normalize`] and the layout of
/// exported reports. Every field has a documented default so that partial
/// upstream payloads still produce a complete record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// `false` only when no scan exists for the domain.
    pub found: bool,
    pub domain: String,
    #[serde(default)]
    pub scan_timestamp: Option<String>,
    #[serde(default)]
    pub compliance_score: i64,
    #[serde(default = "unknown_level")]
    pub compliance_level: String,
    /// Upstream order; an empty list means policy analysis is unavailable.
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub scorecard: Scorecard,
    #[serde(default)]
    pub cookies: Vec<CookieRecord>,
    #[serde(default)]
    pub cookies_set_before_consent: u64,
    #[serde(default)]
    pub non_essential_before_consent: u64,
    /// Present when the stored blob could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<UpstreamDiagnostics>,
}

pub const UNKNOWN_LEVEL: &str = "Unknown";

fn unknown_level() -> String {
    UNKNOWN_LEVEL.to_string()
}

impl AuditRecord {
    /// A found record with every field at its default.
    pub fn empty(domain: impl Into<String>) -> Self {
        Self {
            found: true,
            domain: domain.into(),
            scan_timestamp: None,
            compliance_score: 0,
            compliance_level: unknown_level(),
            checklist: vec![],
            scorecard: Scorecard::default(),
            cookies: vec![],
            cookies_set_before_consent: 0,
            non_essential_before_consent: 0,
            diagnostics: None,
        }
    }

    pub fn not_found(domain: impl Into<String>) -> Self {
        Self {
            found: false,
            ..Self::empty(domain)
        }
    }
}

/// One compliance question with its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Checklist verdict, matched case-sensitively.
///
/// Anything other than `Yes`, `Partial` or `No` is kept verbatim so that
/// exports reproduce the upstream text; it scores zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Yes,
    Partial,
    No,
    Unrecognized(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Yes => "Yes",
            Verdict::Partial => "Partial",
            Verdict::No => "No",
            Verdict::Unrecognized(s) => s,
        }
    }

    /// Points contributed to a part score.
    pub fn points(&self) -> u32 {
        match self {
            Verdict::Yes => 2,
            Verdict::Partial => 1,
            Verdict::No | Verdict::Unrecognized(_) => 0,
        }
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Verdict::Unrecognized(String::new())
    }
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Yes" => Verdict::Yes,
            "Partial" => Verdict::Partial,
            "No" => Verdict::No,
            _ => Verdict::Unrecognized(s),
        }
    }
}

impl From<Verdict> for String {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cookie observed by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// Free-form category; unknown values pass through.
    #[serde(default = "other_category", deserialize_with = "category_or_other")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub set_before_consent: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_third_party: bool,
}

pub const ESSENTIAL_CATEGORY: &str = "essential";
pub const OTHER_CATEGORY: &str = "other";

fn other_category() -> String {
    OTHER_CATEGORY.to_string()
}

impl CookieRecord {
    pub fn is_essential(&self) -> bool {
        self.category == ESSENTIAL_CATEGORY
    }

    /// Set before consent without being strictly necessary.
    pub fn is_consent_violation(&self) -> bool {
        self.set_before_consent && !self.is_essential()
    }
}

/// Upstream-computed aggregate, when the scanner produced one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_icon: Option<String>,
    #[serde(default)]
    pub priority_actions: Vec<String>,
}

/// Raw text kept for diagnostics when the stored blob failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamDiagnostics {
    pub raw: String,
    pub error: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn category_or_other<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let category = Option::<String>::deserialize(deserializer)?;
    Ok(category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(other_category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verdict_is_case_sensitive() {
        assert_eq!(Verdict::from("Yes".to_string()), Verdict::Yes);
        assert_eq!(
            Verdict::from("yes".to_string()),
            Verdict::Unrecognized("yes".into())
        );
        assert_eq!(Verdict::from("yes".to_string()).points(), 0);
    }

    #[test]
    fn verdict_serializes_as_stored_text() {
        let v = serde_json::to_string(&Verdict::Partial).unwrap();
        assert_eq!(v, "\"Partial\"");

        let odd = serde_json::to_string(&Verdict::Unrecognized("N/A".into())).unwrap();
        assert_eq!(odd, "\"N/A\"");
    }

    #[test]
    fn checklist_item_tolerates_nulls_and_missing_fields() {
        let item: ChecklistItem = serde_json::from_value(json!({
            "id": 4,
            "category": null,
            "verdict": "No"
        }))
        .unwrap();

        assert_eq!(item.id, 4);
        assert_eq!(item.category, "");
        assert_eq!(item.question, "");
        assert_eq!(item.verdict, Verdict::No);
        assert!(item.evidence.is_none());
    }

    #[test]
    fn cookie_category_defaults_to_other() {
        let missing: CookieRecord = serde_json::from_value(json!({"name": "a"})).unwrap();
        let empty: CookieRecord =
            serde_json::from_value(json!({"name": "b", "category": ""})).unwrap();
        let custom: CookieRecord =
            serde_json::from_value(json!({"name": "c", "category": "functional"})).unwrap();

        assert_eq!(missing.category, "other");
        assert_eq!(empty.category, "other");
        assert_eq!(custom.category, "functional");
        assert!(!missing.set_before_consent);
    }

    #[test]
    fn consent_violation_excludes_essential() {
        let cookie = |category: &str, before: bool| CookieRecord {
            name: "x".into(),
            domain: ".example.com".into(),
            category: category.into(),
            set_before_consent: before,
            is_third_party: false,
        };

        assert!(cookie("analytics", true).is_consent_violation());
        assert!(!cookie("essential", true).is_consent_violation());
        assert!(!cookie("advertising", false).is_consent_violation());
    }

    #[test]
    fn not_found_record_keeps_defaults() {
        let record = AuditRecord::not_found("example.com");
        assert!(!record.found);
        assert_eq!(record.compliance_score, 0);
        assert_eq!(record.compliance_level, "Unknown");
        assert!(record.checklist.is_empty());
    }
}
