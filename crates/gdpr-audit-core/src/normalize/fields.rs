//! Lenient field readers over untrusted JSON.
//!
//! Each reader returns `None` (or an empty collection) instead of failing,
//! so a wrong type in one field never discards the rest of the payload.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::record::model::{ChecklistItem, CookieRecord, Scorecard};

/// Follow `path` through nested objects.
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// A non-empty string; empty strings count as absent.
pub fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// An integer, accepting floats (rounded) and numeric strings.
pub fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A non-negative counter; anything else is 0.
pub fn counter(value: Option<&Value>) -> u64 {
    integer(value)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

/// String entries of an array; other entries are ignored.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Decode each array entry, skipping entries that do not fit `T`.
fn decode_entries<T: DeserializeOwned>(items: &[Value], what: &str) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed {what} entry");
                None
            }
        })
        .collect()
}

/// The first candidate holding an array, decoded as a checklist.
///
/// An empty array still wins: it is a meaningful "analysis unavailable".
pub fn checklist(candidates: &[Option<&Value>]) -> Vec<ChecklistItem> {
    candidates
        .iter()
        .find_map(|c| c.and_then(Value::as_array))
        .map(|items| decode_entries(items, "checklist"))
        .unwrap_or_default()
}

/// True when any candidate holds an array.
pub fn has_checklist(candidates: &[Option<&Value>]) -> bool {
    candidates.iter().any(|c| c.is_some_and(Value::is_array))
}

pub fn cookies(value: Option<&Value>) -> Vec<CookieRecord> {
    value
        .and_then(Value::as_array)
        .map(|items| decode_entries(items, "cookie"))
        .unwrap_or_default()
}

/// Read a scorecard object; absent or non-object yields the default.
pub fn scorecard(value: Option<&Value>) -> Scorecard {
    let Some(card) = value.filter(|v| v.is_object()) else {
        return Scorecard::default();
    };

    Scorecard {
        total_score: integer(card.get("total_score")),
        max_score: integer(card.get("max_score")),
        compliance_level: text(card.get("compliance_level")),
        risk_icon: text(card.get("risk_icon")),
        priority_actions: string_list(card.get("priority_actions")),
    }
}
