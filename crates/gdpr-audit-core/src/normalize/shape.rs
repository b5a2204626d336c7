//! Upstream payload shape detection.
//!
//! Shapes are recognised by an ordered rule table, evaluated top to
//! bottom; the first rule that matches decides the variant:
//!
//! | order | rule       | matches when                                         |
//! |-------|------------|------------------------------------------------------|
//! | 1     | `unparsed` | `data` is an object carrying `raw` and `error`       |
//! | 2     | `live`     | `data` is any other object                           |
//! | 3     | `flagged`  | top-level `found` is a boolean                       |
//! | 4     | `demo`     | a top-level or `gdpr_analysis` checklist array       |
//!
//! Anything else is [`PayloadShape::NotFound`]. The `data` envelope
//! therefore outranks an explicit `found` flag. Supporting a new producer
//! means appending a rule and a variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::normalize::fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// API envelope whose stored blob failed to parse.
    Unparsed,
    /// API envelope around live scanner output.
    Live,
    /// No envelope, but an explicit `found` flag.
    Flagged { found: bool },
    /// Legacy demo layout with top-level fields.
    Demo,
    NotFound,
}

type ShapeRule = fn(&Value) -> Option<PayloadShape>;

/// Detection rules in precedence order.
pub const SHAPE_RULES: &[(&str, ShapeRule)] = &[
    ("unparsed", unparsed_envelope),
    ("live", live_envelope),
    ("flagged", found_flag),
    ("demo", demo_checklist),
];

/// Paths probed for a checklist in the legacy demo layout, in order.
pub const DEMO_CHECKLIST_PATHS: &[&[&str]] = &[
    &["audit_checklist"],
    &["checklist"],
    &["gdpr_analysis", "audit_checklist"],
    &["gdpr_analysis", "checklist"],
];

/// Paths probed for a checklist in the live layout, in order.
pub const LIVE_CHECKLIST_PATHS: &[&[&str]] = &[
    &["data", "audit_checklist"],
    &["data", "checklist"],
    &["audit_checklist"],
];

pub fn detect_shape(raw: &Value) -> PayloadShape {
    let shape = SHAPE_RULES
        .iter()
        .find_map(|(name, rule)| {
            rule(raw).inspect(|shape| debug!(rule = *name, ?shape, "payload shape detected"))
        })
        .unwrap_or(PayloadShape::NotFound);

    if shape == PayloadShape::NotFound {
        debug!("no shape rule matched; treating payload as not found");
    }
    shape
}

fn envelope(raw: &Value) -> Option<&Value> {
    raw.get("data").filter(|d| d.is_object())
}

fn unparsed_envelope(raw: &Value) -> Option<PayloadShape> {
    let data = envelope(raw)?;
    let marked = data.get("raw").is_some_and(Value::is_string) && data.get("error").is_some();
    marked.then_some(PayloadShape::Unparsed)
}

fn live_envelope(raw: &Value) -> Option<PayloadShape> {
    envelope(raw).map(|_| PayloadShape::Live)
}

fn found_flag(raw: &Value) -> Option<PayloadShape> {
    raw.get("found")
        .and_then(Value::as_bool)
        .map(|found| PayloadShape::Flagged { found })
}

fn demo_checklist(raw: &Value) -> Option<PayloadShape> {
    let candidates = probe(raw, DEMO_CHECKLIST_PATHS);
    fields::has_checklist(&candidates).then_some(PayloadShape::Demo)
}

/// Resolve each path against `raw`, keeping order.
pub fn probe<'a>(raw: &'a Value, paths: &[&[&str]]) -> Vec<Option<&'a Value>> {
    paths.iter().map(|path| fields::at(raw, path)).collect()
}
