use std::borrow::Cow;

use crate::record::model::{AuditRecord, ChecklistItem};

/// Checklist ids surfaced as key compliance indicators, in display order:
/// controller identity, consent before non-essential cookies, user rights.
pub const KEY_INDICATOR_IDS: [u64; 3] = [1, 13, 3];

/// Evidence longer than this is cut in previews.
pub const EVIDENCE_PREVIEW_CHARS: usize = 150;

/// Number of priority actions shown in compact views.
pub const COMPACT_ACTION_LIMIT: usize = 3;

/// Items for `ids`, in `ids` order. Unknown ids are skipped; with
/// duplicate ids the first checklist entry wins.
pub fn top_questions<'a>(checklist: &'a [ChecklistItem], ids: &[u64]) -> Vec<&'a ChecklistItem> {
    ids.iter()
        .filter_map(|id| checklist.iter().find(|item| item.id == *id))
        .collect()
}

/// A scan exists but no policy analysis has been produced yet.
pub fn is_api_queued(checklist: &[ChecklistItem]) -> bool {
    checklist.is_empty()
}

/// The first `limit` scorecard actions.
pub fn priority_actions(record: &AuditRecord, limit: usize) -> &[String] {
    let actions = &record.scorecard.priority_actions;
    &actions[..actions.len().min(limit)]
}

/// Evidence cut to [`EVIDENCE_PREVIEW_CHARS`] characters plus `...`.
pub fn evidence_preview(evidence: &str) -> Cow<'_, str> {
    match evidence.char_indices().nth(EVIDENCE_PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &evidence[..cut])),
        None => Cow::Borrowed(evidence),
    }
}
