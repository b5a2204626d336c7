use serde::{Deserialize, Serialize};

use crate::record::model::{ChecklistItem, Verdict};

/// Count and share of one verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCount {
    pub count: usize,
    pub percent: u32,
}

/// Yes / Partial / No breakdown over the whole checklist.
///
/// Percentages are rounded independently and need not sum to 100.
/// Unrecognized verdicts count towards `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictDistribution {
    pub total: usize,
    pub yes: VerdictCount,
    pub partial: VerdictCount,
    pub no: VerdictCount,
}

/// Integer percentage rounded half up; 0 when `total` is 0.
pub fn rounded_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 * 100.0 / total as f64).round() as u32
}

pub fn verdict_distribution(checklist: &[ChecklistItem]) -> VerdictDistribution {
    let total = checklist.len();
    let tally = |verdict: Verdict| {
        let count = checklist.iter().filter(|i| i.verdict == verdict).count();
        VerdictCount {
            count,
            percent: rounded_percent(count, total),
        }
    };

    VerdictDistribution {
        total,
        yes: tally(Verdict::Yes),
        partial: tally(Verdict::Partial),
        no: tally(Verdict::No),
    }
}
