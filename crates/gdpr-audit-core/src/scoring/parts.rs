//! Part A / Part B sub-scores.
//!
//! Items are assigned to a part by substring containment on their
//! category, so `"PART B: COOKIES & TRACKING TRANSPARENCY"` is Part B.
//! Items matching neither marker still count in overall totals but in no
//! part total.

use serde::{Deserialize, Serialize};

use crate::record::model::{ChecklistItem, Verdict};
use crate::scoring::distribution::rounded_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    /// General governance and data subject rights.
    A,
    /// Cookies and tracking transparency.
    B,
}

impl Part {
    pub const ALL: [Part; 2] = [Part::A, Part::B];

    /// Substring identifying this part inside a category.
    pub fn marker(self) -> &'static str {
        match self {
            Part::A => "PART A",
            Part::B => "PART B",
        }
    }

    /// Label used in the compliance overview.
    pub fn title(self) -> &'static str {
        match self {
            Part::A => "Part A: Governance",
            Part::B => "Part B: Cookies",
        }
    }

    /// Short label used next to the sub-score.
    pub fn label(self) -> &'static str {
        match self {
            Part::A => "Policy Score",
            Part::B => "Cookies Score",
        }
    }

    /// Section heading for the checklist listing.
    pub fn heading(self) -> &'static str {
        match self {
            Part::A => "PART A: General Governance & Data Subject Rights",
            Part::B => "PART B: Cookies & Tracking Transparency",
        }
    }

    pub fn contains(self, item: &ChecklistItem) -> bool {
        item.category.contains(self.marker())
    }
}

/// Items of `part`, in checklist order.
pub fn part_items(checklist: &[ChecklistItem], part: Part) -> Vec<&ChecklistItem> {
    checklist.iter().filter(|item| part.contains(item)).collect()
}

/// Yes = 2, Partial = 1, anything else = 0.
pub fn part_score<'a>(items: impl IntoIterator<Item = &'a ChecklistItem>) -> u32 {
    items.into_iter().map(|item| item.verdict.points()).sum()
}

/// Two points per item.
pub fn part_max<'a>(items: impl IntoIterator<Item = &'a ChecklistItem>) -> u32 {
    items.into_iter().count() as u32 * 2
}

/// Part A plus Part B score; unclassified items add nothing.
pub fn overall_score(checklist: &[ChecklistItem]) -> u32 {
    Part::ALL
        .iter()
        .map(|&part| part_score(part_items(checklist, part)))
        .sum()
}

/// Everything shown for one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSummary {
    pub part: Part,
    pub score: u32,
    pub max: u32,
    pub item_count: usize,
    pub yes_count: usize,
    /// Share of Yes verdicts; 0 for an empty part.
    pub yes_percent: u32,
}

impl PartSummary {
    pub fn for_part(checklist: &[ChecklistItem], part: Part) -> Self {
        let items = part_items(checklist, part);
        let yes_count = items.iter().filter(|i| i.verdict == Verdict::Yes).count();

        Self {
            part,
            score: part_score(items.iter().copied()),
            max: part_max(items.iter().copied()),
            item_count: items.len(),
            yes_count,
            yes_percent: rounded_percent(yes_count, items.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, category: &str, verdict: &str) -> ChecklistItem {
        ChecklistItem {
            id,
            category: category.into(),
            question: format!("question {id}"),
            verdict: Verdict::from(verdict.to_string()),
            evidence: None,
            notes: None,
        }
    }

    fn sample() -> Vec<ChecklistItem> {
        vec![
            item(1, "PART A: GENERAL GOVERNANCE & DATA SUBJECT RIGHTS", "Yes"),
            item(2, "PART B: COOKIES & TRACKING TRANSPARENCY", "Partial"),
            item(3, "PART A: GENERAL GOVERNANCE & DATA SUBJECT RIGHTS", "No"),
            item(4, "PART C: SECURITY", "Yes"),
            item(5, "PART B: COOKIES & TRACKING TRANSPARENCY", "Yes"),
        ]
    }

    #[test]
    fn classification_is_substring_based() {
        let checklist = sample();

        let a: Vec<u64> = part_items(&checklist, Part::A).iter().map(|i| i.id).collect();
        let b: Vec<u64> = part_items(&checklist, Part::B).iter().map(|i| i.id).collect();

        assert_eq!(a, vec![1, 3]);
        assert_eq!(b, vec![2, 5]);
    }

    #[test]
    fn marker_match_is_case_sensitive() {
        let checklist = vec![item(1, "part a: governance", "Yes")];
        assert!(part_items(&checklist, Part::A).is_empty());
    }

    #[test]
    fn scores_and_max() {
        let checklist = sample();
        let a = part_items(&checklist, Part::A);
        let b = part_items(&checklist, Part::B);

        assert_eq!(part_score(a.iter().copied()), 2);
        assert_eq!(part_max(a.iter().copied()), 4);
        assert_eq!(part_score(b.iter().copied()), 3);
        assert_eq!(part_max(b.iter().copied()), 4);
    }

    #[test]
    fn unclassified_items_do_not_contribute() {
        assert_eq!(overall_score(&sample()), 5);
    }

    #[test]
    fn unrecognized_verdicts_score_zero() {
        let checklist = vec![item(1, "PART A", "yes"), item(2, "PART A", "N/A")];
        assert_eq!(part_score(&checklist), 0);
        assert_eq!(part_max(&checklist), 4);
    }

    #[test]
    fn score_is_monotonic_in_verdict() {
        let ladder = ["No", "Partial", "Yes"];
        let mut checklist: Vec<ChecklistItem> =
            (1..=4).map(|id| item(id, "PART B", "No")).collect();

        let mut previous = part_score(&checklist);
        for index in 0..checklist.len() {
            for verdict in ladder {
                checklist[index].verdict = Verdict::from(verdict.to_string());
                let score = part_score(&checklist);
                assert!(score >= previous, "score dropped at item {index} → {verdict}");
                previous = score;
            }
        }
        assert_eq!(previous, 8);
    }

    #[test]
    fn empty_part_summary_is_all_zero() {
        let summary = PartSummary::for_part(&[], Part::B);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.max, 0);
        assert_eq!(summary.yes_percent, 0);
    }

    #[test]
    fn part_summary_counts_yes() {
        let summary = PartSummary::for_part(&sample(), Part::B);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.yes_count, 1);
        assert_eq!(summary.yes_percent, 50);
        assert_eq!(summary.score, 3);
        assert_eq!(summary.max, 4);
    }
}
