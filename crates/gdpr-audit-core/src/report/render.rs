use std::fmt::Write;

use crate::TOOL_NAME;
use crate::record::model::AuditRecord;
use crate::report::model::AuditSummary;
use crate::scoring::cookies::category_icon;
use crate::scoring::indicators::{COMPACT_ACTION_LIMIT, evidence_preview, priority_actions};
use crate::scoring::parts::{Part, part_items};

pub fn render_text(record: &AuditRecord, summary: &AuditSummary) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, record, summary);
    out
}

fn write_report(out: &mut String, record: &AuditRecord, s: &AuditSummary) -> std::fmt::Result {
    writeln!(out, "{} {}", TOOL_NAME, s.tool.version)?;
    writeln!(out, "Domain: {}", s.domain)?;
    if let Some(ts) = &s.scan_timestamp {
        writeln!(out, "Scanned: {ts}")?;
    }
    writeln!(
        out,
        "Score: {} / {}  {} {}",
        s.score.compliance_score, s.score.max_score, s.score.compliance_level, s.score.risk_icon
    )?;

    for part in Part::ALL {
        match s.part(part) {
            Some(p) => writeln!(out, "{}: {} / {}", part.label(), p.score, p.max)?,
            None => writeln!(out, "{}: API Queue", part.label())?,
        }
    }

    writeln!(out, "\nCookie Analysis")?;
    writeln!(out, "  Total cookies: {}", s.cookies.total)?;
    writeln!(out, "  Set before consent: {}", s.cookies.set_before_consent)?;
    writeln!(
        out,
        "  Non-essential before consent: {}",
        s.cookies.non_essential_before_consent
    )?;
    if !s.cookies.categories.is_empty() {
        writeln!(out, "  Categories:")?;
        for c in &s.cookies.categories {
            writeln!(
                out,
                "    {} {}: {}",
                category_icon(&c.category),
                capitalize(&c.category),
                c.count
            )?;
        }
    }
    for cookie in &record.cookies {
        writeln!(
            out,
            "  - {} ({}) {} before-consent={} third-party={}{}",
            cookie.name,
            cookie.domain,
            cookie.category,
            yes_no(cookie.set_before_consent),
            yes_no(cookie.is_third_party),
            if cookie.is_consent_violation() { " [violation]" } else { "" }
        )?;
    }

    if s.api_queued {
        writeln!(
            out,
            "\nNote: Policy analysis is unavailable. This scan was created with minimal analysis due to API quota limits."
        )?;
        writeln!(out, "Cookie compliance information is shown above.")?;
        return Ok(());
    }

    let d = &s.distribution;
    writeln!(out, "\nCompliance Overview")?;
    writeln!(
        out,
        "  Overall Compliance: {}/{} ({}%)",
        d.yes.count, d.total, d.yes.percent
    )?;
    for p in &s.parts {
        writeln!(
            out,
            "  {}: {}/{} ({}%)",
            p.part.title(),
            p.yes_count,
            p.item_count,
            p.yes_percent
        )?;
    }
    writeln!(
        out,
        "  Verdicts: Yes {} ({}%), Partial {} ({}%), No {} ({}%)",
        d.yes.count, d.yes.percent, d.partial.count, d.partial.percent, d.no.count, d.no.percent
    )?;

    if !s.key_indicators.is_empty() {
        writeln!(out, "\nKey Compliance Indicators")?;
        for (n, item) in s.key_indicators.iter().enumerate() {
            writeln!(out, "  {}. {} [{}]", n + 1, item.question, item.verdict)?;
            if let Some(evidence) = item.evidence.as_deref().filter(|e| !e.is_empty()) {
                writeln!(out, "     Evidence: \"{}\"", evidence_preview(evidence))?;
            }
        }
    }

    writeln!(out, "\nCompliance Checklist")?;
    for part in Part::ALL {
        let items = part_items(&record.checklist, part);
        if items.is_empty() {
            continue;
        }
        writeln!(out, "  {}", part.heading())?;
        for item in items {
            writeln!(out, "    {}. {} [{}]", item.id, item.question, item.verdict)?;
        }
    }

    writeln!(out, "\nPriority Actions")?;
    let shown = priority_actions(record, COMPACT_ACTION_LIMIT);
    if shown.is_empty() {
        writeln!(out, "  No critical recommendations found. Good job!")?;
    }
    for action in shown {
        writeln!(out, "  - {action}")?;
    }
    if s.priority_actions.len() > shown.len() {
        writeln!(
            out,
            "  (+{} more in the JSON export)",
            s.priority_actions.len() - shown.len()
        )?;
    }

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::model::{ChecklistItem, Verdict};
    use crate::report::model::ToolInfo;

    fn tool() -> ToolInfo {
        ToolInfo {
            name: "gdpr-audit".into(),
            version: "0.1.0".into(),
        }
    }

    fn render(record: &AuditRecord) -> String {
        render_text(record, &AuditSummary::from_record(record, tool()))
    }

    #[test]
    fn queued_record_shows_api_queue() {
        let out = render(&AuditRecord::empty("queued.example"));

        assert!(out.contains("Policy Score: API Queue"));
        assert!(out.contains("Cookies Score: API Queue"));
        assert!(out.contains("Policy analysis is unavailable"));
        assert!(!out.contains("Compliance Checklist"));
    }

    #[test]
    fn analysed_record_lists_parts_and_evidence() {
        let mut record = AuditRecord::empty("a.com");
        record.compliance_score = 2;
        record.checklist = vec![ChecklistItem {
            id: 1,
            category: "PART A: GOVERNANCE".into(),
            question: "Is the controller named?".into(),
            verdict: Verdict::Yes,
            evidence: Some("x".repeat(200)),
            notes: None,
        }];

        let out = render(&record);

        assert!(out.contains("Policy Score: 2 / 2"));
        assert!(out.contains("Cookies Score: 0 / 0"));
        assert!(out.contains("PART A: General Governance & Data Subject Rights"));
        assert!(out.contains("1. Is the controller named? [Yes]"));
        assert!(out.contains(&format!("\"{}...\"", "x".repeat(150))));
    }

    #[test]
    fn no_actions_prints_all_clear() {
        let mut record = AuditRecord::empty("a.com");
        record.checklist = vec![ChecklistItem {
            id: 1,
            category: "PART A".into(),
            question: "q".into(),
            verdict: Verdict::Yes,
            evidence: None,
            notes: None,
        }];

        let out = render(&record);

        assert!(out.contains("Priority Actions\n  No critical recommendations found. Good job!"));
    }

    #[test]
    fn long_action_lists_are_cut() {
        let mut record = AuditRecord::empty("a.com");
        record.checklist = vec![ChecklistItem {
            id: 2,
            category: "PART B".into(),
            question: "q".into(),
            verdict: Verdict::No,
            evidence: None,
            notes: None,
        }];
        record.scorecard.priority_actions = (1..=5).map(|n| format!("action {n}")).collect();

        let out = render(&record);

        assert!(out.contains("  - action 3"));
        assert!(!out.contains("action 4"));
        assert!(out.contains("(+2 more in the JSON export)"));
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize("analytics"), "Analytics");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }
}
