//! Statement of Applicability rendering.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::records::types::ComplianceStatus;
use crate::shared::utils::{escape_pipes, truncate_chars};

use super::types::GapSummary;

const QUESTION_MAX_CHARS: usize = 50;
const JUSTIFICATION_MAX_CHARS: usize = 80;

/// Annex A range markers checked in order; the first substring hit wins.
const CONTROL_GROUPS: &[(&[&str], &str)] = &[
    (&["A.6"], "Human Resource Controls"),
    (&["A.7"], "Physical Controls"),
    (&["A.8"], "Technological Controls"),
    (&["A.9"], "Access Control"),
    (&["A.10", "A.11", "A.12"], "Cryptographic & Operations Controls"),
    (&["A.13"], "Communications Security"),
    (&["A.14"], "System Acquisition & Development"),
    (&["A.15"], "Supplier Relationships"),
    (&["A.16"], "Incident Management"),
    (&["A.17"], "Business Continuity"),
    (&["A.18"], "Compliance"),
];
const DEFAULT_CONTROL_GROUP: &str = "Organisational Controls";

pub fn control_group(standard_ref: &str) -> &'static str {
    CONTROL_GROUPS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| standard_ref.contains(m)))
        .map_or(DEFAULT_CONTROL_GROUP, |(_, group)| *group)
}

pub fn implementation_status(compliance: ComplianceStatus) -> &'static str {
    match compliance {
        ComplianceStatus::FullyCompliant => "Implemented",
        ComplianceStatus::PartiallyCompliant => "Partially Implemented",
        ComplianceStatus::NotCompliant | ComplianceStatus::NotApplicable => "Planned",
    }
}

fn justification(gap: &GapSummary) -> String {
    let base = if gap.compliance == ComplianceStatus::NotApplicable {
        "Not applicable to our business context"
    } else {
        "Required based on risk assessment"
    };
    let text = match gap.notes.as_deref().filter(|n| !n.is_empty()) {
        Some(notes) => format!("{base}; {notes}"),
        None => base.to_string(),
    };
    truncate_chars(&text, JUSTIFICATION_MAX_CHARS)
}

fn soa_row(gap: &GapSummary) -> String {
    let applicable = if gap.compliance == ComplianceStatus::NotApplicable {
        "No"
    } else {
        "Yes"
    };
    let cells = [
        control_group(&gap.standard_ref).to_string(),
        gap.standard_ref.clone(),
        "[Control Name]".to_string(),
        truncate_chars(&gap.assessment_question, QUESTION_MAX_CHARS),
        applicable.to_string(),
        justification(gap),
        implementation_status(gap.compliance).to_string(),
        "[Comment]".to_string(),
    ];
    let escaped: Vec<String> = cells.iter().map(|c| escape_pipes(c)).collect();
    format!("| {} |\n", escaped.join(" | "))
}

/// One matrix row per distinct `standard_ref`, in the order each reference is
/// first seen. Later rows repeating a reference are ignored.
pub fn render_statement_of_applicability(gaps: &[GapSummary], today: NaiveDate) -> String {
    let date = today.format("%Y-%m-%d");
    let mut out = String::new();

    out.push_str("# STATEMENT OF APPLICABILITY (SoA)\n\n");
    out.push_str("**Classification:** Internal\n");
    out.push_str("This document should not be shared outside of [Company Name] without the written permission of the owner.\n\n");

    out.push_str("| Version | Approved By | Owner | Date Last Updated | Review Frequency | Next Review | Comments |\n");
    out.push_str("|---------|-------------|-------|-------------------|------------------|-------------|----------|\n");
    out.push_str(&format!("| 1.0 | [Name] | [Name] | {date} | Annually | [Date] | |\n\n"));

    out.push_str("## Purpose\n");
    out.push_str("This Statement of Applicability identifies which Annex A controls are applicable to the ISMS and provides justification for their inclusion or exclusion, as required by Clause 6.1.3 of ISO 27001:2022.\n\n");

    out.push_str("## Control Applicability Matrix\n\n");
    out.push_str("| Control Group | Ref | Name | Control | Applicable (Yes/No) | Justification for any exclusion | Implementation Status | Comment |\n");
    out.push_str("|---------------|-----|------|---------|---------------------|--------------------------------|----------------------|----------|\n");

    let mut seen: HashSet<&str> = HashSet::new();
    for gap in gaps {
        if seen.insert(gap.standard_ref.as_str()) {
            out.push_str(&soa_row(gap));
        }
    }

    out.push_str("\n## Notes\n");
    out.push_str("- This SoA is based on the current gap assessment results\n");
    out.push_str("- Controls marked as 'Not Applicable' have been excluded with documented justification\n");
    out.push_str("- This document shall be reviewed at least annually or when significant changes occur\n");
    out.push_str("- Implementation status reflects the current state as of the last assessment\n\n");

    out.push_str("## Approval\n");
    out.push_str("- **Prepared by:** [Name]\n");
    out.push_str("- **Reviewed by:** [Name]\n");
    out.push_str("- **Approved by:** [Name]\n");
    out.push_str(&format!("- **Date:** {date}\n"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(standard_ref: &str, compliance: ComplianceStatus, notes: Option<&str>) -> GapSummary {
        GapSummary {
            standard_ref: standard_ref.to_string(),
            assessment_question: "Is the control in place?".to_string(),
            compliance,
            notes: notes.map(str::to_string),
        }
    }

    fn matrix_rows(doc: &str) -> Vec<&str> {
        doc.lines()
            .skip_while(|l| !l.starts_with("| Control Group"))
            .skip(2)
            .take_while(|l| l.starts_with('|'))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[test]
    fn test_control_groups() {
        assert_eq!(control_group("A.6.3"), "Human Resource Controls");
        assert_eq!(control_group("A.9.1"), "Access Control");
        assert_eq!(control_group("A.11.2"), "Cryptographic & Operations Controls");
        assert_eq!(control_group("A.18.1"), "Compliance");
        assert_eq!(control_group("A.5.1"), "Organisational Controls");
        assert_eq!(control_group("Clause-4.1"), "Organisational Controls");
    }

    #[test]
    fn test_duplicate_refs_keep_first_row() {
        let gaps = vec![
            summary("A.9.1", ComplianceStatus::FullyCompliant, None),
            summary("A.9.1", ComplianceStatus::NotApplicable, Some("ignored")),
        ];
        let doc = render_statement_of_applicability(&gaps, today());
        let rows = matrix_rows(&doc);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            "| Access Control | A.9.1 | [Control Name] | Is the control in place? | Yes | Required based on risk assessment | Implemented | [Comment] |"
        );
    }

    #[test]
    fn test_rows_follow_input_order() {
        let gaps = vec![
            summary("A.5.1", ComplianceStatus::NotCompliant, None),
            summary("A.8.2", ComplianceStatus::PartiallyCompliant, None),
            summary("A.5.1", ComplianceStatus::FullyCompliant, None),
            summary("A.6.1", ComplianceStatus::NotApplicable, None),
        ];
        let doc = render_statement_of_applicability(&gaps, today());
        let refs: Vec<&str> = matrix_rows(&doc)
            .iter()
            .map(|row| row.split(" | ").nth(1).unwrap())
            .collect();
        assert_eq!(refs, vec!["A.5.1", "A.8.2", "A.6.1"]);
        assert_eq!(doc, render_statement_of_applicability(&gaps, today()));
    }

    #[test]
    fn test_not_applicable_and_truncation() {
        let long_notes = "x".repeat(100);
        let mut gap = summary("A.7.4", ComplianceStatus::NotApplicable, Some(&long_notes));
        gap.assessment_question = "q".repeat(60);
        let doc = render_statement_of_applicability(&[gap], today());
        let row = matrix_rows(&doc)[0];
        let cells: Vec<&str> = row.trim_matches('|').split(" | ").map(str::trim).collect();

        assert_eq!(cells[0], "Physical Controls");
        assert_eq!(cells[3], format!("{}...", "q".repeat(50)));
        assert_eq!(cells[4], "No");
        assert_eq!(cells[5].chars().count(), 83);
        assert!(cells[5].starts_with("Not applicable to our business context; xxx"));
        assert_eq!(cells[6], "Planned");
    }

    #[test]
    fn test_pipes_escaped_and_dates() {
        let gaps = vec![summary("A.9.2", ComplianceStatus::PartiallyCompliant, Some("MFA | SSO"))];
        let doc = render_statement_of_applicability(&gaps, today());
        assert!(doc.contains("Required based on risk assessment; MFA \\| SSO | Partially Implemented"));
        assert!(doc.contains("| 1.0 | [Name] | [Name] | 2025-02-01 | Annually |"));
        assert!(doc.ends_with("- **Date:** 2025-02-01\n"));
    }
}
