//! Clause document rendering: template lookup, placeholder filling and the
//! assessment snapshot block.

use chrono::NaiveDate;

use crate::shared::utils::{escape_pipes, first_non_empty};

use super::templates::clause_template;
use super::types::{ClauseDocumentData, GapSnapshot, MaturitySnapshot};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn render_clause_document(
    clause_ref: &str,
    data: &ClauseDocumentData,
    today: NaiveDate,
) -> String {
    let clause_num = extract_clause_number(clause_ref);

    let template = match clause_template(&clause_num) {
        Some(body) => body.to_string(),
        None => generic_template(clause_ref, data.gap.as_ref(), today),
    };

    let populated = populate_template(&template, data.gap.as_ref());
    let snapshot = assessment_snapshot(clause_ref, &clause_num, data, today);
    inject_after_first_heading(&populated, &snapshot)
}

/// `Clause-4.1`, `clause 4.1`, `Clause_4.1` and `4.1` all yield `4.1`.
/// References without a dotted token come back lowercased and otherwise
/// untouched.
pub fn extract_clause_number(clause_ref: &str) -> String {
    let lowered = clause_ref.to_lowercase();
    lowered
        .split(|c| c == '-' || c == ' ' || c == '_')
        .filter(|part| !part.is_empty())
        .filter(|part| !part.starts_with("clause"))
        .find(|part| part.contains('.'))
        .map(str::to_string)
        .unwrap_or_else(|| lowered.clone())
}

fn generic_template(clause_ref: &str, gap: Option<&GapSnapshot>, today: NaiveDate) -> String {
    let question = gap.map_or("", |g| g.assessment_question.as_str());
    let date = today.format(DATE_FORMAT);

    format!(
        "# {clause_ref}

## Purpose
[To be defined based on ISO 27001:2022 requirements]

## Scope
This document applies to [scope to be defined].

## Requirements
{question}

## Implementation
[Implementation details to be documented]

## Responsibilities
- **Owner:** [To be assigned]
- **Reviewer:** [To be assigned]

## Review Process
This document shall be reviewed at least annually or when significant changes occur.

## Document Owner
**Owner:** [To be assigned]
**Review Date:** {date}
**Next Review:** [To be determined]

## Related Documents
- [List related documents]

## Revision History
| Version | Date | Author | Changes |
|---------|------|--------|---------|
| 1.0 | {date} | [Author] | Initial version |"
    )
}

fn populate_template(template: &str, gap: Option<&GapSnapshot>) -> String {
    let Some(gap) = gap else {
        return template.to_string();
    };

    let mut result = template.to_string();
    if !gap.assessment_question.is_empty() {
        result = result.replace("[Assessment Question]", &gap.assessment_question);
    }
    result = result.replace("[Compliance Status]", gap.compliance.as_str());
    if let Some(notes) = gap.notes.as_deref().filter(|n| !n.is_empty()) {
        result = result.replace("[Notes]", notes);
    }
    result
}

fn table_row(cells: &[&str]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| escape_pipes(c)).collect();
    format!("| {} |\n", escaped.join(" | "))
}

fn assessment_snapshot(
    clause_ref: &str,
    clause_num: &str,
    data: &ClauseDocumentData,
    today: NaiveDate,
) -> String {
    let mut out = String::from("## Assessment Snapshot\n\n| Field | Value |\n|---|---|\n");
    out.push_str(&table_row(&["Clause", first_non_empty(&[clause_num, clause_ref])]));

    if let Some(gap) = &data.gap {
        let target_date = gap
            .target_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let fields = [
            ("Standard Reference", gap.standard_ref.as_str()),
            ("Category", gap.category.as_str()),
            ("Section", gap.section.as_str()),
            ("Compliance", gap.compliance.as_str()),
            ("Target Date", target_date.as_str()),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                out.push_str(&table_row(&[label, value]));
            }
        }
    }

    let generated = today.format(DATE_FORMAT).to_string();
    out.push_str(&table_row(&["Generated", &generated]));

    if let Some(gap) = &data.gap {
        if !gap.assessment_question.is_empty() {
            out.push_str("\n### Assessment Question\n\n");
            out.push_str(&format!("> {}\n", escape_pipes(&gap.assessment_question)));
        }
        if let Some(notes) = gap.notes.as_deref().filter(|n| !n.is_empty()) {
            out.push_str("\n### Notes\n\n");
            out.push_str(&format!("{}\n", escape_pipes(notes)));
        }
    }

    if let Some(maturity) = data.maturity.as_ref().filter(|m| !m.is_empty()) {
        out.push_str(&maturity_section(maturity));
    }

    if data.has_linked_records() {
        out.push_str(&linked_records_section(data));
    }

    out
}

fn maturity_section(maturity: &MaturitySnapshot) -> String {
    let mut out = String::from("\n### Maturity (optional)\n\n");
    let bullets = [
        ("Current maturity", &maturity.current_level),
        ("Target maturity", &maturity.target_level),
        ("Current comments", &maturity.current_comments),
        ("Target comments", &maturity.target_comments),
    ];
    for (label, value) in bullets {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            out.push_str(&format!("- **{label}**: {}\n", escape_pipes(value)));
        }
    }
    out
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn linked_records_section(data: &ClauseDocumentData) -> String {
    let mut out = String::from("\n## Linked Records\n");

    if !data.action_items.is_empty() {
        out.push_str("\n### Action Items\n\n");
        out.push_str("| ID | Title | Status | Priority | Assigned To | Due Date |\n");
        out.push_str("|---:|---|---|---|---|---|\n");
        for item in &data.action_items {
            out.push_str(&table_row(&[
                &item.id.to_string(),
                &item.title,
                &item.status,
                &item.priority,
                item.assigned_to.as_deref().unwrap_or(""),
                &format_date(item.due_date),
            ]));
        }
    }

    if !data.evidence.is_empty() {
        out.push_str("\n### Evidence\n\n");
        out.push_str("| ID | Title | File Name | Type | Uploaded By | Uploaded At |\n");
        out.push_str("|---:|---|---|---|---|---|\n");
        for ev in &data.evidence {
            out.push_str(&table_row(&[
                &ev.id.to_string(),
                &ev.title,
                &ev.file_name,
                &ev.file_type,
                &ev.uploaded_by,
                &ev.uploaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]));
        }
    }

    if !data.risks.is_empty() {
        out.push_str("\n### Risks\n\n");
        out.push_str("| Risk ID | Title | Risk Level | Treatment Status | Owner | Target Date |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for risk in &data.risks {
            out.push_str(&table_row(&[
                &risk.risk_id,
                &risk.title,
                &risk.risk_level,
                &risk.treatment_status,
                &risk.owner,
                &format_date(risk.target_date),
            ]));
        }
    }

    out
}

/// Places `insert` after the first `# ` line, separated by blank lines. A
/// document with no level-1 heading gets the block prepended.
fn inject_after_first_heading(doc: &str, insert: &str) -> String {
    let lines: Vec<&str> = doc.split('\n').collect();
    match lines.iter().position(|line| line.starts_with("# ")) {
        Some(idx) => {
            let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 3);
            out.extend_from_slice(&lines[..=idx]);
            out.extend(["", insert, ""]);
            out.extend_from_slice(&lines[idx + 1..]);
            out.join("\n")
        }
        None => format!("{insert}\n\n{doc}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::types::{LinkedActionItem, LinkedEvidence, LinkedRisk};
    use crate::records::types::ComplianceStatus;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn gap() -> GapSnapshot {
        GapSnapshot {
            standard_ref: "Clause-4.1".to_string(),
            category: "Context".to_string(),
            section: "Organisation".to_string(),
            assessment_question: "Have internal and external issues been determined?".to_string(),
            compliance: ComplianceStatus::PartiallyCompliant,
            notes: Some("Draft | pending review".to_string()),
            target_date: NaiveDate::from_ymd_opt(2025, 3, 31),
        }
    }

    #[test]
    fn test_extract_clause_number() {
        assert_eq!(extract_clause_number("Clause-4.1"), "4.1");
        assert_eq!(extract_clause_number("Clause 6.1.3"), "6.1.3");
        assert_eq!(extract_clause_number("clause_9.2"), "9.2");
        assert_eq!(extract_clause_number("10.2"), "10.2");
        assert_eq!(extract_clause_number("Leadership"), "leadership");
    }

    #[test]
    fn test_known_clause_without_data() {
        let doc = render_clause_document("Clause-4.1", &ClauseDocumentData::default(), today());

        let template = clause_template("4.1").unwrap();
        let (heading, rest) = template.split_once('\n').unwrap();
        let snapshot = "## Assessment Snapshot\n\n| Field | Value |\n|---|---|\n\
                        | Clause | 4.1 |\n| Generated | 2025-01-15 |\n";
        assert_eq!(doc, format!("{heading}\n\n{snapshot}\n\n{rest}"));
    }

    #[test]
    fn test_unknown_clause_uses_generic_template() {
        let doc = render_clause_document("99.9", &ClauseDocumentData::default(), today());
        assert!(doc.starts_with("# 99.9\n"));
        assert!(doc.contains("## Revision History"));
        assert!(doc.contains("| 1.0 | 2025-01-15 | [Author] | Initial version |"));
        assert!(doc.contains("**Review Date:** 2025-01-15"));
        assert!(doc.contains("| Clause | 99.9 |"));
    }

    #[test]
    fn test_generic_template_carries_question() {
        let data = ClauseDocumentData {
            gap: Some(GapSnapshot {
                standard_ref: "A.5.1".to_string(),
                ..gap()
            }),
            ..Default::default()
        };
        let doc = render_clause_document("A.5.1", &data, today());
        assert!(doc.contains("## Requirements\nHave internal and external issues been determined?\n"));
    }

    #[test]
    fn test_snapshot_lists_gap_fields_and_escapes_pipes() {
        let data = ClauseDocumentData {
            gap: Some(gap()),
            ..Default::default()
        };
        let doc = render_clause_document("Clause-4.1", &data, today());

        assert!(doc.contains("| Standard Reference | Clause-4.1 |\n"));
        assert!(doc.contains("| Compliance | Partially Compliant |\n"));
        assert!(doc.contains("| Target Date | 2025-03-31 |\n"));
        assert!(doc.contains("### Assessment Question\n\n> Have internal"));
        assert!(doc.contains("### Notes\n\nDraft \\| pending review\n"));
        assert!(!doc.contains("### Maturity"));
        assert!(!doc.contains("## Linked Records"));
    }

    #[test]
    fn test_maturity_section_only_with_content() {
        let mut data = ClauseDocumentData {
            maturity: Some(MaturitySnapshot::default()),
            ..Default::default()
        };
        let doc = render_clause_document("4.2", &data, today());
        assert!(!doc.contains("### Maturity (optional)"));

        data.maturity = Some(MaturitySnapshot {
            target_level: Some("Managed".to_string()),
            target_comments: Some("by Q4".to_string()),
            ..Default::default()
        });
        let doc = render_clause_document("4.2", &data, today());
        assert!(doc.contains("### Maturity (optional)\n\n- **Target maturity**: Managed\n- **Target comments**: by Q4\n"));
        assert!(!doc.contains("**Current maturity**"));
    }

    #[test]
    fn test_linked_record_tables() {
        let data = ClauseDocumentData {
            gap: Some(gap()),
            action_items: vec![LinkedActionItem {
                id: 7,
                title: "Write context | scope".to_string(),
                status: "Open".to_string(),
                priority: "High".to_string(),
                assigned_to: None,
                due_date: None,
            }],
            risks: vec![LinkedRisk {
                risk_id: "R-001".to_string(),
                title: "Unknown scope".to_string(),
                risk_level: "Medium".to_string(),
                treatment_status: "Open".to_string(),
                owner: "CISO".to_string(),
                target_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            }],
            ..Default::default()
        };
        let doc = render_clause_document("Clause-4.1", &data, today());

        assert!(doc.contains("\n## Linked Records\n\n### Action Items\n"));
        assert!(doc.contains("| 7 | Write context \\| scope | Open | High |  |  |\n"));
        assert!(!doc.contains("### Evidence"));
        assert!(doc.contains("| R-001 | Unknown scope | Medium | Open | CISO | 2025-06-01 |\n"));

        let data = ClauseDocumentData {
            evidence: vec![LinkedEvidence {
                id: 3,
                title: "Context register".to_string(),
                file_name: "context.xlsx".to_string(),
                file_type: "xlsx".to_string(),
                uploaded_by: "alice".to_string(),
                uploaded_at: Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap(),
            }],
            ..Default::default()
        };
        let doc = render_clause_document("Clause-4.1", &data, today());
        assert!(doc.contains("| 3 | Context register | context.xlsx | xlsx | alice | 2025-01-02 09:30:00 |\n"));
    }

    #[test]
    fn test_placeholders_filled_when_present() {
        let template = "# T\n\nQ: [Assessment Question]\nS: [Compliance Status]\nN: [Notes]";
        assert_eq!(populate_template(template, None), template);

        let mut snapshot = gap();
        snapshot.notes = Some(String::new());
        let filled = populate_template(template, Some(&snapshot));
        assert!(filled.contains("S: Partially Compliant"));
        assert!(filled.contains("N: [Notes]"));
        assert!(!filled.contains("[Assessment Question]"));
    }

    #[test]
    fn test_inject_without_heading_prepends() {
        assert_eq!(inject_after_first_heading("body\n## Sub", "SNAP"), "SNAP\n\nbody\n## Sub");
        assert_eq!(
            inject_after_first_heading("intro\n# Title\nrest", "SNAP"),
            "intro\n# Title\n\nSNAP\n\nrest"
        );
    }
}
