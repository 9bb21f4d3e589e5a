//! Flat Markdown export of every gap and maturity assessment, for pasting into Notion.

use chrono::NaiveDateTime;

use crate::shared::utils::{escape_pipes, truncate_chars};

use super::types::{GapSummary, MaturitySummary};

const QUESTION_MAX_CHARS: usize = 80;

fn row(cells: [&str; 4]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| escape_pipes(c)).collect();
    format!("| {} |\n", escaped.join(" | "))
}

/// Flat Markdown tables of every gap and maturity assessment, suitable for
/// pasting into Notion.
pub fn render_flat_export(
    gaps: &[GapSummary],
    maturity: &[MaturitySummary],
    exported_at: NaiveDateTime,
) -> String {
    let mut out = String::from("# ISO 27001 Assessment Export\n\n");
    out.push_str(&format!(
        "**Export Date:** {}\n\n",
        exported_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("## Gap Assessment Summary\n\n");
    out.push_str("| Clause | Assessment Question | Compliance Status | Notes |\n");
    out.push_str("|--------|---------------------|-------------------|-------|\n");
    for gap in gaps {
        let question = truncate_chars(&gap.assessment_question, QUESTION_MAX_CHARS);
        out.push_str(&row([
            &gap.standard_ref,
            &question,
            gap.compliance.as_str(),
            gap.notes.as_deref().unwrap_or(""),
        ]));
    }

    out.push_str("\n## Maturity Assessment Summary\n\n");
    out.push_str("| Clause | Assessment Question | Current Level | Target Level |\n");
    out.push_str("|--------|---------------------|---------------|--------------|\n");
    for m in maturity {
        let question = truncate_chars(&m.assessment_question, QUESTION_MAX_CHARS);
        out.push_str(&row([
            &m.standard_ref,
            &question,
            m.current_level.as_deref().unwrap_or(""),
            m.target_level.as_deref().unwrap_or(""),
        ]));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::ComplianceStatus;
    use chrono::NaiveDate;

    fn exported_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_empty_export_has_both_sections() {
        let doc = render_flat_export(&[], &[], exported_at());
        assert!(doc.starts_with("# ISO 27001 Assessment Export\n\n**Export Date:** 2025-04-02 13:05:09\n"));
        assert!(doc.contains("## Gap Assessment Summary"));
        assert!(doc.ends_with("|--------|---------------------|---------------|--------------|\n"));
    }

    #[test]
    fn test_rows_truncate_and_escape() {
        let gaps = vec![GapSummary {
            standard_ref: "A.5.1".to_string(),
            assessment_question: "w".repeat(81),
            compliance: ComplianceStatus::NotCompliant,
            notes: Some("owner | TBD".to_string()),
        }];
        let maturity = vec![MaturitySummary {
            standard_ref: "Clause-5.2".to_string(),
            assessment_question: "Is there a policy?".to_string(),
            current_level: Some("Initial".to_string()),
            target_level: None,
        }];
        let doc = render_flat_export(&gaps, &maturity, exported_at());

        assert!(doc.contains(&format!(
            "| A.5.1 | {}... | Not Compliant | owner \\| TBD |\n",
            "w".repeat(80)
        )));
        assert!(doc.contains("| Clause-5.2 | Is there a policy? | Initial |  |\n"));
    }
}
