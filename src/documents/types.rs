use chrono::{DateTime, NaiveDate, Utc};

use crate::records::types::{ComplianceStatus, GapAssessment, MaturityAssessment};

/// Everything a clause document can show. Sections without data are left out
/// of the rendered output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseDocumentData {
    pub gap: Option<GapSnapshot>,
    pub maturity: Option<MaturitySnapshot>,
    pub action_items: Vec<LinkedActionItem>,
    pub evidence: Vec<LinkedEvidence>,
    pub risks: Vec<LinkedRisk>,
}

impl ClauseDocumentData {
    pub fn has_linked_records(&self) -> bool {
        !self.action_items.is_empty() || !self.evidence.is_empty() || !self.risks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapSnapshot {
    pub standard_ref: String,
    pub category: String,
    pub section: String,
    pub assessment_question: String,
    pub compliance: ComplianceStatus,
    pub notes: Option<String>,
    pub target_date: Option<NaiveDate>,
}

impl From<&GapAssessment> for GapSnapshot {
    fn from(gap: &GapAssessment) -> Self {
        Self {
            standard_ref: gap.standard_ref.clone(),
            category: gap.category.clone(),
            section: gap.section.clone(),
            assessment_question: gap.assessment_question.clone(),
            compliance: gap.compliance,
            notes: gap.notes.clone(),
            target_date: gap.target_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaturitySnapshot {
    pub current_level: Option<String>,
    pub current_score: Option<i32>,
    pub current_comments: Option<String>,
    pub target_level: Option<String>,
    pub target_score: Option<i32>,
    pub target_comments: Option<String>,
}

impl MaturitySnapshot {
    pub fn is_empty(&self) -> bool {
        [
            &self.current_level,
            &self.target_level,
            &self.current_comments,
            &self.target_comments,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

impl From<&MaturityAssessment> for MaturitySnapshot {
    fn from(m: &MaturityAssessment) -> Self {
        Self {
            current_level: m.current_maturity_level.clone(),
            current_score: m.current_maturity_score,
            current_comments: m.current_maturity_comments.clone(),
            target_level: m.target_maturity_level.clone(),
            target_score: m.target_maturity_score,
            target_comments: m.target_maturity_comments.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkedActionItem {
    pub id: i32,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkedEvidence {
    pub id: i32,
    pub title: String,
    pub file_name: String,
    pub file_type: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkedRisk {
    pub risk_id: String,
    pub title: String,
    pub risk_level: String,
    pub treatment_status: String,
    pub owner: String,
    pub target_date: Option<NaiveDate>,
}

/// One gap assessment as seen by the SoA and the flat export.
#[derive(Debug, Clone, PartialEq)]
pub struct GapSummary {
    pub standard_ref: String,
    pub assessment_question: String,
    pub compliance: ComplianceStatus,
    pub notes: Option<String>,
}

impl From<&GapAssessment> for GapSummary {
    fn from(gap: &GapAssessment) -> Self {
        Self {
            standard_ref: gap.standard_ref.clone(),
            assessment_question: gap.assessment_question.clone(),
            compliance: gap.compliance,
            notes: gap.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaturitySummary {
    pub standard_ref: String,
    pub assessment_question: String,
    pub current_level: Option<String>,
    pub target_level: Option<String>,
}

impl From<&MaturityAssessment> for MaturitySummary {
    fn from(m: &MaturityAssessment) -> Self {
        Self {
            standard_ref: m.standard_ref.clone(),
            assessment_question: m.assessment_question.clone(),
            current_level: m.current_maturity_level.clone(),
            target_level: m.target_maturity_level.clone(),
        }
    }
}
