use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComplianceStatus {
    #[serde(rename = "Fully Compliant")]
    FullyCompliant,
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
    #[serde(rename = "Not Compliant")]
    NotCompliant,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullyCompliant => "Fully Compliant",
            Self::PartiallyCompliant => "Partially Compliant",
            Self::NotCompliant => "Not Compliant",
            Self::NotApplicable => "Not Applicable",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplianceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Fully Compliant" => Ok(Self::FullyCompliant),
            "Partially Compliant" => Ok(Self::PartiallyCompliant),
            "Not Compliant" => Ok(Self::NotCompliant),
            "Not Applicable" => Ok(Self::NotApplicable),
            _ => Err(format!("Unknown compliance status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAssessment {
    pub id: i32,
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    pub compliance: ComplianceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_item_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GapAssessmentRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub standard_ref: String,
    #[serde(default)]
    pub assessment_question: String,
    pub compliance: ComplianceStatus,
    pub notes: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub action_item_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaturityAssessment {
    pub id: i32,
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_maturity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_maturity_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_maturity_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_maturity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_maturity_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_maturity_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaturityAssessmentRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub standard_ref: String,
    #[serde(default)]
    pub assessment_question: String,
    pub current_maturity_level: Option<String>,
    pub current_maturity_score: Option<i32>,
    pub current_maturity_comments: Option<String>,
    pub target_maturity_level: Option<String>,
    pub target_maturity_score: Option<i32>,
    pub target_maturity_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_assessment_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_assessment_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annex_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionItemRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub gap_assessment_id: Option<i32>,
    pub maturity_assessment_id: Option<i32>,
    pub category: Option<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i32>,
    pub file_type: Option<String>,
    pub clause_reference: Option<String>,
    pub annex_reference: Option<String>,
}

/// Metadata about a supporting artifact. The file itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i32>,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_assessment_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_assessment_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annex_reference: Option<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvidenceRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_path: String,
    pub file_size: Option<i32>,
    #[serde(default)]
    pub file_type: String,
    pub gap_assessment_id: Option<i32>,
    pub maturity_assessment_id: Option<i32>,
    pub clause_reference: Option<String>,
    pub annex_reference: Option<String>,
    #[serde(default)]
    pub uploaded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRegister {
    pub id: i32,
    pub risk_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub likelihood: String,
    pub impact: String,
    pub risk_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_controls: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_plan: Option<String>,
    pub treatment_status: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_assessment_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annex_a_controls: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskRegisterRequest {
    #[serde(default)]
    pub risk_id: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub likelihood: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub risk_level: String,
    pub current_controls: Option<String>,
    pub treatment_plan: Option<String>,
    #[serde(default)]
    pub treatment_status: String,
    #[serde(default)]
    pub owner: String,
    pub target_date: Option<NaiveDate>,
    pub gap_assessment_id: Option<i32>,
    pub annex_a_controls: Option<String>,
}
