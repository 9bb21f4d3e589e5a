use chrono::{DateTime, NaiveDate, Utc};
use diesel::dsl::now;
use diesel::prelude::*;
use log::warn;

use crate::shared::schema::{
    action_items, evidence, gap_assessments, maturity_assessments, risk_register,
};

use super::store::RecordSchema;
use super::types::{
    ActionItem, ActionItemRequest, ComplianceStatus, Evidence, EvidenceRequest, GapAssessment,
    GapAssessmentRequest, MaturityAssessment, MaturityAssessmentRequest, RiskRegister,
    RiskRegisterRequest,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gap_assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbGapAssessment {
    pub id: i32,
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    pub compliance: String,
    pub notes: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub action_item_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = gap_assessments)]
#[diesel(treat_none_as_null = true)]
pub struct GapAssessmentChanges {
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    pub compliance: String,
    pub notes: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub action_item_id: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maturity_assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbMaturityAssessment {
    pub id: i32,
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    pub current_maturity_level: Option<String>,
    pub current_maturity_score: Option<i32>,
    pub current_maturity_comments: Option<String>,
    pub target_maturity_level: Option<String>,
    pub target_maturity_score: Option<i32>,
    pub target_maturity_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = maturity_assessments)]
#[diesel(treat_none_as_null = true)]
pub struct MaturityAssessmentChanges {
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    pub current_maturity_level: Option<String>,
    pub current_maturity_score: Option<i32>,
    pub current_maturity_comments: Option<String>,
    pub target_maturity_level: Option<String>,
    pub target_maturity_score: Option<i32>,
    pub target_maturity_comments: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = action_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbActionItem {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = action_items)]
#[diesel(treat_none_as_null = true)]
pub struct ActionItemChanges {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
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

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = evidence)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbEvidence {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i32>,
    pub file_type: String,
    pub gap_assessment_id: Option<i32>,
    pub maturity_assessment_id: Option<i32>,
    pub clause_reference: Option<String>,
    pub annex_reference: Option<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = evidence)]
#[diesel(treat_none_as_null = true)]
pub struct EvidenceChanges {
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i32>,
    pub file_type: String,
    pub gap_assessment_id: Option<i32>,
    pub maturity_assessment_id: Option<i32>,
    pub clause_reference: Option<String>,
    pub annex_reference: Option<String>,
    pub uploaded_by: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = risk_register)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbRisk {
    pub id: i32,
    pub risk_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub likelihood: String,
    pub impact: String,
    pub risk_level: String,
    pub current_controls: Option<String>,
    pub treatment_plan: Option<String>,
    pub treatment_status: String,
    pub owner: String,
    pub target_date: Option<NaiveDate>,
    pub gap_assessment_id: Option<i32>,
    pub annex_a_controls: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = risk_register)]
#[diesel(treat_none_as_null = true)]
pub struct RiskChanges {
    pub risk_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub likelihood: String,
    pub impact: String,
    pub risk_level: String,
    pub current_controls: Option<String>,
    pub treatment_plan: Option<String>,
    pub treatment_status: String,
    pub owner: String,
    pub target_date: Option<NaiveDate>,
    pub gap_assessment_id: Option<i32>,
    pub annex_a_controls: Option<String>,
}

pub fn db_gap_to_record(db: DbGapAssessment) -> GapAssessment {
    let compliance = db.compliance.parse().unwrap_or_else(|e| {
        warn!("Gap assessment {} has {e}, reporting as Not Compliant", db.id);
        ComplianceStatus::NotCompliant
    });

    GapAssessment {
        id: db.id,
        category: db.category,
        section: db.section,
        standard_ref: db.standard_ref,
        assessment_question: db.assessment_question,
        compliance,
        notes: db.notes,
        target_date: db.target_date,
        action_item_id: db.action_item_id,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

impl From<GapAssessmentRequest> for GapAssessmentChanges {
    fn from(req: GapAssessmentRequest) -> Self {
        Self {
            category: req.category,
            section: req.section,
            standard_ref: req.standard_ref,
            assessment_question: req.assessment_question,
            compliance: req.compliance.to_string(),
            notes: req.notes,
            target_date: req.target_date,
            action_item_id: req.action_item_id,
        }
    }
}

pub fn db_maturity_to_record(db: DbMaturityAssessment) -> MaturityAssessment {
    MaturityAssessment {
        id: db.id,
        category: db.category,
        section: db.section,
        standard_ref: db.standard_ref,
        assessment_question: db.assessment_question,
        current_maturity_level: db.current_maturity_level,
        current_maturity_score: db.current_maturity_score,
        current_maturity_comments: db.current_maturity_comments,
        target_maturity_level: db.target_maturity_level,
        target_maturity_score: db.target_maturity_score,
        target_maturity_comments: db.target_maturity_comments,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

impl From<MaturityAssessmentRequest> for MaturityAssessmentChanges {
    fn from(req: MaturityAssessmentRequest) -> Self {
        Self {
            category: req.category,
            section: req.section,
            standard_ref: req.standard_ref,
            assessment_question: req.assessment_question,
            current_maturity_level: req.current_maturity_level,
            current_maturity_score: req.current_maturity_score,
            current_maturity_comments: req.current_maturity_comments,
            target_maturity_level: req.target_maturity_level,
            target_maturity_score: req.target_maturity_score,
            target_maturity_comments: req.target_maturity_comments,
        }
    }
}

pub fn db_action_item_to_record(db: DbActionItem) -> ActionItem {
    ActionItem {
        id: db.id,
        title: db.title,
        description: db.description,
        status: db.status,
        priority: db.priority,
        assigned_to: db.assigned_to,
        due_date: db.due_date,
        completed_date: db.completed_date,
        gap_assessment_id: db.gap_assessment_id,
        maturity_assessment_id: db.maturity_assessment_id,
        category: db.category,
        file_name: db.file_name,
        file_path: db.file_path,
        file_size: db.file_size,
        file_type: db.file_type,
        clause_reference: db.clause_reference,
        annex_reference: db.annex_reference,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

impl From<ActionItemRequest> for ActionItemChanges {
    fn from(req: ActionItemRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assigned_to: req.assigned_to,
            due_date: req.due_date,
            completed_date: req.completed_date,
            gap_assessment_id: req.gap_assessment_id,
            maturity_assessment_id: req.maturity_assessment_id,
            category: req.category,
            file_name: req.file_name,
            file_path: req.file_path,
            file_size: req.file_size,
            file_type: req.file_type,
            clause_reference: req.clause_reference,
            annex_reference: req.annex_reference,
        }
    }
}

pub fn db_evidence_to_record(db: DbEvidence) -> Evidence {
    Evidence {
        id: db.id,
        title: db.title,
        description: db.description,
        file_name: db.file_name,
        file_path: db.file_path,
        file_size: db.file_size,
        file_type: db.file_type,
        gap_assessment_id: db.gap_assessment_id,
        maturity_assessment_id: db.maturity_assessment_id,
        clause_reference: db.clause_reference,
        annex_reference: db.annex_reference,
        uploaded_by: db.uploaded_by,
        uploaded_at: db.uploaded_at,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

impl From<EvidenceRequest> for EvidenceChanges {
    fn from(req: EvidenceRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            file_name: req.file_name,
            file_path: req.file_path,
            file_size: req.file_size,
            file_type: req.file_type,
            gap_assessment_id: req.gap_assessment_id,
            maturity_assessment_id: req.maturity_assessment_id,
            clause_reference: req.clause_reference,
            annex_reference: req.annex_reference,
            uploaded_by: req.uploaded_by,
        }
    }
}

pub fn db_risk_to_record(db: DbRisk) -> RiskRegister {
    RiskRegister {
        id: db.id,
        risk_id: db.risk_id,
        title: db.title,
        description: db.description,
        category: db.category,
        likelihood: db.likelihood,
        impact: db.impact,
        risk_level: db.risk_level,
        current_controls: db.current_controls,
        treatment_plan: db.treatment_plan,
        treatment_status: db.treatment_status,
        owner: db.owner,
        target_date: db.target_date,
        gap_assessment_id: db.gap_assessment_id,
        annex_a_controls: db.annex_a_controls,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

impl From<RiskRegisterRequest> for RiskChanges {
    fn from(req: RiskRegisterRequest) -> Self {
        Self {
            risk_id: req.risk_id,
            title: req.title,
            description: req.description,
            category: req.category,
            likelihood: req.likelihood,
            impact: req.impact,
            risk_level: req.risk_level,
            current_controls: req.current_controls,
            treatment_plan: req.treatment_plan,
            treatment_status: req.treatment_status,
            owner: req.owner,
            target_date: req.target_date,
            gap_assessment_id: req.gap_assessment_id,
            annex_a_controls: req.annex_a_controls,
        }
    }
}

impl RecordSchema for GapAssessment {
    type Request = GapAssessmentRequest;

    const RESOURCE: &'static str = "gap-assessments";
    const LABEL: &'static str = "Gap assessment";

    fn required_fields(req: &Self::Request) -> Vec<(&'static str, &str)> {
        vec![
            ("category", &req.category),
            ("section", &req.section),
            ("standard_ref", &req.standard_ref),
            ("assessment_question", &req.assessment_question),
        ]
    }

    fn list(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let rows: Vec<DbGapAssessment> = gap_assessments::table
            .order(gap_assessments::id.asc())
            .select(DbGapAssessment::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(db_gap_to_record).collect())
    }

    fn find(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Self>> {
        gap_assessments::table
            .find(id)
            .select(DbGapAssessment::as_select())
            .first(conn)
            .optional()
            .map(|row| row.map(db_gap_to_record))
    }

    fn insert(conn: &mut PgConnection, req: Self::Request) -> QueryResult<Self> {
        let changes = GapAssessmentChanges::from(req);
        diesel::insert_into(gap_assessments::table)
            .values(&changes)
            .returning(DbGapAssessment::as_returning())
            .get_result(conn)
            .map(db_gap_to_record)
    }

    fn update(conn: &mut PgConnection, id: i32, req: Self::Request) -> QueryResult<Option<Self>> {
        let changes = GapAssessmentChanges::from(req);
        diesel::update(gap_assessments::table.find(id))
            .set((&changes, gap_assessments::updated_at.eq(now)))
            .returning(DbGapAssessment::as_returning())
            .get_result(conn)
            .optional()
            .map(|row| row.map(db_gap_to_record))
    }

    fn delete(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
        diesel::delete(gap_assessments::table.find(id)).execute(conn)
    }
}

impl RecordSchema for MaturityAssessment {
    type Request = MaturityAssessmentRequest;

    const RESOURCE: &'static str = "maturity-assessments";
    const LABEL: &'static str = "Maturity assessment";

    fn required_fields(req: &Self::Request) -> Vec<(&'static str, &str)> {
        vec![
            ("category", &req.category),
            ("section", &req.section),
            ("standard_ref", &req.standard_ref),
            ("assessment_question", &req.assessment_question),
        ]
    }

    fn list(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let rows: Vec<DbMaturityAssessment> = maturity_assessments::table
            .order(maturity_assessments::id.asc())
            .select(DbMaturityAssessment::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(db_maturity_to_record).collect())
    }

    fn find(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Self>> {
        maturity_assessments::table
            .find(id)
            .select(DbMaturityAssessment::as_select())
            .first(conn)
            .optional()
            .map(|row| row.map(db_maturity_to_record))
    }

    fn insert(conn: &mut PgConnection, req: Self::Request) -> QueryResult<Self> {
        let changes = MaturityAssessmentChanges::from(req);
        diesel::insert_into(maturity_assessments::table)
            .values(&changes)
            .returning(DbMaturityAssessment::as_returning())
            .get_result(conn)
            .map(db_maturity_to_record)
    }

    fn update(conn: &mut PgConnection, id: i32, req: Self::Request) -> QueryResult<Option<Self>> {
        let changes = MaturityAssessmentChanges::from(req);
        diesel::update(maturity_assessments::table.find(id))
            .set((&changes, maturity_assessments::updated_at.eq(now)))
            .returning(DbMaturityAssessment::as_returning())
            .get_result(conn)
            .optional()
            .map(|row| row.map(db_maturity_to_record))
    }

    fn delete(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
        diesel::delete(maturity_assessments::table.find(id)).execute(conn)
    }
}

impl RecordSchema for ActionItem {
    type Request = ActionItemRequest;

    const RESOURCE: &'static str = "action-items";
    const LABEL: &'static str = "Action item";

    fn required_fields(req: &Self::Request) -> Vec<(&'static str, &str)> {
        vec![
            ("title", &req.title),
            ("status", &req.status),
            ("priority", &req.priority),
        ]
    }

    fn list(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let rows: Vec<DbActionItem> = action_items::table
            .order((
                action_items::due_date.asc().nulls_last(),
                action_items::priority.desc(),
                action_items::created_at.desc(),
            ))
            .select(DbActionItem::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(db_action_item_to_record).collect())
    }

    fn find(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Self>> {
        action_items::table
            .find(id)
            .select(DbActionItem::as_select())
            .first(conn)
            .optional()
            .map(|row| row.map(db_action_item_to_record))
    }

    fn insert(conn: &mut PgConnection, req: Self::Request) -> QueryResult<Self> {
        let changes = ActionItemChanges::from(req);
        diesel::insert_into(action_items::table)
            .values(&changes)
            .returning(DbActionItem::as_returning())
            .get_result(conn)
            .map(db_action_item_to_record)
    }

    fn update(conn: &mut PgConnection, id: i32, req: Self::Request) -> QueryResult<Option<Self>> {
        let changes = ActionItemChanges::from(req);
        diesel::update(action_items::table.find(id))
            .set((&changes, action_items::updated_at.eq(now)))
            .returning(DbActionItem::as_returning())
            .get_result(conn)
            .optional()
            .map(|row| row.map(db_action_item_to_record))
    }

    fn delete(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
        diesel::delete(action_items::table.find(id)).execute(conn)
    }
}

impl RecordSchema for Evidence {
    type Request = EvidenceRequest;

    const RESOURCE: &'static str = "evidence";
    const LABEL: &'static str = "Evidence";

    fn required_fields(req: &Self::Request) -> Vec<(&'static str, &str)> {
        vec![
            ("title", &req.title),
            ("file_name", &req.file_name),
            ("file_path", &req.file_path),
            ("file_type", &req.file_type),
            ("uploaded_by", &req.uploaded_by),
        ]
    }

    fn list(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let rows: Vec<DbEvidence> = evidence::table
            .order(evidence::created_at.desc())
            .select(DbEvidence::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(db_evidence_to_record).collect())
    }

    fn find(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Self>> {
        evidence::table
            .find(id)
            .select(DbEvidence::as_select())
            .first(conn)
            .optional()
            .map(|row| row.map(db_evidence_to_record))
    }

    fn insert(conn: &mut PgConnection, req: Self::Request) -> QueryResult<Self> {
        let changes = EvidenceChanges::from(req);
        diesel::insert_into(evidence::table)
            .values(&changes)
            .returning(DbEvidence::as_returning())
            .get_result(conn)
            .map(db_evidence_to_record)
    }

    fn update(conn: &mut PgConnection, id: i32, req: Self::Request) -> QueryResult<Option<Self>> {
        let changes = EvidenceChanges::from(req);
        diesel::update(evidence::table.find(id))
            .set((&changes, evidence::updated_at.eq(now)))
            .returning(DbEvidence::as_returning())
            .get_result(conn)
            .optional()
            .map(|row| row.map(db_evidence_to_record))
    }

    fn delete(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
        diesel::delete(evidence::table.find(id)).execute(conn)
    }
}

impl RecordSchema for RiskRegister {
    type Request = RiskRegisterRequest;

    const RESOURCE: &'static str = "risks";
    const LABEL: &'static str = "Risk";

    fn required_fields(req: &Self::Request) -> Vec<(&'static str, &str)> {
        vec![
            ("risk_id", &req.risk_id),
            ("title", &req.title),
            ("category", &req.category),
            ("likelihood", &req.likelihood),
            ("impact", &req.impact),
            ("risk_level", &req.risk_level),
            ("treatment_status", &req.treatment_status),
            ("owner", &req.owner),
        ]
    }

    fn list(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let rows: Vec<DbRisk> = risk_register::table
            .order((risk_register::risk_level.desc(), risk_register::created_at.desc()))
            .select(DbRisk::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(db_risk_to_record).collect())
    }

    fn find(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Self>> {
        risk_register::table
            .find(id)
            .select(DbRisk::as_select())
            .first(conn)
            .optional()
            .map(|row| row.map(db_risk_to_record))
    }

    fn insert(conn: &mut PgConnection, req: Self::Request) -> QueryResult<Self> {
        let changes = RiskChanges::from(req);
        diesel::insert_into(risk_register::table)
            .values(&changes)
            .returning(DbRisk::as_returning())
            .get_result(conn)
            .map(db_risk_to_record)
    }

    fn update(conn: &mut PgConnection, id: i32, req: Self::Request) -> QueryResult<Option<Self>> {
        let changes = RiskChanges::from(req);
        diesel::update(risk_register::table.find(id))
            .set((&changes, risk_register::updated_at.eq(now)))
            .returning(DbRisk::as_returning())
            .get_result(conn)
            .optional()
            .map(|row| row.map(db_risk_to_record))
    }

    fn delete(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
        diesel::delete(risk_register::table.find(id)).execute(conn)
    }
}
