use diesel::prelude::*;

use crate::records::storage::{
    db_gap_to_record, db_maturity_to_record, DbActionItem, DbEvidence, DbGapAssessment,
    DbMaturityAssessment, DbRisk,
};
use crate::shared::schema::{
    action_items, evidence, gap_assessments, maturity_assessments, risk_register,
};

use super::types::{
    ClauseDocumentData, GapSummary, GapSnapshot, LinkedActionItem, LinkedEvidence, LinkedRisk,
    MaturitySnapshot, MaturitySummary,
};

/// How well `standard_ref` names `clause`; lower is better. `Clause-{c}` beats
/// `Clause {c}`, which beats any other reference containing `{c}`. Among
/// substring matches the shortest reference wins.
pub fn clause_match_rank(standard_ref: &str, clause: &str) -> (u8, usize) {
    let tier = if standard_ref == format!("Clause-{clause}") {
        0
    } else if standard_ref == format!("Clause {clause}") {
        1
    } else {
        2
    };
    (tier, standard_ref.chars().count())
}

fn best_match<T>(candidates: Vec<T>, clause: &str, key: impl Fn(&T) -> (&str, i32)) -> Option<T> {
    candidates.into_iter().min_by(|a, b| {
        let (ref_a, id_a) = key(a);
        let (ref_b, id_b) = key(b);
        clause_match_rank(ref_a, clause)
            .cmp(&clause_match_rank(ref_b, clause))
            .then(id_a.cmp(&id_b))
    })
}

fn like_pattern(clause: &str) -> String {
    format!("%{clause}%")
}

pub fn find_clause_gap(conn: &mut PgConnection, clause: &str) -> QueryResult<Option<DbGapAssessment>> {
    let candidates: Vec<DbGapAssessment> = gap_assessments::table
        .filter(
            gap_assessments::standard_ref
                .eq(format!("Clause-{clause}"))
                .or(gap_assessments::standard_ref.eq(format!("Clause {clause}")))
                .or(gap_assessments::standard_ref.ilike(like_pattern(clause))),
        )
        .select(DbGapAssessment::as_select())
        .load(conn)?;

    Ok(best_match(candidates, clause, |g| (g.standard_ref.as_str(), g.id)))
}

pub fn find_clause_maturity(
    conn: &mut PgConnection,
    clause: &str,
) -> QueryResult<Option<DbMaturityAssessment>> {
    let candidates: Vec<DbMaturityAssessment> = maturity_assessments::table
        .filter(
            maturity_assessments::standard_ref
                .eq(format!("Clause-{clause}"))
                .or(maturity_assessments::standard_ref.eq(format!("Clause {clause}")))
                .or(maturity_assessments::standard_ref.ilike(like_pattern(clause))),
        )
        .select(DbMaturityAssessment::as_select())
        .load(conn)?;

    Ok(best_match(candidates, clause, |m| (m.standard_ref.as_str(), m.id)))
}

fn linked_action_items(
    conn: &mut PgConnection,
    gap_id: i32,
    clause: &str,
) -> QueryResult<Vec<LinkedActionItem>> {
    let rows: Vec<DbActionItem> = action_items::table
        .filter(
            action_items::gap_assessment_id
                .eq(gap_id)
                .or(action_items::clause_reference.ilike(like_pattern(clause))),
        )
        .order((
            action_items::due_date.asc().nulls_last(),
            action_items::priority.desc(),
            action_items::created_at.desc(),
        ))
        .select(DbActionItem::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|item| LinkedActionItem {
            id: item.id,
            title: item.title,
            status: item.status,
            priority: item.priority,
            assigned_to: item.assigned_to,
            due_date: item.due_date,
        })
        .collect())
}

fn linked_evidence(
    conn: &mut PgConnection,
    gap_id: i32,
    clause: &str,
) -> QueryResult<Vec<LinkedEvidence>> {
    let rows: Vec<DbEvidence> = evidence::table
        .filter(
            evidence::gap_assessment_id
                .eq(gap_id)
                .or(evidence::clause_reference.ilike(like_pattern(clause))),
        )
        .order(evidence::uploaded_at.desc())
        .select(DbEvidence::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|ev| LinkedEvidence {
            id: ev.id,
            title: ev.title,
            file_name: ev.file_name,
            file_type: ev.file_type,
            uploaded_by: ev.uploaded_by,
            uploaded_at: ev.uploaded_at,
        })
        .collect())
}

fn linked_risks(conn: &mut PgConnection, gap_id: i32) -> QueryResult<Vec<LinkedRisk>> {
    let rows: Vec<DbRisk> = risk_register::table
        .filter(risk_register::gap_assessment_id.eq(gap_id))
        .order((risk_register::risk_level.desc(), risk_register::created_at.desc()))
        .select(DbRisk::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|risk| LinkedRisk {
            risk_id: risk.risk_id,
            title: risk.title,
            risk_level: risk.risk_level,
            treatment_status: risk.treatment_status,
            owner: risk.owner,
            target_date: risk.target_date,
        })
        .collect())
}

/// Gathers the best-matching gap and maturity rows for `clause` plus, when a
/// gap row exists, the action items, evidence and risks linked to it. The
/// queries run without a surrounding transaction.
pub fn load_clause_document_data(
    conn: &mut PgConnection,
    clause: &str,
) -> QueryResult<ClauseDocumentData> {
    let gap = find_clause_gap(conn, clause)?.map(db_gap_to_record);
    let maturity = find_clause_maturity(conn, clause)?.map(db_maturity_to_record);

    let mut data = ClauseDocumentData {
        gap: gap.as_ref().map(GapSnapshot::from),
        maturity: maturity.as_ref().map(MaturitySnapshot::from),
        ..Default::default()
    };

    if let Some(gap) = gap {
        data.action_items = linked_action_items(conn, gap.id, clause)?;
        data.evidence = linked_evidence(conn, gap.id, clause)?;
        data.risks = linked_risks(conn, gap.id)?;
    }

    Ok(data)
}

pub fn load_gap_summaries(conn: &mut PgConnection) -> QueryResult<Vec<GapSummary>> {
    let rows: Vec<DbGapAssessment> = gap_assessments::table
        .order((gap_assessments::standard_ref.asc(), gap_assessments::id.asc()))
        .select(DbGapAssessment::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(db_gap_to_record)
        .map(|gap| GapSummary::from(&gap))
        .collect())
}

pub fn load_maturity_summaries(conn: &mut PgConnection) -> QueryResult<Vec<MaturitySummary>> {
    let rows: Vec<DbMaturityAssessment> = maturity_assessments::table
        .order((
            maturity_assessments::standard_ref.asc(),
            maturity_assessments::id.asc(),
        ))
        .select(DbMaturityAssessment::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(db_maturity_to_record)
        .map(|m| MaturitySummary::from(&m))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_dash_reference_wins() {
        let refs = vec![
            ("Clause 6.1", 1),
            ("Clause-6.1.1", 2),
            ("Clause-6.1", 3),
            ("6.1", 4),
        ];
        let best = best_match(refs, "6.1", |(r, id)| (*r, *id)).unwrap();
        assert_eq!(best.1, 3);
    }

    #[test]
    fn test_space_reference_beats_substring() {
        let refs = vec![("Clause-6.1.3", 1), ("Clause 6.1", 2), ("6.1", 3)];
        let best = best_match(refs, "6.1", |(r, id)| (*r, *id)).unwrap();
        assert_eq!(best.1, 2);
    }

    #[test]
    fn test_shortest_substring_match_then_lowest_id() {
        let refs = vec![("Clause-6.1.3", 1), ("A 6.1", 7), ("B 6.1", 5)];
        let best = best_match(refs, "6.1", |(r, id)| (*r, *id)).unwrap();
        assert_eq!(best.1, 5);
        assert!(best_match(Vec::<(&str, i32)>::new(), "6.1", |(r, id)| (*r, *id)).is_none());
    }
}
