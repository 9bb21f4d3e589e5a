use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use log::{info, warn};

use crate::shared::utils::DbPool;

pub fn create_compliance_tables_migration() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS gap_assessments (
        id SERIAL PRIMARY KEY,
        category VARCHAR(255) NOT NULL,
        section VARCHAR(255) NOT NULL,
        standard_ref VARCHAR(255) NOT NULL,
        assessment_question TEXT NOT NULL,
        compliance VARCHAR(50) NOT NULL,
        notes TEXT,
        target_date DATE,
        action_item_id INTEGER,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS maturity_assessments (
        id SERIAL PRIMARY KEY,
        category VARCHAR(255) NOT NULL,
        section VARCHAR(255) NOT NULL,
        standard_ref VARCHAR(255) NOT NULL,
        assessment_question TEXT NOT NULL,
        current_maturity_level VARCHAR(50),
        current_maturity_score INTEGER,
        current_maturity_comments TEXT,
        target_maturity_level VARCHAR(50),
        target_maturity_score INTEGER,
        target_maturity_comments TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS action_items (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        status VARCHAR(50) NOT NULL,
        priority VARCHAR(50) NOT NULL,
        assigned_to VARCHAR(255),
        due_date DATE,
        completed_date DATE,
        gap_assessment_id INTEGER REFERENCES gap_assessments(id),
        maturity_assessment_id INTEGER REFERENCES maturity_assessments(id),
        category VARCHAR(255),
        file_name VARCHAR(255),
        file_path TEXT,
        file_size INTEGER,
        file_type VARCHAR(100),
        clause_reference VARCHAR(255),
        annex_reference VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS evidence (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        file_name VARCHAR(255) NOT NULL,
        file_path TEXT NOT NULL,
        file_size INTEGER,
        file_type VARCHAR(100) NOT NULL,
        gap_assessment_id INTEGER REFERENCES gap_assessments(id),
        maturity_assessment_id INTEGER REFERENCES maturity_assessments(id),
        clause_reference VARCHAR(255),
        annex_reference VARCHAR(255),
        uploaded_by VARCHAR(255) NOT NULL,
        uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS risk_register (
        id SERIAL PRIMARY KEY,
        risk_id VARCHAR(100) UNIQUE NOT NULL,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        category VARCHAR(255) NOT NULL,
        likelihood VARCHAR(50) NOT NULL,
        impact VARCHAR(50) NOT NULL,
        risk_level VARCHAR(50) NOT NULL,
        current_controls TEXT,
        treatment_plan TEXT,
        treatment_status VARCHAR(50) NOT NULL,
        owner VARCHAR(255) NOT NULL,
        target_date DATE,
        gap_assessment_id INTEGER REFERENCES gap_assessments(id),
        annex_a_controls TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_gap_assessments_standard_ref ON gap_assessments(standard_ref);
    CREATE INDEX IF NOT EXISTS idx_maturity_assessments_standard_ref ON maturity_assessments(standard_ref);
    CREATE INDEX IF NOT EXISTS idx_action_items_gap_id ON action_items(gap_assessment_id);
    CREATE INDEX IF NOT EXISTS idx_action_items_maturity_id ON action_items(maturity_assessment_id);
    CREATE INDEX IF NOT EXISTS idx_evidence_gap_id ON evidence(gap_assessment_id);
    CREATE INDEX IF NOT EXISTS idx_evidence_maturity_id ON evidence(maturity_assessment_id);
    CREATE INDEX IF NOT EXISTS idx_risk_register_gap_id ON risk_register(gap_assessment_id);
    "#
}

/// Creates the five compliance tables and their indexes. Safe to run on every
/// startup.
pub fn run_migrations(conn: &mut PgConnection) -> QueryResult<()> {
    conn.batch_execute(create_compliance_tables_migration())
}

/// Startup wrapper: a failure is logged and the server keeps booting against
/// whatever schema already exists.
pub fn ensure_schema(pool: &DbPool) -> bool {
    info!("Creating database tables if they don't exist...");
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Could not check out a connection for migrations: {e}");
            return false;
        }
    };

    match run_migrations(&mut conn) {
        Ok(()) => {
            info!("Database tables ready");
            true
        }
        Err(e) => {
            warn!("Table creation failed, continuing with existing schema: {e}");
            false
        }
    }
}
