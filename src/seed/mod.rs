//! Startup seeding of the assessment tables from JSON fixtures.
//!
//! A table is only seeded while it is empty. Each fixture file is inserted in
//! a single transaction; any failure is logged and leaves the table untouched.

use anyhow::{Context, Result};
use diesel::prelude::*;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::records::storage::{GapAssessmentChanges, MaturityAssessmentChanges};
use crate::records::types::ComplianceStatus;
use crate::shared::config::SeedConfig;
use crate::shared::schema::{gap_assessments, maturity_assessments};
use crate::shared::utils::DbPool;

pub const GAP_FIXTURE: &str = "sample_gap_data.json";
pub const MATURITY_FIXTURE: &str = "sample_maturity_data.json";

const SEARCH_DIRS: &[&str] = &[".", "..", "/app", "/root"];

#[derive(Debug, Clone, Deserialize)]
pub struct GapFixture {
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    pub compliance: ComplianceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<GapFixture> for GapAssessmentChanges {
    fn from(f: GapFixture) -> Self {
        Self {
            category: f.category,
            section: f.section,
            standard_ref: f.standard_ref,
            assessment_question: f.assessment_question,
            compliance: f.compliance.to_string(),
            notes: f.notes.filter(|n| !n.is_empty()),
            target_date: None,
            action_item_id: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaturityFixture {
    pub category: String,
    pub section: String,
    pub standard_ref: String,
    pub assessment_question: String,
    #[serde(default)]
    pub current_maturity_level: Option<String>,
    #[serde(default)]
    pub current_maturity_score: Option<i32>,
    #[serde(default)]
    pub current_maturity_comments: Option<String>,
    #[serde(default)]
    pub target_maturity_level: Option<String>,
    #[serde(default)]
    pub target_maturity_score: Option<i32>,
    #[serde(default)]
    pub target_maturity_comments: Option<String>,
}

impl From<MaturityFixture> for MaturityAssessmentChanges {
    fn from(f: MaturityFixture) -> Self {
        Self {
            category: f.category,
            section: f.section,
            standard_ref: f.standard_ref,
            assessment_question: f.assessment_question,
            current_maturity_level: f.current_maturity_level,
            current_maturity_score: f.current_maturity_score,
            current_maturity_comments: f.current_maturity_comments,
            target_maturity_level: f.target_maturity_level,
            target_maturity_score: f.target_maturity_score,
            target_maturity_comments: f.target_maturity_comments,
        }
    }
}

pub fn fixture_candidates(file_name: &str, data_dir: Option<&Path>) -> Vec<PathBuf> {
    match data_dir {
        Some(dir) => vec![dir.join(file_name)],
        None => SEARCH_DIRS
            .iter()
            .map(|dir| Path::new(dir).join(file_name))
            .collect(),
    }
}

pub fn locate_fixture(file_name: &str, data_dir: Option<&Path>) -> Option<PathBuf> {
    fixture_candidates(file_name, data_dir)
        .into_iter()
        .find(|path| path.is_file())
}

pub fn read_fixture<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn load_fixture<T: DeserializeOwned>(file_name: &str, config: &SeedConfig) -> Result<Vec<T>> {
    let path = locate_fixture(file_name, config.data_dir.as_deref()).with_context(|| {
        let searched: Vec<String> = fixture_candidates(file_name, config.data_dir.as_deref())
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        format!("{file_name} not found in {}", searched.join(", "))
    })?;
    info!("Found seed data file at: {}", path.display());
    read_fixture(&path)
}

fn seed_gap_assessments(conn: &mut PgConnection, config: &SeedConfig) -> Result<usize> {
    let rows: Vec<GapAssessmentChanges> = load_fixture::<GapFixture>(GAP_FIXTURE, config)?
        .into_iter()
        .map(GapAssessmentChanges::from)
        .collect();

    let inserted = conn.transaction(|conn| {
        diesel::insert_into(gap_assessments::table)
            .values(&rows)
            .execute(conn)
    })?;
    Ok(inserted)
}

fn seed_maturity_assessments(conn: &mut PgConnection, config: &SeedConfig) -> Result<usize> {
    let rows: Vec<MaturityAssessmentChanges> =
        load_fixture::<MaturityFixture>(MATURITY_FIXTURE, config)?
            .into_iter()
            .map(MaturityAssessmentChanges::from)
            .collect();

    let inserted = conn.transaction(|conn| {
        diesel::insert_into(maturity_assessments::table)
            .values(&rows)
            .execute(conn)
    })?;
    Ok(inserted)
}

fn seed_if_empty(
    conn: &mut PgConnection,
    table: &str,
    count: i64,
    seed: impl FnOnce(&mut PgConnection) -> Result<usize>,
) {
    if count > 0 {
        info!("{table} table already has data, skipping seed");
        return;
    }

    info!("Seeding {table} table...");
    match seed(conn) {
        Ok(n) => info!("Inserted {n} rows into {table}"),
        Err(e) => warn!("Failed to seed {table}: {e:#}"),
    }
}

/// Seeds empty assessment tables. Never fails; problems are logged.
pub fn seed_database(pool: &DbPool, config: &SeedConfig) {
    info!("Checking if database seeding is needed...");
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Skipping seed, no database connection: {e}");
            return;
        }
    };

    let gap_count = gap_assessments::table.count().get_result::<i64>(&mut conn);
    let maturity_count = maturity_assessments::table
        .count()
        .get_result::<i64>(&mut conn);

    match gap_count {
        Ok(count) => seed_if_empty(&mut conn, "gap_assessments", count, |c| {
            seed_gap_assessments(c, config)
        }),
        Err(e) => warn!("Could not count gap_assessments: {e}"),
    }

    match maturity_count {
        Ok(count) => seed_if_empty(&mut conn, "maturity_assessments", count, |c| {
            seed_maturity_assessments(c, config)
        }),
        Err(e) => warn!("Could not count maturity_assessments: {e}"),
    }
}
