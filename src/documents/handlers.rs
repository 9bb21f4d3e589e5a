use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use log::info;
use std::sync::Arc;

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

use super::clause::render_clause_document;
use super::export::render_flat_export;
use super::soa::render_statement_of_applicability;
use super::storage::{load_clause_document_data, load_gap_summaries, load_maturity_summaries};
use super::templates::available_clauses;

/// Keeps a filename safe inside a quoted `Content-Disposition` value.
pub fn attachment_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}

pub fn markdown_attachment(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment_filename(filename)),
            ),
        ],
        body,
    )
        .into_response()
}

pub async fn handle_generate_clause(
    State(state): State<Arc<AppState>>,
    Path(clause): Path<String>,
) -> Result<Response, ApiError> {
    let pool = state.conn.clone();
    let lookup = clause.clone();
    let data = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        load_clause_document_data(&mut conn, &lookup).map_err(ApiError::from)
    })
    .await??;

    let document = render_clause_document(&clause, &data, Local::now().date_naive());
    info!("Generated clause document for {clause}");
    Ok(markdown_attachment(
        &format!("ISO27001-Clause-{clause}.md"),
        document,
    ))
}

pub async fn handle_generate_soa(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let pool = state.conn.clone();
    let gaps = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        load_gap_summaries(&mut conn).map_err(ApiError::from)
    })
    .await??;

    let today = Local::now().date_naive();
    let document = render_statement_of_applicability(&gaps, today);
    Ok(markdown_attachment(
        &format!(
            "ISO27001-Statement-of-Applicability-{}.md",
            today.format("%Y-%m-%d")
        ),
        document,
    ))
}

pub async fn handle_notion_export(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let pool = state.conn.clone();
    let (gaps, maturity) = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        let gaps = load_gap_summaries(&mut conn)?;
        let maturity = load_maturity_summaries(&mut conn)?;
        Ok::<_, ApiError>((gaps, maturity))
    })
    .await??;

    let now = Local::now().naive_local();
    let document = render_flat_export(&gaps, &maturity, now);
    Ok(markdown_attachment(
        &format!("ISO27001-Notion-Export-{}.md", now.format("%Y-%m-%d")),
        document,
    ))
}

pub async fn handle_list_clause_templates() -> Json<serde_json::Value> {
    let clauses = available_clauses();
    Json(serde_json::json!({
        "count": clauses.len(),
        "clauses": clauses,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_attachment_filename() {
        assert_eq!(attachment_filename("ISO27001-Clause-6.1.3.md"), "ISO27001-Clause-6.1.3.md");
        assert_eq!(attachment_filename("a\"b/c\\d\u{e9}.md"), "a_b_c_d_.md");
    }

    #[test]
    fn test_markdown_attachment_headers() {
        let response = markdown_attachment("ISO27001-Clause-4.1.md", "# Doc".to_string());
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/markdown; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ISO27001-Clause-4.1.md\""
        );
    }
}
