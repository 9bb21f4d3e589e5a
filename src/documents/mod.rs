//! Markdown document generation: clause documents, the Statement of
//! Applicability and the flat Notion export.

pub mod clause;
pub mod export;
pub mod handlers;
pub mod soa;
pub mod storage;
pub mod templates;
pub mod types;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::shared::state::AppState;

pub use clause::{extract_clause_number, render_clause_document};
pub use export::render_flat_export;
pub use soa::render_statement_of_applicability;
pub use templates::{available_clauses, clause_template, compare_clause_refs};
pub use types::ClauseDocumentData;

pub fn configure_documents_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/generate/clause/:clause",
            get(handlers::handle_generate_clause),
        )
        .route("/api/generate/soa", get(handlers::handle_generate_soa))
        .route(
            "/api/generate/notion-export",
            get(handlers::handle_notion_export),
        )
        .route(
            "/api/templates/clauses",
            get(handlers::handle_list_clause_templates),
        )
}
