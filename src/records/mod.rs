//! Table-backed compliance records.
//!
//! Every entity is served by the same generic handlers; an entity only
//! supplies a [`RecordSchema`] describing its table and required fields.

pub mod handlers;
pub mod storage;
pub mod store;
pub mod types;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::shared::state::AppState;

pub use store::{parse_record_id, validate_required, RecordSchema, RecordStore};
pub use types::{
    ActionItem, ActionItemRequest, ComplianceStatus, Evidence, EvidenceRequest, GapAssessment,
    GapAssessmentRequest, MaturityAssessment, MaturityAssessmentRequest, RiskRegister,
    RiskRegisterRequest,
};

pub fn record_routes<R: RecordSchema>() -> Router<Arc<AppState>> {
    let collection = format!("/api/{}", R::RESOURCE);
    let item = format!("{collection}/:id");

    Router::new()
        .route(
            &collection,
            get(handlers::handle_list::<R>).post(handlers::handle_create::<R>),
        )
        .route(
            &item,
            get(handlers::handle_get::<R>)
                .put(handlers::handle_update::<R>)
                .delete(handlers::handle_delete::<R>),
        )
}

pub fn configure_records_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(record_routes::<GapAssessment>())
        .merge(record_routes::<MaturityAssessment>())
        .merge(record_routes::<ActionItem>())
        .merge(record_routes::<Evidence>())
        .merge(record_routes::<RiskRegister>())
}
