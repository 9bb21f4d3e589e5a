use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use log::info;
use std::sync::Arc;

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

use super::store::{parse_record_id, RecordSchema, RecordStore};

fn store<R: RecordSchema>(state: &AppState) -> RecordStore<R> {
    RecordStore::new(state.conn.clone())
}

pub async fn handle_list<R: RecordSchema>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<R>>, ApiError> {
    let records = store::<R>(&state).list().await?;
    Ok(Json(records))
}

pub async fn handle_get<R: RecordSchema>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<R>, ApiError> {
    let id = parse_record_id(&id)?;
    let record = store::<R>(&state).get(id).await?;
    Ok(Json(record))
}

pub async fn handle_create<R: RecordSchema>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<R::Request>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let record = store::<R>(&state).create(request).await?;
    info!("Created {} record", R::RESOURCE);
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn handle_update<R: RecordSchema>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<R::Request>, JsonRejection>,
) -> Result<Json<R>, ApiError> {
    let id = parse_record_id(&id)?;
    let Json(request) = payload?;
    let record = store::<R>(&state).update(id, request).await?;
    Ok(Json(record))
}

pub async fn handle_delete<R: RecordSchema>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_record_id(&id)?;
    store::<R>(&state).delete(id).await?;
    info!("Deleted {} record {id}", R::RESOURCE);
    Ok(StatusCode::NO_CONTENT)
}
