use diesel::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

use crate::shared::error::ApiError;
use crate::shared::utils::DbPool;

/// Describes one table-backed resource: how it is addressed over HTTP and
/// how its rows are read and written. Every resource shares the same
/// list/get/create/update/delete contract through [`RecordStore`].
pub trait RecordSchema: Serialize + Send + Sized + 'static {
    type Request: DeserializeOwned + Send + 'static;

    /// Path segment under `/api`, e.g. `gap-assessments`.
    const RESOURCE: &'static str;
    /// Human label used in not-found messages.
    const LABEL: &'static str;

    /// Fields that must be present and non-blank, as `(name, value)` pairs.
    fn required_fields(request: &Self::Request) -> Vec<(&'static str, &str)>;

    fn list(conn: &mut PgConnection) -> QueryResult<Vec<Self>>;
    fn find(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Self>>;
    fn insert(conn: &mut PgConnection, request: Self::Request) -> QueryResult<Self>;
    /// Replaces every mutable column. `None` when no row has `id`.
    fn update(conn: &mut PgConnection, id: i32, request: Self::Request)
        -> QueryResult<Option<Self>>;
    /// Number of rows removed.
    fn delete(conn: &mut PgConnection, id: i32) -> QueryResult<usize>;
}

pub fn validate_required<R: RecordSchema>(request: &R::Request) -> Result<(), ApiError> {
    match R::required_fields(request)
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        Some((field, _)) => Err(ApiError::InvalidArgument(format!("{field} is required"))),
        None => Ok(()),
    }
}

/// Path identifiers must be positive integers.
pub fn parse_record_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidArgument("Invalid ID".to_string())),
    }
}

pub struct RecordStore<R: RecordSchema> {
    pool: DbPool,
    _schema: PhantomData<fn() -> R>,
}

impl<R: RecordSchema> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<R: RecordSchema> RecordStore<R> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _schema: PhantomData,
        }
    }

    fn not_found() -> ApiError {
        ApiError::NotFound(format!("{} not found", R::LABEL))
    }

    async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, ApiError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut *conn)
        })
        .await?
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.run(|conn| R::list(conn).map_err(storage_error)).await
    }

    pub async fn get(&self, id: i32) -> Result<R, ApiError> {
        self.run(move |conn| R::find(conn, id).map_err(storage_error))
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn create(&self, request: R::Request) -> Result<R, ApiError> {
        validate_required::<R>(&request)?;
        self.run(move |conn| R::insert(conn, request).map_err(storage_error))
            .await
    }

    pub async fn update(&self, id: i32, request: R::Request) -> Result<R, ApiError> {
        validate_required::<R>(&request)?;
        self.run(move |conn| R::update(conn, id, request).map_err(storage_error))
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let affected = self
            .run(move |conn| R::delete(conn, id).map_err(storage_error))
            .await?;
        if affected == 0 {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

// Missing rows surface as `None` or a zero count, so any diesel error is a
// storage failure.
fn storage_error(e: diesel::result::Error) -> ApiError {
    ApiError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("42").ok(), Some(42));
        assert_eq!(parse_record_id(" 7 ").ok(), Some(7));
        for bad in ["0", "-3", "abc", "1.5", "", "99999999999"] {
            assert!(
                matches!(parse_record_id(bad), Err(ApiError::InvalidArgument(_))),
                "{bad} should be rejected"
            );
        }
    }
}
