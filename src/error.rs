use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::posts::policy::UploadRejection;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(#[from] UploadRejection),

    #[error("{0}")]
    BadRequest(String),

    #[error("storage operation failed: {0}")]
    Storage(#[source] anyhow::Error),

    /// Object landed in the store but the metadata write failed; the key is
    /// kept for manual reconciliation.
    #[error("object {key} stored but metadata write failed")]
    Orphaned {
        key: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return ApiError::Conflict("Email or username already registered".into());
            }
        }
        ApiError::Database(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Storage(e) => {
                error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage operation failed".to_string(),
                )
            }
            ApiError::Orphaned { key, source } => {
                error!(%key, error = %source, "stored object has no metadata record");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upload could not be completed".to_string(),
                )
            }
            ApiError::Database(e) => {
                error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        let mut response = (status, body).into_response();
        if matches!(self, ApiError::Unauthenticated) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, "Bearer".parse().unwrap());
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
