use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error("malformed statement: {0}")]
    Statement(#[from] sea_orm::sea_query::error::Error),
}

/// Error surfaced to HTTP clients as `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: StorageError,
    },
    #[error("Unexpected number of rows affected")]
    RowCount { id: String, affected: u64 },
}

impl ApiError {
    pub fn storage(message: impl Into<String>, source: StorageError) -> Self {
        Self::Storage { message: message.into(), source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } | ApiError::RowCount { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(reason) => tracing::debug!(reason = %reason, "rejected request"),
            ApiError::Storage { message, source } => {
                tracing::error!(reason = %message, error = %source, "storage failure")
            },
            ApiError::RowCount { id, affected } => {
                tracing::error!(id = %id, affected, "id-keyed write touched more than one row")
            },
        }
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, ApiError>;
