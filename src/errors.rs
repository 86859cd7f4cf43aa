use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::oracle::OracleError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(String),

    #[error("entity extraction error: {0}")]
    Extraction(String),

    #[error("availability service error: {0}")]
    Oracle(#[from] OracleError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Extraction(_) => StatusCode::BAD_GATEWAY,
            AppError::Oracle(OracleError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Oracle(_) => StatusCode::BAD_GATEWAY,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
