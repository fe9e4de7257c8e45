use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Invalid JSON body: {0}")]
    JsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::JsonRejection(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Pool(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to clients. Storage failures are logged in
    /// full but surface only a generic message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::JsonRejection(e) => e.to_string(),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "internal server error".to_string()
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                "internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "internal server error".to_string()
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Generic JSON error rendering, used by the extractors. The issue and
/// verify handlers wrap `AppError` in their own response envelopes instead.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

