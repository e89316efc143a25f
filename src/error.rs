//! Errors surfaced to HTTP callers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("invalid {name} parameter: '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("{0}")]
    Validation(String),

    #[error("missing or unknown admin token")]
    Unauthorized,

    #[error("not allowed to {0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidParameter { .. }
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store causes stay in the log
        let message = match &self {
            AppError::Store(e) => {
                error!("Store failure: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_error_is_500_with_body() {
        let response = AppError::Store(anyhow::anyhow!("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error");
    }

    #[test]
    fn test_statuses() {
        assert_eq!(AppError::MissingParameter("date").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("manage users").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("event").status(), StatusCode::NOT_FOUND);
    }
}
