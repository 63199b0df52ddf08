use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::models::TransactionError;

pub const MALFORMED_REQUEST_CODE: &str = "VALIDATION_000";

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("Malformed query: {0}")]
    MalformedQuery(#[from] QueryRejection)
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Transaction(TransactionError::TransactionNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Transaction(TransactionError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Transaction(error) => error.code(),
            ApiError::MalformedBody(_) | ApiError::MalformedQuery(_) => MALFORMED_REQUEST_CODE
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Transaction(TransactionError::Internal(cause)) = &self {
            error!("Internal error while handling request: {cause:?}");
        }

        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string()
        };

        (self.status(), Json(body)).into_response()
    }
}
