//! Response envelopes and error mapping.
//!
//! # Responsibilities
//! - Define the JSON envelopes returned on success
//! - Map decode, validation and store failures to status codes
//!
//! # Status Mapping
//! ```text
//! decode failure     → 400 "Enter proper parameters."
//! validation failure → 400 "<Field> field has failed. Validation is: <tag> and that ..."
//! store NotFound     → 404 {"error": "..."}
//! other store error  → 500 {"error": "..."}
//! ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::{Account, StoreError};
use crate::validation::ValidationFailure;

/// Body returned for any input that cannot be decoded.
pub const BAD_INPUT_MESSAGE: &str = "Enter proper parameters.";

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub message: &'static str,
    pub account: Account,
}

#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub message: &'static str,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Terminal failure of a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body, path or query could not be decoded into the request shape.
    #[error("bad input: {0}")]
    BadInput(String),

    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadInput(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::BadInput(detail) => {
                tracing::warn!(status = status.as_u16(), detail = %detail, "Rejected undecodable input");
            }
            ApiError::Invalid(failure) => {
                for violation in &failure.violations {
                    tracing::warn!(
                        field = violation.field,
                        tag = violation.tag,
                        value = %violation.value,
                        "Validation failed"
                    );
                }
            }
            ApiError::Store(StoreError::NotFound) => {
                tracing::warn!(status = status.as_u16(), "Account not found");
            }
            ApiError::Store(e) => {
                tracing::error!(status = status.as_u16(), error = %e, "Store operation failed");
            }
        }

        match self {
            ApiError::BadInput(_) => (status, Json(BAD_INPUT_MESSAGE)).into_response(),
            ApiError::Invalid(failure) => (status, Json(failure.to_string())).into_response(),
            ApiError::Store(e) => (status, Json(ErrorResponse { error: e.to_string() })).into_response(),
        }
    }
}
