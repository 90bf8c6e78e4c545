// Error handling types for the API

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use crate::validation::ValidationConfigError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServer(String),
    ValidatorNotRegistered(String),
    ValidatorFault(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidatorNotRegistered(msg) => write!(f, "Validator Not Registered: {}", msg),
            ApiError::ValidatorFault(msg) => write!(f, "Validator Fault: {}", msg),
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "INTERNAL_SERVER_ERROR",
            ),
            ApiError::ValidatorNotRegistered(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "VALIDATOR_NOT_REGISTERED",
            ),
            ApiError::ValidatorFault(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, "VALIDATOR_FAULT")
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<ValidationConfigError> for ApiError {
    fn from(err: ValidationConfigError) -> Self {
        error!(error = %err, "Validator configuration defect");
        match err {
            ValidationConfigError::UnregisteredValidator(_) => {
                ApiError::ValidatorNotRegistered(err.to_string())
            }
            ValidationConfigError::ValidatorFault { .. } => ApiError::ValidatorFault(err.to_string()),
            ValidationConfigError::Configuration(msg) => ApiError::InternalServer(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
