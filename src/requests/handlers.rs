// src/requests/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::common::{ApiError, AppState, ValidationResult};
use crate::requests::models::*;
use crate::validation::request_validate;

/// POST /Test/TestRequest - validate with the validator resolved at startup
pub async fn test_request(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<TestRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(request) = payload?;

    let result = request_validate(state.validators.test_request.as_deref(), &request).await?;

    info!(
        is_valid = result.is_valid(),
        error_count = result.error_count(),
        "TestRequest validated"
    );
    Ok(Json(result))
}

/// POST /Test/TestNoRequest - same path, but no validator is bound
pub async fn test_no_request(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<TestNoRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(request) = payload?;

    let result = request_validate(state.validators.test_no_request.as_deref(), &request).await?;
    Ok(Json(result))
}

/// POST /Test/AddRequest - resolve through the validator control, one scope per request
pub async fn add_request(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AddRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(request) = payload?;

    let scope = state.validator_control.create_scope();
    let result = state
        .validator_control
        .request_validate_in(&scope, &request)
        .await?;

    info!(
        is_valid = result.is_valid(),
        error_count = result.error_count(),
        "AddRequest validated"
    );
    Ok(Json(result))
}

/// GET /health
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "services": state.services.len(),
    }))
}
