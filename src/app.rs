// src/app.rs
//! Startup wiring shared by the binary and the router tests

use axum::{extract::Extension, middleware, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::common::{AppState, ServerConfig};
use crate::logging_middleware;
use crate::requests::{self, RequestValidators};
use crate::validation::{add_validation, ServiceCollection, ValidationConfigError, ValidatorControl};

/// Register every validator module and resolve what the handlers need
pub fn build_state(config: ServerConfig) -> Result<AppState, ValidationConfigError> {
    let mut services = ServiceCollection::new();
    add_validation(&mut services, [requests::VALIDATORS])?;

    let provider = services.build_provider();
    let validator_control = provider
        .get_service::<ValidatorControl>()
        .ok_or_else(|| {
            ValidationConfigError::Configuration("validator control was not registered".to_string())
        })?;

    let validators = RequestValidators::init(&provider);
    if validators.test_no_request.is_none() {
        warn!("TestNoRequest has no bound validator; its endpoint will report the defect");
    }
    info!(services = provider.len(), ?validators, "Validation services ready");

    Ok(AppState {
        config,
        services: provider,
        validator_control,
        validators,
    })
}

/// Compose routes and layers
pub fn build_router(state: AppState) -> Router {
    let origins: Vec<axum::http::HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static(logging_middleware::REQUEST_ID_HEADER),
        ]);

    let log_bodies = state.config.log_bodies;

    let mut app = Router::new().merge(requests::requests_routes());

    // Add request/response body logging when enabled
    if log_bodies {
        app = app.layer(middleware::from_fn(logging_middleware::log_request_response));
    }

    app.layer(middleware::from_fn(logging_middleware::request_id))
        .layer(Extension(Arc::new(state)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
