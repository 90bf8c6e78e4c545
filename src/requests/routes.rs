// src/requests/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the router for the demonstration validation endpoints
pub fn requests_routes() -> Router {
    Router::new()
        .route("/Test/TestRequest", post(handlers::test_request))
        .route("/Test/TestNoRequest", post(handlers::test_no_request))
        .route("/Test/AddRequest", post(handlers::add_request))
        .route("/health", get(handlers::health))
}
