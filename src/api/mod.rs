//! API module
//!
//! HTTP surface over the user actions.

pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::actions::Dispatcher;

pub use routes::create_router;

/// Build the application router
pub fn build_router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", create_router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
