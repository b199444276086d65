//! HTTP route handlers.
//!
//! The health route is mounted at the configured path with `Cache-Control:
//! no-store`. Request tracing is enabled via middleware that generates a
//! unique request ID for each incoming request, allowing correlation of all
//! logs within a request.

pub mod health;

use axum::{middleware, routing::get, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the health route and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Explicit HEAD handler takes precedence over the implicit HEAD-for-GET
    let health_routes = Router::new()
        .route(
            &state.config.health.path,
            get(health::detailed).head(health::probe),
        )
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(health_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
