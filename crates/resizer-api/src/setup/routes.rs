//! Router construction

pub mod health;

use crate::constants::API_PREFIX;
use crate::handlers::resize;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use resizer_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/resize", post(resize::resize))
        .route("/resize/{name}", get(resize::resize_by_path));

    Router::new()
        .route("/health", get(health::liveness_check))
        .nest(API_PREFIX, api_routes)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
