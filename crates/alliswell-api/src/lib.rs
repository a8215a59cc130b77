//! alliswell-api
//!
//! HTTP surface of the site: the chat relay, assessment acknowledgement,
//! questionnaire schema, health check and widget entry redirects.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Widget entry points
        .route("/assessment", get(routes::pages::open_assessment))
        .route("/chat", get(routes::pages::open_chat))
        // API
        .route(
            "/api/assessment/questions",
            get(routes::assessment::questions),
        )
        .route(
            "/api/assessment",
            post(routes::assessment::submit_assessment),
        )
        .route("/api/chat", post(routes::chat::relay_chat))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
