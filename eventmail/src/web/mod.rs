//! Web server module for the Rocketlane webhook endpoint.
//!
//! A thin axum application with two routes:
//! - `POST /webhooks/rocketlane`: the authenticated event webhook
//! - `GET /health`: liveness probe

pub mod auth;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use auth::verify_basic_auth;
pub use handlers::{
    health, method_not_allowed, rocketlane_webhook, ApiError, AppState, HealthResponse,
    ProcessingFailed, SummarySent, WebhookRequest,
};

/// Build the application router.
///
/// The webhook route is method-gated: anything other than POST falls
/// through to the 405 handler instead of axum's bare default.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/webhooks/rocketlane",
            post(rocketlane_webhook).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
