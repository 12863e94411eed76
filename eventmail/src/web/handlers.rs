//! Webhook endpoint handlers.
//!
//! The webhook handler is strictly linear per request:
//! 1. Verify Basic authentication
//! 2. Summarize the event payload through Gemini
//! 3. Email the summary
//! 4. Return an acknowledgment with a truncated preview
//!
//! There is no queue and no retry; a failure at any step becomes the
//! response for that request.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::email::Mailer;
use crate::summarize::Summarizer;
use crate::web::auth::verify_basic_auth;
use crate::Config;

/// Number of summary characters echoed back in the response preview.
const PREVIEW_CHARS: usize = 100;

/// Shared application state.
///
/// The clients are constructed once at startup and shared read-only
/// across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Arc<dyn Summarizer>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(
        config: Config,
        summarizer: Arc<dyn Summarizer>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            summarizer,
            mailer,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Rocketlane Webhook
// =============================================================================

/// Rocketlane webhook payload.
///
/// `data` is schema-less: whatever the event carries is passed through to
/// the summarizer without interpretation.
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Error body for rejected requests (wrong method, bad credentials).
#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
}

/// Success acknowledgment with a truncated summary preview.
#[derive(Serialize)]
pub struct SummarySent {
    pub success: bool,
    pub message: &'static str,
    pub summary: String,
}

/// Failure body carrying the upstream error message.
#[derive(Serialize)]
pub struct ProcessingFailed {
    pub success: bool,
    pub error: String,
}

/// Fallback for non-POST methods on the webhook route.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiError {
            error: "Method Not Allowed",
        }),
    )
}

/// Rocketlane webhook endpoint.
///
/// Authenticates the delivery, runs the summarize-then-notify sequence,
/// and maps any upstream failure to a 500 carrying the error message.
///
/// The body is taken raw and deserialized only after authentication, so
/// an unauthenticated delivery is always answered with 401 no matter
/// what it carries.
pub async fn rocketlane_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    // Missing and wrong credentials are deliberately indistinguishable.
    if !verify_basic_auth(
        auth_header,
        &state.config.webhook_username,
        &state.config.webhook_password,
    ) {
        warn!("webhook_unauthorized");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiError {
                error: "Unauthorized",
            }),
        )
            .into_response();
    }

    let request: WebhookRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "webhook_body_invalid");
            return failure_response(e.to_string());
        }
    };

    info!(event = %request.event, "rocketlane_webhook_received");

    // Step 1: summarize the payload. The email body depends on the result,
    // so the two upstream calls never run concurrently.
    let summary = match state.summarizer.summarize(&request.data).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(event = %request.event, error = %e, "webhook_summarize_failed");
            return failure_response(e.to_string());
        }
    };

    // Step 2: email the summary. A failure here discards the summary; the
    // sender's retry will repeat both calls (no idempotency key).
    if let Err(e) = state.mailer.send_summary(&request.event, &summary).await {
        error!(event = %request.event, error = %e, "webhook_email_failed");
        return failure_response(e.to_string());
    }

    info!(
        event = %request.event,
        summary_length = summary.len(),
        "webhook_processed"
    );

    (
        StatusCode::OK,
        Json(SummarySent {
            success: true,
            message: "Data analyzed and email sent",
            summary: summary_preview(&summary),
        }),
    )
        .into_response()
}

/// Map a processing error to the 500 response body.
fn failure_response(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ProcessingFailed {
            success: false,
            error,
        }),
    )
        .into_response()
}

/// First 100 characters of the summary plus an ellipsis.
///
/// The suffix is appended unconditionally, also for summaries shorter
/// than the preview window.
fn summary_preview(summary: &str) -> String {
    let truncated: String = summary.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
