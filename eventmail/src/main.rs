//! EventMail Web Server - Rocketlane webhook to email bridge.
//!
//! This binary serves a single authenticated webhook endpoint that:
//! - Receives project-event notifications from Rocketlane
//! - Summarizes the event payload through Gemini
//! - Emails the summary to the configured recipient
//!
//! Requests are processed synchronously; there is no queue and no retry.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eventmail::web::router;
use eventmail::{AppState, Config, EmailService, GeminiClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration; every webhook-contract variable is required
    let config = Config::from_env()?;
    info!(
        port = config.port,
        gemini_model = %config.gemini_model,
        smtp_host = %config.smtp_host,
        smtp_port = config.smtp_port,
        email_to = %config.email_to,
        "config_loaded"
    );

    // Construct the upstream clients once; they are shared read-only
    let summarizer = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    let mailer = EmailService::new(&config).context("Failed to create email service")?;
    info!("upstream_clients_created");

    // Create application state
    let port = config.port;
    let state = AppState::new(config, Arc::new(summarizer), Arc::new(mailer));

    // Build the router
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
