//! Configuration module for environment variable parsing.
//!
//! All webhook-contract settings are required at process start; the loader
//! fails with an error naming the missing variable rather than limping
//! along until a downstream call fails.

use std::env;

use anyhow::{Context, Result};

/// Default Gemini model when GEMINI_MODEL is not set.
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini model identifier
    pub gemini_model: String,

    /// SMTP server hostname
    pub smtp_host: String,

    /// SMTP server port (implicit TLS)
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_user: String,

    /// SMTP password
    pub smtp_pass: String,

    /// Sender email address
    pub email_from: String,

    /// Recipient email address for summaries
    pub email_to: String,

    /// Expected webhook Basic-auth username
    pub webhook_username: String,

    /// Expected webhook Basic-auth password
    pub webhook_password: String,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            gemini_api_key: required("GEMINI_API_KEY")?,

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),

            smtp_host: required("SMTP_HOST")?,

            smtp_port: required("SMTP_PORT")?
                .parse()
                .context("SMTP_PORT is not a valid port number")?,

            smtp_user: required("SMTP_USER")?,

            smtp_pass: required("SMTP_PASS")?,

            email_from: required("EMAIL_FROM")?,

            email_to: required("EMAIL_TO")?,

            webhook_username: required("WEBHOOK_USERNAME")?,

            webhook_password: required("WEBHOOK_PASSWORD")?,

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Read a required environment variable.
fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} is required", name))
}
