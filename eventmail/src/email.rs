//! Email Service
//!
//! SMTP delivery of the analysis summary. The transport is built once at
//! startup (implicit TLS, as the upstream mailbox provider requires) and
//! shared read-only across requests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::Config;

/// Notification service: delivers an event summary to the configured inbox.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the summary email for one event. Single attempt; errors propagate.
    async fn send_summary(&self, event: &str, summary: &str) -> Result<()>;
}

/// SMTP-backed implementation of [`Mailer`].
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Mailbox,
    to_address: Mailbox,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// Parses both mailbox addresses up front so a bad address fails at
    /// startup instead of on the first webhook.
    pub fn new(config: &Config) -> Result<Self> {
        let from_address: Mailbox = config
            .email_from
            .parse()
            .context("EMAIL_FROM is not a valid email address")?;

        let to_address: Mailbox = config
            .email_to
            .parse()
            .context("EMAIL_TO is not a valid email address")?;

        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .context("Failed to create SMTP transport")?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            mailer,
            from_address,
            to_address,
        })
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send_summary(&self, event: &str, summary: &str) -> Result<()> {
        let subject = format!(
            "Rocketlane Project Analysis - {}",
            Local::now().format("%Y-%m-%d")
        );

        let email = Message::builder()
            .from(self.from_address.clone())
            .to(self.to_address.clone())
            .subject(subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(build_html_body(event, summary))
            .context("Failed to build email message")?;

        self.mailer
            .send(email)
            .await
            .context("Failed to send email via SMTP")?;

        info!(
            event = %event,
            subject = %subject,
            summary_length = summary.len(),
            "summary_email_sent"
        );

        Ok(())
    }
}

/// Build the HTML email body for an event summary.
///
/// The summary is escaped since it is model-generated prose. The event tag
/// is interpolated as-is, matching the upstream automation this replaces.
pub fn build_html_body(event: &str, summary: &str) -> String {
    format!(
        "<h2>Project Analysis Summary</h2>\n\
         <p><strong>Event Type:</strong> {}</p>\n\
         <hr />\n\
         <h3>Analysis</h3>\n\
         <pre style=\"background: #f4f4f4; padding: 10px; border-radius: 5px; overflow-x: auto;\">{}</pre>\n\
         <hr />\n\
         <p><small>Generated automatically by Rocketlane → Gemini AI → Email automation</small></p>",
        event,
        escape_html(summary)
    )
}

/// Escape the five HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
