//! Gemini summarization client.
//!
//! Wraps the Gemini `generateContent` REST endpoint: the webhook's `data`
//! payload is pretty-printed, embedded in a fixed analysis prompt, and
//! submitted in a single attempt. The returned text is treated as opaque
//! prose; no retry, no output validation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

/// Base URL for the Gemini API.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors from the Gemini client.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("gemini request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the API.
    #[error("gemini returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response parsed but contained no candidate text.
    #[error("gemini response contained no text")]
    EmptyResponse,
}

/// Summarization service: turns an arbitrary JSON payload into prose.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a webhook payload. Single attempt; errors propagate.
    async fn summarize(&self, payload: &Value) -> anyhow::Result<String>;
}

/// Gemini-backed implementation of [`Summarizer`].
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client for the given API key and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, GEMINI_API_BASE.to_string())
    }

    /// Create a client pointed at an alternate API base (used by tests).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, SummarizeError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            // Character-based cut; a byte offset could land inside a
            // multibyte character and panic.
            let preview: String = body.chars().take(200).collect();
            error!(
                status_code = status,
                body_preview = %preview,
                "gemini_request_failed"
            );
            return Err(SummarizeError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed)
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, payload: &Value) -> anyhow::Result<String> {
        let prompt = build_prompt(payload);

        info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "gemini_summarize_start"
        );

        let summary = self.generate(prompt).await?;

        info!(summary_length = summary.len(), "gemini_summarize_complete");

        Ok(summary)
    }
}

/// Build the fixed analysis prompt around a pretty-printed payload.
pub fn build_prompt(payload: &Value) -> String {
    let data = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| payload.to_string());

    format!(
        "Please analyze the following project data from Rocketlane and provide \
         a concise summary with key insights and action items:\n\n{}",
        data
    )
}

/// Pull the first candidate's text out of a generateContent response.
fn extract_text(response: GenerateContentResponse) -> Result<String, SummarizeError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(SummarizeError::EmptyResponse)
}

// =============================================================================
// Wire types (generateContent request/response)
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
