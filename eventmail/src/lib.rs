//! EventMail - Rocketlane webhook to email bridge.
//!
//! This library provides the modules behind the `eventmail-web` binary:
//! a single authenticated webhook endpoint that forwards Rocketlane
//! project events to Gemini for summarization and emails the result.
//!
//! ## Request Flow
//!
//! ```text
//! Rocketlane webhook → authenticate → Gemini summary → SMTP email → 200 OK
//! ```

pub mod config;
pub mod email;
pub mod summarize;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use email::{EmailService, Mailer};
pub use summarize::{GeminiClient, Summarizer};
pub use web::AppState;
