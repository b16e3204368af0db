//! # FAQ Model Client
//!
//! The generative-model boundary of the assistant. Query expansion and answer
//! generation both go through [`GenerativeModel`]: one prompt in, at most
//! `max_output_tokens` of text out.
//!
//! [`GeminiClient`] talks to the Google Gemini `generateContent` REST API.
//! Each HTTP call is bounded by `request_timeout_secs`; retrying is left to
//! the caller.

mod config;
mod error;
mod gemini;

pub use config::ModelConfig;
pub use error::{ModelError, Result};
pub use gemini::GeminiClient;

use async_trait::async_trait;

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Short identifier used in log lines
    fn name(&self) -> &str;

    /// Whether a request can be attempted at all (e.g. credentials exist).
    ///
    /// Callers check this to skip calls that cannot succeed.
    fn is_available(&self) -> bool {
        true
    }

    /// Generate a completion for `prompt`.
    ///
    /// `Ok(None)` means the call succeeded but the model produced no text.
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<Option<String>>;
}
