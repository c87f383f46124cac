//! GenerationBackend trait and LLM integration.
//!
//! Provides an abstraction layer over the HTTP chat-completions API so
//! the orchestrator can be driven by a scripted backend in tests.

pub mod openai;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

pub use openai::OpenAiBackend;

/// Errors from the generation backend.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request to LLM backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM response stream failed: {0}")]
    Stream(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// One call to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: crate::constants::DEFAULT_TEMPERATURE,
            max_tokens: crate::constants::REVIEW_MAX_TOKENS,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Lazy, ordered sequence of text fragments for one call.
///
/// Dropping the stream abandons the underlying request.
pub type TokenStream = BoxStream<'static, Result<String, ProviderError>>;

/// Trait for text-generation backends.
///
/// Every call is independent; the backend keeps no conversation state
/// between calls.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate the full response before returning.
    async fn complete(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Start a streaming generation and return its fragments.
    async fn stream(&self, request: &GenerationRequest) -> Result<TokenStream, ProviderError>;
}
