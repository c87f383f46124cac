//! Generation orchestrator: sequential per-chunk review, summary, and commit messages.

pub mod prompt;

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use thiserror::Error;
use tracing::debug;

use crate::config::{MessageConfig, ReviewConfig};
use crate::constants;
use crate::diff::chunker::Chunk;
use crate::models::ReviewSession;
use crate::output::OutputRenderer;
use crate::providers::{GenerationBackend, GenerationRequest, ProviderError};

/// Which backend call was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Review of the chunk at zero-based `index` out of `total`.
    Chunk { index: usize, total: usize },
    Summary,
    Message,
    Explain,
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationPhase::Chunk { index, total } => {
                write!(f, "chunk {index} ({} of {total})", index + 1)
            }
            GenerationPhase::Summary => write!(f, "summary"),
            GenerationPhase::Message => write!(f, "commit message"),
            GenerationPhase::Explain => write!(f, "command explanation"),
        }
    }
}

/// Errors from the orchestrator.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("generation failed for {phase}: {source}")]
    Generation {
        phase: GenerationPhase,
        source: ProviderError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl OrchestratorError {
    /// The phase that failed, if this is a generation error.
    pub fn phase(&self) -> Option<GenerationPhase> {
        match self {
            OrchestratorError::Generation { phase, .. } => Some(*phase),
            OrchestratorError::Output(_) => None,
        }
    }
}

/// Drives backend calls one at a time and forwards output to a renderer.
pub struct Orchestrator {
    backend: Arc<dyn GenerationBackend>,
    model: String,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GenerationBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Review every chunk in order, then stream one summary.
    ///
    /// Chunk N's stream is fully rendered before chunk N+1 is submitted.
    /// Whitespace-only chunks are skipped. The first failure aborts the
    /// rest of the sequence, including the summary.
    pub async fn run_review<R: OutputRenderer + ?Sized>(
        &self,
        chunks: Vec<Chunk>,
        settings: &ReviewConfig,
        out: &mut R,
    ) -> Result<ReviewSession, OrchestratorError> {
        let total = chunks.len();
        let mut session = ReviewSession::new(chunks);
        if total == 0 {
            return Ok(session);
        }

        out.heading("AI Review:")?;

        for i in 0..total {
            let chunk = &session.chunks()[i];
            if chunk.is_blank() {
                debug!(index = chunk.index, "skipping blank chunk");
                continue;
            }

            let index = chunk.index;
            let request = self.review_request(
                prompt::review_chunk(&chunk.content, &settings.language),
                settings,
            );
            debug!(index, total, "reviewing chunk");

            let text = self
                .stream_to(&request, GenerationPhase::Chunk { index, total }, out)
                .await?;
            out.chunk_delimiter()?;
            session.push_review(index, text);
        }

        if session.reviews().is_empty() {
            return Ok(session);
        }

        out.heading("Overall Summary:")?;
        let request = self.review_request(
            prompt::review_summary(session.reviews(), &settings.language),
            settings,
        );
        let summary = self
            .stream_to(&request, GenerationPhase::Summary, out)
            .await?;
        out.finish()?;
        session.set_summary(summary);

        Ok(session)
    }

    /// Rejoin the chunks and generate one commit message without streaming.
    ///
    /// Nothing is written until the full message is available.
    pub async fn run_message<R: OutputRenderer + ?Sized>(
        &self,
        chunks: &[Chunk],
        settings: &MessageConfig,
        out: &mut R,
    ) -> Result<String, OrchestratorError> {
        let combined = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let request = GenerationRequest::new(&self.model, prompt::commit_message(&combined))
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens);
        debug!(chunks = chunks.len(), "generating commit message");

        let message = self
            .backend
            .complete(&request)
            .await
            .map_err(|source| OrchestratorError::Generation {
                phase: GenerationPhase::Message,
                source,
            })?;
        let message = message.trim().to_string();

        out.heading("AI-generated commit message:")?;
        out.message(&message)?;
        Ok(message)
    }

    /// One-sentence explanation of what a `git diff` command does.
    pub async fn explain(&self, command: &str, language: &str) -> Result<String, OrchestratorError> {
        let request = GenerationRequest::new(&self.model, prompt::explain_command(command, language))
            .temperature(constants::EXPLAIN_TEMPERATURE)
            .max_tokens(constants::EXPLAIN_MAX_TOKENS);

        let text = self
            .backend
            .complete(&request)
            .await
            .map_err(|source| OrchestratorError::Generation {
                phase: GenerationPhase::Explain,
                source,
            })?;
        Ok(text.trim().to_string())
    }

    fn review_request(&self, prompt: String, settings: &ReviewConfig) -> GenerationRequest {
        GenerationRequest::new(&self.model, prompt)
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens)
    }

    /// Forward every fragment of one streaming call and return the full text.
    async fn stream_to<R: OutputRenderer + ?Sized>(
        &self,
        request: &GenerationRequest,
        phase: GenerationPhase,
        out: &mut R,
    ) -> Result<String, OrchestratorError> {
        let generation = |source: ProviderError| OrchestratorError::Generation { phase, source };

        let mut stream = self.backend.stream(request).await.map_err(generation)?;
        let mut text = String::new();
        while let Some(token) = stream.next().await {
            let token = token.map_err(generation)?;
            out.token(&token)?;
            text.push_str(&token);
        }
        Ok(text)
    }
}
