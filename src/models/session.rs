//! Per-invocation review state.

use crate::diff::chunker::Chunk;

/// Generated text for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkReview {
    /// Zero-based index of the chunk this review covers.
    pub index: usize,
    pub text: String,
}

/// Everything produced during one `review` run.
///
/// Reviews are appended in chunk order; the summary is set once after
/// the last chunk completes. Lives only for the duration of the command.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    chunks: Vec<Chunk>,
    reviews: Vec<ChunkReview>,
    summary: Option<String>,
}

impl ReviewSession {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
            reviews: Vec::new(),
            summary: None,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn reviews(&self) -> &[ChunkReview] {
        &self.reviews
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub(crate) fn push_review(&mut self, index: usize, text: String) {
        debug_assert!(self.reviews.last().is_none_or(|r| r.index < index));
        self.reviews.push(ChunkReview { index, text });
    }

    pub(crate) fn set_summary(&mut self, text: String) {
        self.summary = Some(text);
    }
}
