//! Diff engine: source selection, git CLI wrapper, input files and chunk splitting.

pub mod chunker;
pub mod file;
pub mod git;
pub mod ignore;

use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::models::{DiffRequest, DiffSource, NormalizedBody};
use git::GitCollaborator;

/// Errors from the diff engine.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Git(String),

    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(String),
}

/// Produce the text body for a request.
///
/// VCS sources run exactly one `git diff`; raw text passes through
/// untouched; file sources read the whole file. The result may be blank,
/// which callers treat as "nothing to process".
pub async fn select(
    request: &DiffRequest,
    git: &dyn GitCollaborator,
) -> Result<NormalizedBody, DiffError> {
    debug!(source = %request.source(), context_lines = request.context_lines(), "selecting input");

    let body = match request.source() {
        DiffSource::RawText(text) => text.clone(),
        DiffSource::FilePath(path) => file::read_input_file(path).await?,
        _ => {
            let args = git::diff_args(request).unwrap_or_default();
            git.diff(&args).await?
        }
    };

    debug!(chars = body.chars().count(), "input selected");
    Ok(NormalizedBody::new(body))
}
