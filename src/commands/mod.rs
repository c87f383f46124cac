//! Command pipelines behind `review`, `message` and `config`.
//!
//! Each pipeline takes its collaborators through a [`CommandContext`] so
//! the binary wires in the real git and HTTP backend while tests inject
//! recording fakes.

pub mod config;
pub mod message;
pub mod review;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, ConfigPaths, ResolvedCredentials};
use crate::diff::DiffError;
use crate::diff::chunker::ChunkError;
use crate::diff::git::{GitCli, GitCollaborator};
use crate::env::Env;
use crate::orchestrator::OrchestratorError;
use crate::providers::{GenerationBackend, OpenAiBackend, ProviderError};

/// How a command ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The selected input was empty or whitespace-only.
    NothingToProcess,
}

/// Errors surfaced by any command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid chunk settings: {0}")]
    Chunk(#[from] ChunkError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Builds a generation backend once credentials are known.
pub type BackendFactory =
    Box<dyn Fn(&ResolvedCredentials) -> Result<Arc<dyn GenerationBackend>, ProviderError> + Send + Sync>;

/// Collaborators shared by every command.
pub struct CommandContext {
    pub env: Env,
    pub paths: ConfigPaths,
    pub git: Arc<dyn GitCollaborator>,
    pub backend: BackendFactory,
}

impl CommandContext {
    /// Real environment, config discovered under `cwd`, `git` and HTTP backend.
    pub fn production(cwd: PathBuf) -> Self {
        Self {
            env: Env::real(),
            paths: ConfigPaths::discover(&cwd),
            git: Arc::new(GitCli::new(cwd)),
            backend: Box::new(|credentials: &ResolvedCredentials| {
                let backend: Arc<dyn GenerationBackend> = Arc::new(OpenAiBackend::new(credentials)?);
                Ok(backend)
            }),
        }
    }
}
