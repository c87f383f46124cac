//! Recording fakes for the git and generation collaborators.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use diffscribe::commands::CommandContext;
use diffscribe::config::{ConfigPaths, ResolvedCredentials};
use diffscribe::diff::DiffError;
use diffscribe::diff::git::GitCollaborator;
use diffscribe::env::Env;
use diffscribe::providers::{GenerationBackend, GenerationRequest, ProviderError, TokenStream};

/// One observed backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Stream(GenerationRequest),
    Complete(GenerationRequest),
}

impl Call {
    pub fn prompt(&self) -> &str {
        match self {
            Call::Stream(r) | Call::Complete(r) => &r.prompt,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Call::Stream(_))
    }
}

/// How a scripted call should fail.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// The call itself is rejected.
    Reject,
    /// The stream yields one fragment, then an error.
    MidStream,
}

/// Backend that answers every call with `reply <n>` and records it.
#[derive(Default)]
pub struct ScriptedBackend {
    calls: Mutex<Vec<Call>>,
    failure: Option<(usize, Failure)>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the call with zero-based number `call`.
    pub fn failing_at(call: usize, failure: Failure) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: Some((call, failure)),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> (usize, Option<Failure>) {
        let mut calls = self.calls.lock().unwrap();
        let n = calls.len();
        calls.push(call);
        let failure = self
            .failure
            .and_then(|(at, failure)| (at == n).then_some(failure));
        (n, failure)
    }
}

fn rejected() -> ProviderError {
    ProviderError::Api {
        status: 500,
        message: "scripted failure".into(),
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let (n, failure) = self.record(Call::Complete(request.clone()));
        match failure {
            Some(_) => Err(rejected()),
            None => Ok(format!("  reply {n}\n")),
        }
    }

    async fn stream(&self, request: &GenerationRequest) -> Result<TokenStream, ProviderError> {
        let (n, failure) = self.record(Call::Stream(request.clone()));
        let tokens: Vec<Result<String, ProviderError>> = match failure {
            Some(Failure::Reject) => return Err(rejected()),
            Some(Failure::MidStream) => vec![
                Ok("partial ".to_string()),
                Err(ProviderError::Stream("connection reset".into())),
            ],
            None => vec![Ok("reply ".to_string()), Ok(n.to_string())],
        };
        Ok(futures::stream::iter(tokens).boxed())
    }
}

/// Git fake that records every call and returns a fixed diff.
pub struct RecordingGit {
    body: String,
    is_repo: bool,
    repo_checks: Mutex<usize>,
    diffs: Mutex<Vec<Vec<String>>>,
}

impl RecordingGit {
    pub fn with_diff(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            is_repo: true,
            repo_checks: Mutex::new(0),
            diffs: Mutex::new(Vec::new()),
        })
    }

    pub fn outside_repo() -> Arc<Self> {
        Arc::new(Self {
            body: String::new(),
            is_repo: false,
            repo_checks: Mutex::new(0),
            diffs: Mutex::new(Vec::new()),
        })
    }

    pub fn repo_checks(&self) -> usize {
        *self.repo_checks.lock().unwrap()
    }

    pub fn diffs(&self) -> Vec<Vec<String>> {
        self.diffs.lock().unwrap().clone()
    }

    /// Total calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.repo_checks() + self.diffs().len()
    }
}

#[async_trait]
impl GitCollaborator for RecordingGit {
    async fn ensure_repository(&self) -> Result<(), DiffError> {
        *self.repo_checks.lock().unwrap() += 1;
        if self.is_repo {
            Ok(())
        } else {
            Err(DiffError::NotARepository("fatal: not a git repository".into()))
        }
    }

    async fn diff(&self, args: &[String]) -> Result<String, DiffError> {
        self.diffs.lock().unwrap().push(args.to_vec());
        Ok(self.body.clone())
    }
}

/// Context with no config files and the given env.
pub fn context(env: Env, git: Arc<RecordingGit>, backend: Arc<ScriptedBackend>) -> CommandContext {
    context_with_paths(env, ConfigPaths::default(), git, backend)
}

pub fn context_with_paths(
    env: Env,
    paths: ConfigPaths,
    git: Arc<RecordingGit>,
    backend: Arc<ScriptedBackend>,
) -> CommandContext {
    CommandContext {
        env,
        paths,
        git,
        backend: Box::new(move |_credentials: &ResolvedCredentials| {
            let backend: Arc<dyn GenerationBackend> = backend.clone();
            Ok(backend)
        }),
    }
}

/// Env carrying only an API key.
pub fn env_with_key() -> Env {
    Env::mock([("DIFFSCRIBE_API_KEY", "sk-test-key-123456")])
}

/// Write a config file under `dir` and return its path.
pub fn write_config(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
