//! Git CLI wrapper for producing diffs.
//!
//! Shells out to `git` via `tokio::process::Command`. The
//! [`GitCollaborator`] trait is the seam the command pipelines use, so
//! tests can substitute a recording fake.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::DiffError;
use super::ignore;
use crate::models::{DiffRequest, DiffSource};

/// Operations the pipeline needs from version control.
#[async_trait]
pub trait GitCollaborator: Send + Sync {
    /// Fail unless the working directory is inside a git work tree.
    async fn ensure_repository(&self) -> Result<(), DiffError>;

    /// Run `git diff <args>` and return its unified diff output.
    async fn diff(&self, args: &[String]) -> Result<String, DiffError>;
}

/// [`GitCollaborator`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

#[async_trait]
impl GitCollaborator for GitCli {
    async fn ensure_repository(&self) -> Result<(), DiffError> {
        let output = tokio::process::Command::new("git")
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| DiffError::Git(format!("failed to run git: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() || stdout.trim() != "true" {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiffError::NotARepository(stderr.trim().to_string()));
        }
        Ok(())
    }

    async fn diff(&self, args: &[String]) -> Result<String, DiffError> {
        debug!(?args, workdir = %self.workdir.display(), "running git diff");

        let output = tokio::process::Command::new("git")
            .arg("diff")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| DiffError::Git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiffError::Git(format!(
                "git diff failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| DiffError::Git(format!("git output is not valid UTF-8: {e}")))
    }
}

/// Build the `git diff` argument list for a VCS-backed request.
///
/// Shape: `[<selector args>, -U<n>, --, <paths or .>, :!<ignored>...]`.
/// Returns `None` for raw-text and file sources.
pub fn diff_args(request: &DiffRequest) -> Option<Vec<String>> {
    let unified = format!("-U{}", request.context_lines());

    let (selector, paths): (Vec<String>, Vec<String>) = match request.source() {
        DiffSource::ByCommit(commit) => (vec![format!("{commit}^..{commit}")], Vec::new()),
        DiffSource::ByFiles(files) => (vec!["HEAD".to_string()], files.clone()),
        DiffSource::Staged => (vec!["--staged".to_string()], Vec::new()),
        DiffSource::Passthrough(args) => match args.iter().position(|a| a == "--") {
            Some(sep) => (args[..sep].to_vec(), args[sep + 1..].to_vec()),
            None => (args.clone(), Vec::new()),
        },
        DiffSource::RawText(_) | DiffSource::FilePath(_) => return None,
    };

    let mut args = selector;
    args.push(unified);
    args.push("--".to_string());
    if paths.is_empty() {
        args.push(".".to_string());
    } else {
        args.extend(paths);
    }
    args.extend(ignore::exclude_pathspecs());
    Some(args)
}
