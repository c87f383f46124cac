//! Shared types used across all modules.
//!
//! Defines the diff selection model (what to feed the generator), the
//! normalized text body, and the per-run review session. Other modules
//! import from here rather than reaching into each other's internals.

pub mod session;

use std::fmt;
use std::path::PathBuf;

pub use session::{ChunkReview, ReviewSession};

/// Where the text to process comes from. Exactly one is active per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// Changes introduced by a single commit (`ref^..ref`).
    ByCommit(String),
    /// Changes to specific paths relative to `HEAD`.
    ByFiles(Vec<String>),
    /// Changes staged in the index.
    Staged,
    /// Free-form arguments handed to `git diff` as-is.
    Passthrough(Vec<String>),
    /// Text supplied directly on the command line.
    RawText(String),
    /// Text read from a file on disk.
    FilePath(PathBuf),
}

impl DiffSource {
    /// Whether this source needs the git collaborator.
    pub fn is_vcs(&self) -> bool {
        matches!(
            self,
            DiffSource::ByCommit(_)
                | DiffSource::ByFiles(_)
                | DiffSource::Staged
                | DiffSource::Passthrough(_)
        )
    }
}

impl fmt::Display for DiffSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffSource::ByCommit(commit) => write!(f, "commit {commit}"),
            DiffSource::ByFiles(files) => write!(f, "files {}", files.join(", ")),
            DiffSource::Staged => write!(f, "staged changes"),
            DiffSource::Passthrough(args) => write!(f, "git diff {}", args.join(" ")),
            DiffSource::RawText(_) => write!(f, "text input"),
            DiffSource::FilePath(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// A resolved, immutable request for one body of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    source: DiffSource,
    context_lines: u32,
}

impl DiffRequest {
    pub fn new(source: DiffSource, context_lines: u32) -> Self {
        Self {
            source,
            context_lines,
        }
    }

    pub fn source(&self) -> &DiffSource {
        &self.source
    }

    /// Unchanged lines of context around each hunk (`-U<n>`).
    pub fn context_lines(&self) -> u32 {
        self.context_lines
    }
}

/// Raw selector flags as collected from the command line.
///
/// Several may be set at once; [`SelectionFlags::resolve`] picks one.
#[derive(Debug, Clone, Default)]
pub struct SelectionFlags {
    pub commit: Option<String>,
    pub files: Vec<String>,
    pub staged: bool,
    pub passthrough: Vec<String>,
    pub text: Option<String>,
    pub file: Option<PathBuf>,
}

impl SelectionFlags {
    /// Pick the active source by fixed priority:
    /// commit > files > staged > passthrough > text > file.
    ///
    /// Returns `None` when no selector is set, leaving the default to
    /// the calling command.
    pub fn resolve(self) -> Option<DiffSource> {
        if let Some(commit) = self.commit.filter(|c| !c.trim().is_empty()) {
            Some(DiffSource::ByCommit(commit))
        } else if !self.files.is_empty() {
            Some(DiffSource::ByFiles(self.files))
        } else if self.staged {
            Some(DiffSource::Staged)
        } else if !self.passthrough.is_empty() {
            Some(DiffSource::Passthrough(self.passthrough))
        } else if let Some(text) = self.text {
            Some(DiffSource::RawText(text))
        } else {
            self.file.map(DiffSource::FilePath)
        }
    }

    /// Resolve with a fallback source and build the request.
    pub fn into_request(self, fallback: DiffSource, context_lines: u32) -> DiffRequest {
        DiffRequest::new(self.resolve().unwrap_or(fallback), context_lines)
    }
}

/// The single text value produced by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedBody(String);

impl NormalizedBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only: nothing worth sending to the backend.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flags() -> SelectionFlags {
        SelectionFlags {
            commit: Some("abc123".into()),
            files: vec!["src/lib.rs".into()],
            staged: true,
            passthrough: vec!["main..feature".into()],
            text: Some("fn main() {}".into()),
            file: Some(PathBuf::from("notes.txt")),
        }
    }

    #[test]
    fn commit_wins_over_everything() {
        assert_eq!(
            all_flags().resolve(),
            Some(DiffSource::ByCommit("abc123".into()))
        );
    }

    #[test]
    fn precedence_walks_down_the_list() {
        let mut flags = all_flags();
        flags.commit = None;
        assert_eq!(
            flags.clone().resolve(),
            Some(DiffSource::ByFiles(vec!["src/lib.rs".into()]))
        );

        flags.files.clear();
        assert_eq!(flags.clone().resolve(), Some(DiffSource::Staged));

        flags.staged = false;
        assert_eq!(
            flags.clone().resolve(),
            Some(DiffSource::Passthrough(vec!["main..feature".into()]))
        );

        flags.passthrough.clear();
        assert_eq!(
            flags.clone().resolve(),
            Some(DiffSource::RawText("fn main() {}".into()))
        );

        flags.text = None;
        assert_eq!(
            flags.clone().resolve(),
            Some(DiffSource::FilePath(PathBuf::from("notes.txt")))
        );

        flags.file = None;
        assert_eq!(flags.resolve(), None);
    }

    #[test]
    fn blank_commit_is_ignored() {
        let flags = SelectionFlags {
            commit: Some("  ".into()),
            staged: true,
            ..Default::default()
        };
        assert_eq!(flags.resolve(), Some(DiffSource::Staged));
    }

    #[test]
    fn into_request_uses_fallback() {
        let request = SelectionFlags::default().into_request(DiffSource::Staged, 3);
        assert_eq!(request.source(), &DiffSource::Staged);
        assert_eq!(request.context_lines(), 3);
    }

    #[test]
    fn vcs_sources() {
        assert!(DiffSource::Staged.is_vcs());
        assert!(DiffSource::ByCommit("HEAD".into()).is_vcs());
        assert!(!DiffSource::RawText("x".into()).is_vcs());
        assert!(!DiffSource::FilePath(PathBuf::from("x")).is_vcs());
    }

    #[test]
    fn blank_body() {
        assert!(NormalizedBody::new("").is_blank());
        assert!(NormalizedBody::new(" \n\t\n").is_blank());
        assert!(!NormalizedBody::new("+ added").is_blank());
    }
}
