//! Clap argument types and their conversion into command options.

use clap::Parser;
use std::path::PathBuf;

use diffscribe::commands::config::ConfigOptions;
use diffscribe::commands::message::MessageOptions;
use diffscribe::commands::review::ReviewOptions;
use diffscribe::constants;
use diffscribe::models::SelectionFlags;

/// AI-generated code reviews and commit messages from git diffs.
#[derive(Parser, Debug)]
#[command(name = "diffscribe", version = constants::VERSION, about)]
pub struct Cli {
    /// Show debug logging on stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Review changes (or pasted text) chunk by chunk, then summarize.
    Review(ReviewArgs),

    /// Generate a Conventional Commits message.
    Message(MessageArgs),

    /// Store the API key and model in the global config.
    Config(ConfigArgs),
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Lines of context around each change.
    #[arg(short = 'U', long = "unified", default_value_t = constants::REVIEW_CONTEXT_LINES)]
    pub unified: u32,

    /// Review this text instead of a git diff.
    #[arg(short, long)]
    pub text: Option<String>,

    /// Review the contents of this file instead of a git diff.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Explain what the git diff command does before reviewing.
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    /// Arguments passed through to `git diff` (default: HEAD).
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Paths after `--`, limiting the diff to these files or directories.
    #[arg(last = true, value_name = "PATH")]
    pub paths: Vec<String>,
}

impl ReviewArgs {
    /// Rebuild the pass-through list with its `--` separator, and let a
    /// `-U<n>` given among the pass-through arguments set the context.
    pub fn into_options(self) -> ReviewOptions {
        let (mut passthrough, unified) = take_unified(self.args);
        if !self.paths.is_empty() {
            if !passthrough.iter().any(|a| a == "--") {
                passthrough.push("--".to_string());
            }
            passthrough.extend(self.paths);
        }

        ReviewOptions {
            selection: SelectionFlags {
                passthrough,
                text: self.text,
                file: self.file,
                ..Default::default()
            },
            context_lines: unified.unwrap_or(self.unified),
            explain: self.explain,
        }
    }
}

/// Remove `-U<n>`, `-U <n>`, `--unified=<n>` and `--unified <n>` from the
/// revision part of `args`. The last valid value wins, as in git.
fn take_unified(args: Vec<String>) -> (Vec<String>, Option<u32>) {
    let mut kept = Vec::with_capacity(args.len());
    let mut unified = None;
    let mut iter = args.into_iter().peekable();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            kept.push(arg);
            kept.extend(iter);
            break;
        }

        let attached = arg
            .strip_prefix("--unified=")
            .or_else(|| arg.strip_prefix("-U").filter(|v| !v.is_empty()));
        if let Some(value) = attached {
            match value.parse::<u32>() {
                Ok(n) => unified = Some(n),
                Err(_) => kept.push(arg),
            }
            continue;
        }

        if arg == "-U" || arg == "--unified" {
            if let Some(n) = iter.peek().and_then(|v| v.parse::<u32>().ok()) {
                unified = Some(n);
                iter.next();
                continue;
            }
        }
        kept.push(arg);
    }

    (kept, unified)
}

/// Arguments for the `message` subcommand.
#[derive(Parser, Debug)]
pub struct MessageArgs {
    /// Use the changes introduced by this commit.
    #[arg(short, long)]
    pub commit: Option<String>,

    /// Use changes to these files relative to HEAD.
    #[arg(short, long, num_args = 1..)]
    pub files: Vec<String>,

    /// Use staged changes (the default).
    #[arg(short, long, default_value_t = false)]
    pub staged: bool,

    /// Lines of context around each change.
    #[arg(short = 'U', long = "unified", default_value_t = constants::MESSAGE_CONTEXT_LINES)]
    pub unified: u32,
}

impl MessageArgs {
    pub fn into_options(self) -> MessageOptions {
        MessageOptions {
            selection: SelectionFlags {
                commit: self.commit,
                files: self.files,
                staged: self.staged,
                ..Default::default()
            },
            context_lines: self.unified,
        }
    }
}

/// Arguments for the `config` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// API key for the generation backend.
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Model identifier, e.g. gpt-4o-mini.
    #[arg(short, long)]
    pub model: Option<String>,
}

impl ConfigArgs {
    pub fn into_options(self) -> ConfigOptions {
        ConfigOptions {
            api_key: self.api_key,
            model: self.model,
        }
    }
}
