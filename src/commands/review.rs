//! `review`: chunked, streamed code review with a closing summary.

use colored::Colorize;
use tracing::debug;

use super::{CommandContext, CommandError, Outcome};
use crate::config::Config;
use crate::diff::{self, chunker::TextSplitter};
use crate::models::{DiffRequest, DiffSource, SelectionFlags};
use crate::orchestrator::Orchestrator;
use crate::output::{self, OutputRenderer};

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    pub selection: SelectionFlags,
    pub context_lines: u32,
    /// Ask the backend what a pass-through `git diff` command does first.
    pub explain: bool,
}

/// Source used when no selector is given: the working tree against `HEAD`.
pub fn default_source() -> DiffSource {
    DiffSource::Passthrough(vec!["HEAD".to_string()])
}

/// Run the review pipeline.
///
/// Credentials and chunk settings are validated before git is touched;
/// the repository check runs only for git-backed sources.
pub async fn run<R: OutputRenderer + ?Sized>(
    ctx: &CommandContext,
    options: ReviewOptions,
    out: &mut R,
) -> Result<Outcome, CommandError> {
    output::info("Starting code review...");

    let config = Config::load(&ctx.paths, &ctx.env)?;
    let credentials = config.resolve()?;
    let splitter = TextSplitter::new(config.review.chunk_size, config.review.chunk_overlap)?;

    let request = options
        .selection
        .into_request(default_source(), options.context_lines);
    debug!(source = %request.source(), model = %credentials.model, "review request resolved");

    if request.source().is_vcs() {
        ctx.git.ensure_repository().await?;
    }

    let orchestrator = Orchestrator::new((ctx.backend)(&credentials)?, credentials.model.clone());

    if options.explain {
        explain_command(&orchestrator, &request, &config.review.language).await?;
    }

    let body = diff::select(&request, ctx.git.as_ref()).await?;
    if body.is_blank() {
        output::notice("No changes detected. Nothing to review.");
        return Ok(Outcome::NothingToProcess);
    }

    output::success("Changes detected. Starting AI review...");

    let chunks = splitter.split(body.as_str());
    debug!(
        chunks = chunks.len(),
        chunk_size = splitter.chunk_size(),
        chunk_overlap = splitter.chunk_overlap(),
        "body split"
    );

    orchestrator.run_review(chunks, &config.review, out).await?;
    Ok(Outcome::Completed)
}

/// Print a one-sentence explanation of the pass-through command.
async fn explain_command(
    orchestrator: &Orchestrator,
    request: &DiffRequest,
    language: &str,
) -> Result<(), CommandError> {
    let DiffSource::Passthrough(args) = request.source() else {
        return Ok(());
    };

    let command = format!("git diff {} -U{}", args.join(" "), request.context_lines());
    let intent = orchestrator.explain(&command, language).await?;
    eprintln!("{} {}", format!("{command}:").yellow(), intent);
    Ok(())
}
