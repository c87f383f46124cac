//! `message`: a single Conventional Commits message for the selected changes.

use tracing::debug;

use super::{CommandContext, CommandError, Outcome};
use crate::config::Config;
use crate::diff::{self, chunker::TextSplitter};
use crate::models::{DiffSource, SelectionFlags};
use crate::orchestrator::Orchestrator;
use crate::output::{self, OutputRenderer};

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub selection: SelectionFlags,
    pub context_lines: u32,
}

/// Run the commit-message pipeline. Defaults to staged changes.
pub async fn run<R: OutputRenderer + ?Sized>(
    ctx: &CommandContext,
    options: MessageOptions,
    out: &mut R,
) -> Result<Outcome, CommandError> {
    output::info("Generating commit message...");

    let config = Config::load(&ctx.paths, &ctx.env)?;
    let credentials = config.resolve()?;
    let splitter = TextSplitter::new(config.message.chunk_size, config.message.chunk_overlap)?;

    let request = options
        .selection
        .into_request(DiffSource::Staged, options.context_lines);
    debug!(source = %request.source(), model = %credentials.model, "message request resolved");

    if request.source().is_vcs() {
        ctx.git.ensure_repository().await?;
    }

    let body = diff::select(&request, ctx.git.as_ref()).await?;
    if body.is_blank() {
        output::notice("No changes detected. Cannot generate commit message.");
        return Ok(Outcome::NothingToProcess);
    }

    output::success("Changes detected. Generating...");

    let chunks = splitter.split(body.as_str());
    debug!(
        chunks = chunks.len(),
        chunk_size = splitter.chunk_size(),
        chunk_overlap = splitter.chunk_overlap(),
        "body split"
    );
    let orchestrator = Orchestrator::new((ctx.backend)(&credentials)?, credentials.model.clone());
    orchestrator.run_message(&chunks, &config.message, out).await?;
    Ok(Outcome::Completed)
}
