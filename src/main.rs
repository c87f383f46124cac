//! diffscribe: AI code reviews and commit messages from git diffs.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command};
use diffscribe::commands::{self, CommandContext};
use diffscribe::constants;
use diffscribe::output::TerminalRenderer;

/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    tokio::select! {
        result = run() => {
            if let Err(err) = result {
                eprintln!("{} {err:#}", "Error:".red().bold());
                process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n{}", "Interrupted.".yellow());
            process::exit(EXIT_INTERRUPTED);
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let ctx = CommandContext::production(cwd);

    let outcome = match cli.command {
        Command::Review(args) => {
            let mut out = TerminalRenderer::stdout();
            commands::review::run(&ctx, args.into_options(), &mut out)
                .await
                .context("review failed")?
        }
        Command::Message(args) => {
            let mut out = TerminalRenderer::stdout();
            commands::message::run(&ctx, args.into_options(), &mut out)
                .await
                .context("commit message generation failed")?
        }
        Command::Config(args) => {
            let mut out = std::io::stdout();
            commands::config::run(&ctx, args.into_options(), &mut out)?
        }
    };

    tracing::debug!(?outcome, "command finished");
    Ok(())
}

/// Log to stderr, filtered by `DIFFSCRIBE_LOG` (default `warn`).
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
