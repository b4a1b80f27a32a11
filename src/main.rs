//! quill - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quill::app::{DEFAULT_HISTORY_LIMIT, RunConfig, run};
use quill::git::GitRepository;
use quill::git::executor::check_git_installed;
use quill::prompt::DialoguerPrompter;

/// Generate a commit message for the staged changes.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Generate commit messages from staged changes in your repository's style")]
#[command(version)]
struct Cli {
    /// Show alternatives and pick one interactively
    #[arg(short, long)]
    interactive: bool,

    /// Print analysis details while generating
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - print the message without committing
    #[arg(short, long)]
    dry_run: bool,

    /// Print analysis, style profile and candidates as JSON
    #[arg(long, conflicts_with_all = ["interactive", "dry_run"])]
    json: bool,

    /// Commit the suggested message without confirmation
    #[arg(short, long)]
    yes: bool,

    /// Number of recent commits to learn the style from
    #[arg(long, env = "QUILL_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Repository path
    #[arg(short = 'C', long, default_value = ".")]
    path: PathBuf,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "quill=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // The git binary is only needed to commit
    if !cli.dry_run && !cli.json {
        check_git_installed().context("git is required to commit")?;
    }

    let repo = GitRepository::new(&cli.path);
    let config = RunConfig {
        interactive: cli.interactive,
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        json: cli.json,
        yes: cli.yes,
        history_limit: cli.history_limit,
    };

    run(&repo, &DialoguerPrompter, &config)
        .await
        .with_context(|| format!("Failed to generate a commit for {}", cli.path.display()))?;

    Ok(())
}
