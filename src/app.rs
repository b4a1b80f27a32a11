//! The commit workflow: validate, classify, profile, synthesize, interact, commit.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::{self, ChangeAnalysis};
use crate::error::{AppError, GitError};
use crate::git::Vcs;
use crate::history::{EnhancedStyleGuide, StyleGuide, StyleProfile, analyze_commit_history};
use crate::message::{
    GenerateOptions, MessageCandidate, generate_messages, validate_commit_message,
};
use crate::prompt::{Prompter, candidate_label, format_analysis, format_candidates};

/// Number of recent commits profiled when not configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const CUSTOM_MESSAGE_LABEL: &str = "✏️  Write a custom message";

/// Options for one run of the workflow.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Offer alternatives and let the user pick or write one.
    pub interactive: bool,
    pub verbose: bool,
    pub dry_run: bool,
    /// Print the analysis, profile and candidates as JSON instead of committing.
    pub json: bool,
    /// Accept the primary suggestion without asking.
    pub yes: bool,
    pub history_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            verbose: false,
            dry_run: false,
            json: false,
            yes: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(String),
    /// The message that would have been committed.
    DryRun(String),
    /// A JSON report was printed.
    Reported,
}

/// Machine-readable output of `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub analysis: &'a ChangeAnalysis,
    pub profile: &'a StyleProfile,
    pub style_guide: &'a EnhancedStyleGuide,
    pub candidates: &'a [MessageCandidate],
}

/// Run the workflow against a repository.
pub async fn run<V, P>(vcs: &V, prompter: &P, config: &RunConfig) -> Result<Outcome, AppError>
where
    V: Vcs + ?Sized,
    P: Prompter + ?Sized,
{
    validate_environment(vcs).await?;
    if config.verbose {
        println!("✅ Git repository and staged changes detected");
    }

    let analysis = analyze_changes(vcs, config).await?;
    let profile = profile_history(vcs, config).await;
    let guide = StyleGuide::from_profile(&profile);

    let options = GenerateOptions::new(config.interactive || config.json);
    let candidates = generate_messages(&analysis, &guide, &options)?;

    if config.json {
        let enhanced = EnhancedStyleGuide::from_profile(&profile);
        let report = Report {
            analysis: &analysis,
            profile: &profile,
            style_guide: &enhanced,
            candidates: &candidates,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(Outcome::Reported);
    }

    let chosen = if config.interactive {
        choose_interactively(prompter, &analysis, &candidates, config)?
    } else {
        choose_simply(prompter, &candidates, config)?
    };
    let message = validate_commit_message(&chosen)?;

    if config.dry_run {
        println!("\n📋 Dry run - would commit with message: \"{}\"", message);
        return Ok(Outcome::DryRun(message));
    }

    vcs.commit(&message).await?;
    info!("Committed staged changes");
    println!("✅ Committed: \"{}\"", message);

    Ok(Outcome::Committed(message))
}

/// Fail unless we are inside a repository with something staged.
async fn validate_environment<V: Vcs + ?Sized>(vcs: &V) -> Result<(), AppError> {
    if !vcs.is_repository().await {
        return Err(GitError::NotARepository.into());
    }
    if !vcs.has_staged_changes().await? {
        return Err(GitError::NoStagedChanges.into());
    }
    Ok(())
}

/// Classify the staged changes. Diff and file list failures abort the run;
/// missing stats only drop the annotation.
async fn analyze_changes<V: Vcs + ?Sized>(
    vcs: &V,
    config: &RunConfig,
) -> Result<ChangeAnalysis, AppError> {
    let diff = vcs.staged_diff().await?;
    let files = vcs.staged_files().await?;

    let mut analysis = analysis::analyze(&diff, &files);
    analysis.stats = match vcs.diff_stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("Could not read diff stats: {}", e);
            None
        }
    };

    if config.verbose {
        println!("🔍 Analyzing staged changes...");
        if let Some(stats) = &analysis.stats {
            println!("   • {} files changed", stats.files);
            println!(
                "   • {} insertions, {} deletions",
                stats.insertions, stats.deletions
            );
        }
        if let Some(change_type) = analysis.change_type {
            println!(
                "   • Change type: {} ({}% confidence)",
                change_type, analysis.confidence
            );
        }
    }

    Ok(analysis)
}

/// Learn the commit style. History that cannot be read counts as empty.
async fn profile_history<V: Vcs + ?Sized>(vcs: &V, config: &RunConfig) -> StyleProfile {
    let commits = match vcs.recent_commits(config.history_limit).await {
        Ok(commits) => commits,
        Err(e) => {
            warn!("Could not read commit history, using default style: {}", e);
            Vec::new()
        }
    };
    debug!(commits = commits.len(), "Loaded commit history");

    let profile = analyze_commit_history(&commits);

    if config.verbose && !commits.is_empty() {
        println!("📚 Analyzing commit history for style patterns...");
        println!("   • Detected style: {}", profile.style);
        println!(
            "   • Common prefix: \"{}\"",
            profile
                .common_prefixes
                .first()
                .map(|p| p.term.as_str())
                .unwrap_or("none")
        );
        println!("   • Average length: {} characters", profile.average_length);
        if let Some(span) = profile.span {
            println!(
                "   • Covers {} to {} ({} days)",
                span.oldest.format("%Y-%m-%d"),
                span.newest.format("%Y-%m-%d"),
                span.days()
            );
        }
        for recommendation in EnhancedStyleGuide::from_profile(&profile).recommendations {
            println!("   • Tip: {}", recommendation);
        }
    }

    profile
}

fn primary(candidates: &[MessageCandidate]) -> &MessageCandidate {
    // generate_messages always returns the primary candidate first
    &candidates[0]
}

/// Show the suggestion and confirm it, falling back to a custom message.
fn choose_simply<P: Prompter + ?Sized>(
    prompter: &P,
    candidates: &[MessageCandidate],
    config: &RunConfig,
) -> Result<String, AppError> {
    let suggestion = &primary(candidates).message;
    println!("💡 Suggested commit: \"{}\"", suggestion);

    if config.yes || config.dry_run {
        return Ok(suggestion.clone());
    }

    if prompter.confirm("Use this message?", true)? {
        Ok(suggestion.clone())
    } else {
        prompter.input("Enter custom message", suggestion)
    }
}

/// Display the analysis and every candidate, then let the user pick one or
/// write their own.
fn choose_interactively<P: Prompter + ?Sized>(
    prompter: &P,
    analysis: &ChangeAnalysis,
    candidates: &[MessageCandidate],
    config: &RunConfig,
) -> Result<String, AppError> {
    println!("\n🔍 Analysis:\n{}", format_analysis(analysis));
    println!(
        "\n💡 Suggested commit messages:\n{}",
        format_candidates(candidates)
    );

    if config.yes {
        return Ok(primary(candidates).message.clone());
    }

    let mut items: Vec<String> = candidates.iter().map(candidate_label).collect();
    items.push(CUSTOM_MESSAGE_LABEL.to_string());

    let choice = prompter.select("💬 Choose a commit message", &items)?;
    match candidates.get(choice) {
        Some(candidate) => Ok(candidate.message.clone()),
        None => prompter.input("Enter your commit message", &primary(candidates).message),
    }
}
