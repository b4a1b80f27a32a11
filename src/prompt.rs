//! Terminal interaction: confirmation, free-text input and candidate selection.

use dialoguer::{Confirm, Input, Select};

use crate::analysis::ChangeAnalysis;
use crate::error::AppError;
use crate::message::MessageCandidate;

/// Trait for asking the user questions.
///
/// This abstraction allows scripting the answers in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError>;

    /// Free-text answer; an empty answer yields `default`.
    fn input(&self, prompt: &str, default: &str) -> Result<String, AppError>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, AppError>;
}

/// Prompter backed by dialoguer on the controlling terminal.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|_| AppError::Cancelled)
    }

    fn input(&self, prompt: &str, default: &str) -> Result<String, AppError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(|_| AppError::Cancelled)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, AppError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(|_| AppError::Cancelled)
    }
}

/// Multi-line overview of an analysis for interactive mode.
pub fn format_analysis(analysis: &ChangeAnalysis) -> String {
    let files = &analysis.file_changes;
    let code = &analysis.code_changes;
    let mut lines = Vec::new();

    let counts: Vec<String> = [
        (files.added.len(), "added"),
        (files.modified.len(), "modified"),
        (files.deleted.len(), "deleted"),
        (files.renamed.len(), "renamed"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, label)| format!("{} {}", n, label))
    .collect();
    lines.push(format!("  • Files: {}", counts.join(", ")));

    if !files.file_types.is_empty() {
        let types: Vec<&str> = files.file_types.iter().map(String::as_str).collect();
        lines.push(format!("  • Types: {}", types.join(", ")));
    }
    if !code.new_functions.is_empty() {
        let names: Vec<&str> = code.new_functions.iter().take(3).map(String::as_str).collect();
        lines.push(format!("  • Functions: {}", names.join(", ")));
    }
    if !code.new_classes.is_empty() {
        let names: Vec<&str> = code.new_classes.iter().take(3).map(String::as_str).collect();
        lines.push(format!("  • Classes: {}", names.join(", ")));
    }

    let change_type = analysis
        .change_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    lines.push(format!(
        "  • Type: {} ({}% confidence)",
        change_type, analysis.confidence
    ));
    lines.push(format!("  • Summary: {}", analysis.summary));

    lines.join("\n")
}

fn confidence_marker(confidence: u8) -> &'static str {
    if confidence > 70 {
        "🎯"
    } else if confidence > 50 {
        "👍"
    } else {
        "🤔"
    }
}

/// Selection label for a candidate: the message, a marker and its confidence.
pub fn candidate_label(candidate: &MessageCandidate) -> String {
    format!(
        "{} {} ({}%)",
        candidate.message,
        confidence_marker(candidate.confidence),
        candidate.confidence
    )
}

/// Numbered list of candidates.
pub fn format_candidates(candidates: &[MessageCandidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("  {}. {}", i + 1, candidate_label(c)))
        .collect::<Vec<_>>()
        .join("\n")
}
