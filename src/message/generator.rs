//! Commit message candidates built from a [`ChangeAnalysis`] and a [`StyleGuide`].

use regex_lite::Regex;
use serde::Serialize;
use tracing::debug;

use super::scope::{category_description, detect_action, readable_file_name};
use super::templates::{render, templates};
use crate::analysis::patterns::{ALT_CI_PATH, BUILD_PATH};
use crate::analysis::{ChangeAnalysis, ChangeType, FileCategory};
use crate::error::{GenerateError, MessageError};
use crate::history::{StyleGuide, adapt_message_to_style};

/// Longest commit message accepted for committing, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 3600;

const DEFAULT_CONFIDENCE: u8 = 50;
const MIN_ALTERNATIVE_CONFIDENCE: u8 = 20;
const ALTERNATIVE_TYPE_CONFIDENCE: u8 = 40;
const LOW_CONFIDENCE: u8 = 60;
const MAX_TEMPLATES: usize = 4;

const ALT_FIX_KEYWORDS: &[&str] = &["fix", "bug", "error", "resolve", "patch"];
const ALT_SECURITY_KEYWORDS: &[&str] =
    &["security", "vulnerability", "exploit", "auth", "encrypt"];
const ALT_PERF_KEYWORDS: &[&str] = &["performance", "optimize", "speed", "cache", "memory"];

/// Rewrites a raw message according to a style guide.
pub type AdaptFn = fn(&str, &StyleGuide) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Primary,
    Alternative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCandidate {
    pub message: String,
    pub confidence: u8,
    pub kind: CandidateKind,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub include_alternatives: bool,
    /// Applied to the primary message. `None` falls back to [`apply_basic_style`].
    pub adapt: Option<AdaptFn>,
}

impl GenerateOptions {
    pub fn new(include_alternatives: bool) -> Self {
        Self {
            include_alternatives,
            adapt: Some(adapt_message_to_style),
        }
    }

    pub fn without_adaptation(mut self) -> Self {
        self.adapt = None;
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Build the ranked candidate list: the primary message first, then
/// alternatives when requested.
pub fn generate_messages(
    analysis: &ChangeAnalysis,
    guide: &StyleGuide,
    options: &GenerateOptions,
) -> Result<Vec<MessageCandidate>, GenerateError> {
    let change_type = analysis
        .change_type
        .ok_or(GenerateError::MissingChangeType)?;

    let description = generate_description(analysis);
    let scope = detect_action(&analysis.file_changes, &analysis.code_changes);

    let raw = lowercase_first(&format!("{}({}): {}", change_type, scope, description));
    let primary = match options.adapt {
        Some(adapt) => adapt(&raw, guide),
        None => apply_basic_style(&raw),
    };
    if primary.trim().is_empty() {
        return Err(GenerateError::EmptyPrimaryMessage);
    }

    let confidence = if analysis.confidence == 0 {
        DEFAULT_CONFIDENCE
    } else {
        analysis.confidence
    };

    let mut candidates = vec![MessageCandidate {
        message: primary,
        confidence,
        kind: CandidateKind::Primary,
    }];

    if options.include_alternatives {
        candidates.extend(generate_alternatives(analysis, change_type, scope, &description));
    }

    debug!(
        change_type = %change_type,
        scope,
        candidates = candidates.len(),
        "Generated commit message candidates"
    );

    Ok(candidates)
}

fn generate_alternatives(
    analysis: &ChangeAnalysis,
    change_type: ChangeType,
    scope: &str,
    description: &str,
) -> Vec<MessageCandidate> {
    let list = templates(change_type);
    let mut alternatives: Vec<MessageCandidate> = list
        .iter()
        .enumerate()
        .take(list.len().min(MAX_TEMPLATES))
        .skip(1)
        .map(|(i, template)| MessageCandidate {
            message: apply_basic_style(&format!(
                "{}({}): {}",
                change_type,
                scope,
                render(template, description)
            )),
            confidence: analysis
                .confidence
                .saturating_sub(10 * i as u8)
                .max(MIN_ALTERNATIVE_CONFIDENCE),
            kind: CandidateKind::Alternative,
        })
        .collect();

    if analysis.confidence < LOW_CONFIDENCE {
        let alt_type = alternative_change_type(analysis, change_type);
        if alt_type != change_type {
            let template = templates(alt_type)[0];
            alternatives.push(MessageCandidate {
                message: apply_basic_style(&format!(
                    "{}({}): {}",
                    alt_type,
                    scope,
                    render(template, description)
                )),
                confidence: ALTERNATIVE_TYPE_CONFIDENCE,
                kind: CandidateKind::Alternative,
            });
        }
    }

    alternatives
}

/// Short phrase describing what changed, from the most specific signal available.
pub fn generate_description(analysis: &ChangeAnalysis) -> String {
    let files = &analysis.file_changes;
    let code = &analysis.code_changes;

    match code.new_functions.as_slice() {
        [] => {}
        [only] => return format!("{} function", only),
        [first, ..] => return format!("{} and other functions", first),
    }
    if let Some(class) = code.new_classes.first() {
        return format!("{} class", class);
    }

    if let Some(first) = files.added.first() {
        let name = readable_file_name(first);
        return match files.added.len() {
            1 => name,
            n => format!("{} and {} other files", name, n - 1),
        };
    }

    if files.categories.len() == 1 {
        if let Some(&category) = files.categories.first() {
            if category != FileCategory::Code {
                return category_description(category).to_string();
            }
        }
    }

    if files.file_types.len() == 1 {
        if let Some(file_type) = files.file_types.first() {
            return format!("{} code", file_type);
        }
    }

    if code.api_calls > 0 {
        "API integration".to_string()
    } else if code.database > 0 {
        "database functionality".to_string()
    } else if code.imports > 2 {
        "module dependencies".to_string()
    } else if files.modified.len() > files.added.len() {
        "existing functionality".to_string()
    } else {
        "new functionality".to_string()
    }
}

/// Second opinion on the change type, offered when the classifier was unsure.
pub fn alternative_change_type(analysis: &ChangeAnalysis, current: ChangeType) -> ChangeType {
    let files = &analysis.file_changes;
    let code = &analysis.code_changes;
    let keyword = |roots: &[&str]| {
        code.keywords
            .iter()
            .any(|k| roots.iter().any(|root| k.contains(root)))
    };
    let path_matches = |pattern: &Regex| files.touched_paths().any(|p| pattern.is_match(p));

    if current != ChangeType::Feat && (!code.new_functions.is_empty() || !files.added.is_empty()) {
        ChangeType::Feat
    } else if current != ChangeType::Fix && keyword(ALT_FIX_KEYWORDS) {
        ChangeType::Fix
    } else if current != ChangeType::Refactor && files.modified.len() > 2 {
        ChangeType::Refactor
    } else if current != ChangeType::Security && keyword(ALT_SECURITY_KEYWORDS) {
        ChangeType::Security
    } else if current != ChangeType::Perf && keyword(ALT_PERF_KEYWORDS) {
        ChangeType::Perf
    } else if current != ChangeType::Build && path_matches(&*BUILD_PATH) {
        ChangeType::Build
    } else if current != ChangeType::Ci && path_matches(&*ALT_CI_PATH) {
        ChangeType::Ci
    } else {
        ChangeType::Chore
    }
}

/// Lowercase the first character and drop one trailing period.
pub fn apply_basic_style(message: &str) -> String {
    let mut styled = lowercase_first(message);
    if styled.ends_with('.') {
        styled.pop();
    }
    styled
}

/// Trim a message and check it can be committed.
pub fn validate_commit_message(message: &str) -> Result<String, MessageError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(MessageError::Empty);
    }

    let length = trimmed.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(MessageError::TooLong {
            length,
            max: MAX_MESSAGE_LENGTH,
        });
    }

    Ok(trimmed.to_string())
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FileChange, FileStatus, analyze};
    use crate::history::Tone;

    fn plain_guide() -> StyleGuide {
        StyleGuide {
            use_conventional: true,
            preferred_prefix: "feat".to_string(),
            target_length: 72,
            include_scope: true,
            use_capitalization: false,
            use_period: false,
            tone: Tone::Casual,
        }
    }

    fn analysis_of(change_type: ChangeType, confidence: u8) -> ChangeAnalysis {
        ChangeAnalysis {
            change_type: Some(change_type),
            confidence,
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_only_without_alternatives() {
        let analysis = analysis_of(ChangeType::Fix, 80);
        let candidates =
            generate_messages(&analysis, &plain_guide(), &GenerateOptions::new(false)).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, CandidateKind::Primary);
        assert_eq!(candidates[0].confidence, 80);
        assert_eq!(candidates[0].message, "fix(core): new functionality");
    }

    #[test]
    fn test_missing_change_type_is_an_error() {
        let analysis = ChangeAnalysis::default();
        let result = generate_messages(&analysis, &plain_guide(), &GenerateOptions::default());
        assert_eq!(result, Err(GenerateError::MissingChangeType));
    }

    #[test]
    fn test_empty_primary_is_an_error() {
        fn erase(_: &str, _: &StyleGuide) -> String {
            "   ".to_string()
        }
        let options = GenerateOptions {
            include_alternatives: true,
            adapt: Some(erase),
        };
        let result = generate_messages(&analysis_of(ChangeType::Feat, 50), &plain_guide(), &options);
        assert_eq!(result, Err(GenerateError::EmptyPrimaryMessage));
    }

    #[test]
    fn test_zero_confidence_reports_default() {
        let candidates = generate_messages(
            &analysis_of(ChangeType::Chore, 0),
            &plain_guide(),
            &GenerateOptions::default(),
        )
        .unwrap();
        assert_eq!(candidates[0].confidence, 50);
    }

    #[test]
    fn test_alternatives_use_later_templates_with_decreasing_confidence() {
        let mut analysis = analysis_of(ChangeType::Feat, 80);
        analysis.code_changes.new_functions = vec!["parseHeader".to_string()];

        let candidates =
            generate_messages(&analysis, &plain_guide(), &GenerateOptions::new(true)).unwrap();
        let messages: Vec<&str> = candidates.iter().map(|c| c.message.as_str()).collect();
        let confidences: Vec<u8> = candidates.iter().map(|c| c.confidence).collect();

        assert_eq!(
            messages,
            vec![
                "feat(implement): parseHeader function",
                "feat(implement): implement parseHeader function",
                "feat(implement): introduce parseHeader function",
                "feat(implement): create parseHeader function",
            ]
        );
        assert_eq!(confidences, vec![80, 70, 60, 50]);
        assert!(candidates[1..].iter().all(|c| c.kind == CandidateKind::Alternative));
    }

    #[test]
    fn test_alternative_confidence_floor() {
        let candidates = generate_messages(
            &analysis_of(ChangeType::Docs, 25),
            &plain_guide(),
            &GenerateOptions::new(true),
        )
        .unwrap();
        assert_eq!(candidates[1].confidence, 20);
        assert_eq!(candidates[3].confidence, 20);
    }

    #[test]
    fn test_low_confidence_adds_alternative_type() {
        let mut analysis = analysis_of(ChangeType::Chore, 50);
        analysis.file_changes.added = vec!["src/cache.rs".to_string()];

        let candidates =
            generate_messages(&analysis, &plain_guide(), &GenerateOptions::new(true)).unwrap();
        let last = candidates.last().unwrap();

        assert_eq!(candidates.len(), 5);
        assert_eq!(last.message, "feat(create): add cache");
        assert_eq!(last.confidence, 40);
    }

    #[test]
    fn test_alternative_type_skipped_when_same() {
        // A chore with nothing else to suggest falls back to chore itself
        let candidates = generate_messages(
            &analysis_of(ChangeType::Chore, 30),
            &plain_guide(),
            &GenerateOptions::new(true),
        )
        .unwrap();
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn test_alternative_change_type_cascade() {
        let mut analysis = analysis_of(ChangeType::Feat, 40);
        analysis.code_changes.keywords.insert("bugs".to_string());
        assert_eq!(alternative_change_type(&analysis, ChangeType::Feat), ChangeType::Fix);

        let mut analysis = analysis_of(ChangeType::Fix, 40);
        analysis.file_changes.modified =
            vec!["a.rs".to_string(), "b.rs".to_string(), "c.rs".to_string()];
        assert_eq!(alternative_change_type(&analysis, ChangeType::Fix), ChangeType::Refactor);

        let mut analysis = analysis_of(ChangeType::Chore, 40);
        analysis.file_changes.modified = vec!["webpack.config.js".to_string()];
        assert_eq!(alternative_change_type(&analysis, ChangeType::Chore), ChangeType::Build);
        assert_eq!(alternative_change_type(&analysis, ChangeType::Build), ChangeType::Chore);
    }

    #[test]
    fn test_container_files_are_not_a_ci_alternative() {
        let mut analysis = analysis_of(ChangeType::Chore, 40);
        analysis.file_changes.modified =
            vec!["Dockerfile".to_string(), "docker-compose.yml".to_string()];
        assert_eq!(alternative_change_type(&analysis, ChangeType::Chore), ChangeType::Chore);
        assert_eq!(alternative_change_type(&analysis, ChangeType::Style), ChangeType::Chore);

        analysis.file_changes.modified = vec![".github/workflows/release.yml".to_string()];
        assert_eq!(alternative_change_type(&analysis, ChangeType::Chore), ChangeType::Ci);
    }

    #[test]
    fn test_without_adaptation_uses_basic_style() {
        let mut guide = plain_guide();
        guide.use_capitalization = true;
        let candidates = generate_messages(
            &analysis_of(ChangeType::Fix, 70),
            &guide,
            &GenerateOptions::new(false).without_adaptation(),
        )
        .unwrap();
        assert_eq!(candidates[0].message, "fix(core): new functionality");
    }

    #[test]
    fn test_primary_is_adapted_to_guide() {
        let mut guide = plain_guide();
        guide.use_capitalization = true;
        guide.use_period = true;
        let candidates = generate_messages(
            &analysis_of(ChangeType::Fix, 70),
            &guide,
            &GenerateOptions::default(),
        )
        .unwrap();
        assert_eq!(candidates[0].message, "Fix(core): new functionality.");
    }

    #[test]
    fn test_description_priority() {
        let mut analysis = analysis_of(ChangeType::Feat, 50);
        assert_eq!(generate_description(&analysis), "new functionality");

        analysis.file_changes.modified = vec!["src/a.rs".to_string()];
        assert_eq!(generate_description(&analysis), "existing functionality");

        analysis.code_changes.imports = 3;
        assert_eq!(generate_description(&analysis), "module dependencies");

        analysis.code_changes.api_calls = 1;
        assert_eq!(generate_description(&analysis), "API integration");

        analysis.file_changes.file_types.insert("Rust".to_string());
        assert_eq!(generate_description(&analysis), "Rust code");

        analysis.file_changes.categories.insert(FileCategory::Docs);
        assert_eq!(generate_description(&analysis), "documentation");

        analysis.file_changes.added = vec!["src/user_store.rs".to_string(), "b.rs".to_string()];
        assert_eq!(generate_description(&analysis), "user store and 1 other files");

        analysis.code_changes.new_classes = vec!["Store".to_string()];
        assert_eq!(generate_description(&analysis), "Store class");

        analysis.code_changes.new_functions = vec!["load".to_string(), "save".to_string()];
        assert_eq!(generate_description(&analysis), "load and other functions");
    }

    #[test]
    fn test_code_category_is_not_described() {
        let mut analysis = analysis_of(ChangeType::Feat, 50);
        analysis.file_changes.categories.insert(FileCategory::Code);
        assert_eq!(generate_description(&analysis), "new functionality");
    }

    #[test]
    fn test_new_auth_function_end_to_end() {
        let diff = "+++ b/src/auth.js\n+function authenticateUser(email, secret) {\n+}\n";
        let analysis = analyze(diff, &[FileChange::new("src/auth.js", FileStatus::Added)]);
        let candidates =
            generate_messages(&analysis, &plain_guide(), &GenerateOptions::default()).unwrap();

        assert!(candidates[0].message.contains("authenticateUser"));
        assert!(candidates[0].message.starts_with("feat(create): "));
        assert!(candidates[0].confidence > 50);
    }

    #[test]
    fn test_apply_basic_style() {
        assert_eq!(apply_basic_style("Fix parser."), "fix parser");
        assert_eq!(apply_basic_style("fix parser"), "fix parser");
        assert_eq!(apply_basic_style(""), "");
    }

    #[test]
    fn test_validate_commit_message() {
        assert_eq!(validate_commit_message("  fix: x \n"), Ok("fix: x".to_string()));
        assert_eq!(validate_commit_message(" \n\t"), Err(MessageError::Empty));
        assert_eq!(
            validate_commit_message(&"a".repeat(3601)),
            Err(MessageError::TooLong {
                length: 3601,
                max: 3600
            })
        );
        assert!(validate_commit_message(&"a".repeat(3600)).is_ok());
    }
}
