//! Style guides derived from a [`StyleProfile`] and the adaptation applied to generated messages.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};
use serde::Serialize;

use super::profile::{
    CONVENTIONAL_TYPES, CommitStyle, ConfidenceFactors, RankedTerm, StyleProfile, Tone,
};

pub const MIN_TARGET_LENGTH: usize = 30;
pub const MAX_TARGET_LENGTH: usize = 72;

const ELLIPSIS: &str = "...";
const PREFERRED_LIMIT: usize = 5;

/// Casual word and the formal word that replaces it.
const FORMAL_REPLACEMENTS: &[(&str, &str)] = &[
    ("fix", "resolve"),
    ("add", "implement"),
    ("update", "enhance"),
    ("change", "modify"),
    ("make", "create"),
    ("get", "retrieve"),
];

static CASUAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = FORMAL_REPLACEMENTS.iter().map(|(casual, _)| *casual).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).unwrap()
});
static CONVENTIONAL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)^(?:{})(?:\([^)]*\))?: ", CONVENTIONAL_TYPES.join("|"));
    Regex::new(&pattern).unwrap()
});

/// Formatting decisions applied to every generated message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleGuide {
    pub use_conventional: bool,
    pub preferred_prefix: String,
    /// Always within `[MIN_TARGET_LENGTH, MAX_TARGET_LENGTH]`.
    pub target_length: usize,
    pub include_scope: bool,
    pub use_capitalization: bool,
    pub use_period: bool,
    pub tone: Tone,
}

impl StyleGuide {
    pub fn from_profile(profile: &StyleProfile) -> Self {
        Self {
            use_conventional: profile.style == CommitStyle::Conventional,
            preferred_prefix: profile
                .common_prefixes
                .first()
                .map(|p| p.term.clone())
                .unwrap_or_else(|| "add".to_string()),
            target_length: profile
                .average_length
                .clamp(MIN_TARGET_LENGTH, MAX_TARGET_LENGTH),
            include_scope: profile.patterns.has_scope > 0.3,
            use_capitalization: profile.patterns.starts_with_capital > 0.7,
            use_period: profile.patterns.ends_with_period > 0.5,
            tone: profile.tone,
        }
    }
}

impl Default for StyleGuide {
    fn default() -> Self {
        Self::from_profile(&StyleProfile::default())
    }
}

/// Rewrite `message` to follow `guide`.
///
/// Capitalization and the trailing period are adjusted first, then formal
/// vocabulary is substituted, then the result is truncated to the target
/// length with a trailing ellipsis.
pub fn adapt_message_to_style(message: &str, guide: &StyleGuide) -> String {
    let mut adapted = if guide.use_capitalization {
        map_first_char(message, char::to_uppercase)
    } else {
        map_first_char(message, char::to_lowercase)
    };

    if guide.use_period && !adapted.ends_with('.') {
        adapted.push('.');
    } else if !guide.use_period && adapted.ends_with('.') {
        adapted.pop();
    }

    if guide.tone == Tone::Formal {
        adapted = make_formal(&adapted);
    }

    truncate_with_ellipsis(&adapted, guide.target_length)
}

/// Replace casual verbs with formal ones across the message. A leading
/// conventional `type(scope): ` header keeps its type; any other prefix is
/// substituted like the rest of the text.
pub fn make_formal(message: &str) -> String {
    let header_len = CONVENTIONAL_HEADER
        .find(message)
        .map(|m| m.end())
        .unwrap_or(0);
    let (header, body) = message.split_at(header_len);

    let body = CASUAL_WORD.replace_all(body, |caps: &Captures<'_>| {
        let word = &caps[0];
        let formal = FORMAL_REPLACEMENTS
            .iter()
            .find(|(casual, _)| casual.eq_ignore_ascii_case(word))
            .map(|(_, formal)| *formal)
            .unwrap_or(word);
        if word.starts_with(|c: char| c.is_uppercase()) {
            map_first_char(formal, char::to_uppercase)
        } else {
            formal.to_string()
        }
    });

    format!("{}{}", header, body)
}

fn map_first_char<I>(text: &str, f: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    // No room for an ellipsis
    if max <= ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }
    let keep = max - ELLIPSIS.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Vocabulary family that dominates a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyStyle {
    Formal,
    Casual,
    Technical,
    Business,
    Balanced,
}

impl fmt::Display for VocabularyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Formal => "formal",
            Self::Casual => "casual",
            Self::Technical => "technical",
            Self::Business => "business",
            Self::Balanced => "balanced",
        };
        f.write_str(label)
    }
}

/// A [`StyleGuide`] plus the richer findings of the profiler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedStyleGuide {
    #[serde(flatten)]
    pub base: StyleGuide,
    pub vocabulary_style: VocabularyStyle,
    pub preferred_scopes: Vec<RankedTerm>,
    pub most_used_types: Vec<RankedTerm>,
    /// Weighted confidence in `[0, 1]`.
    pub confidence_score: f64,
    pub recommendations: Vec<String>,
}

impl EnhancedStyleGuide {
    pub fn from_profile(profile: &StyleProfile) -> Self {
        let top = |terms: Option<&Vec<RankedTerm>>| -> Vec<RankedTerm> {
            terms
                .map(|t| t.iter().take(PREFERRED_LIMIT).cloned().collect())
                .unwrap_or_default()
        };

        Self {
            base: StyleGuide::from_profile(profile),
            vocabulary_style: vocabulary_style(profile),
            preferred_scopes: top(profile.scope_preferences.as_ref().map(|s| &s.top_scopes)),
            most_used_types: top(profile.type_frequency.as_ref()),
            confidence_score: profile
                .confidence_factors
                .as_ref()
                .map_or(0.5, ConfidenceFactors::overall),
            recommendations: recommendations(profile.confidence_factors.as_ref()),
        }
    }
}

/// Family with the highest share; ties resolve formal, casual, technical, business.
fn vocabulary_style(profile: &StyleProfile) -> VocabularyStyle {
    let Some(vocabulary) = &profile.vocabulary else {
        return VocabularyStyle::Balanced;
    };

    let ranked = [
        (VocabularyStyle::Formal, vocabulary.formal),
        (VocabularyStyle::Casual, vocabulary.casual),
        (VocabularyStyle::Technical, vocabulary.technical),
        (VocabularyStyle::Business, vocabulary.business),
    ];
    let max = ranked.iter().map(|(_, share)| *share).fold(0.0, f64::max);

    ranked
        .into_iter()
        .find(|(_, share)| *share == max)
        .map_or(VocabularyStyle::Balanced, |(style, _)| style)
}

/// Advice for each confidence factor below its threshold.
pub fn recommendations(factors: Option<&ConfidenceFactors>) -> Vec<String> {
    let Some(factors) = factors else {
        return Vec::new();
    };

    let checks = [
        (
            factors.consistency < 0.7,
            "Consider standardizing commit message format across the team",
        ),
        (
            factors.conventional_adherence < 0.5,
            "Adopt conventional commit format for better tooling integration",
        ),
        (
            factors.scope_usage < 0.3,
            "Use scopes to better categorize changes (e.g., feat(auth): ...)",
        ),
        (
            factors.message_quality < 0.6,
            "Write more descriptive commit messages (20-72 characters)",
        ),
    ];

    checks
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, advice)| advice.to_string())
        .collect()
}
