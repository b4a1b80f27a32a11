//! Commit history profiling: learn a repository's commit message style.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Change types recognized in conventional commit headers.
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "test", "chore", "perf", "build", "ci", "revert",
    "security", "deps", "release", "hotfix", "wip", "merge", "init",
];

/// Average message length assumed when there is no history.
pub const DEFAULT_AVERAGE_LENGTH: usize = 50;

const MAX_RANKED: usize = 10;

static CONVENTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^(?:{})(?:\(.+\))?: .+", CONVENTIONAL_TYPES.join("|"));
    Regex::new(&pattern).unwrap()
});
static IMPERATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:add|update|remove|fix|implement|create|delete|improve|optimize|refactor|build|deploy|configure|setup|init|merge|revert)",
    )
    .unwrap()
});
static HAS_SCOPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.+\)").unwrap());
static SCOPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static TICKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\d+|[A-Z]+-\d+").unwrap());
static LEADING_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-z]+)").unwrap());
static FORMAL_TONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:implement|optimize|refactor|enhance|resolve|address|ensure)\b").unwrap()
});
static CASUAL_TONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fix|add|update|change|make|get|do)\b").unwrap()
});

const FORMAL_WORDS: &[&str] = &[
    "implement", "optimize", "refactor", "enhance", "resolve", "address", "ensure", "establish",
    "configure", "initialize",
];
const CASUAL_WORDS: &[&str] = &[
    "fix", "add", "update", "change", "make", "get", "do", "put", "set", "clean",
];
const TECHNICAL_WORDS: &[&str] = &[
    "api", "database", "auth", "config", "service", "component", "module", "function", "class",
    "method",
];
const BUSINESS_WORDS: &[&str] = &[
    "user", "customer", "order", "payment", "product", "feature", "workflow", "process", "report",
    "dashboard",
];

const FRONTEND_SCOPES: &[&str] = &[
    "ui", "component", "view", "page", "form", "modal", "button", "input", "layout",
];
const BACKEND_SCOPES: &[&str] = &[
    "api", "service", "controller", "model", "database", "auth", "middleware", "route",
];
const DEVOPS_SCOPES: &[&str] = &[
    "ci", "cd", "deploy", "build", "docker", "k8s", "config", "env", "scripts",
];
const TESTING_SCOPES: &[&str] = &[
    "test", "spec", "mock", "fixture", "coverage", "e2e", "unit", "integration",
];

/// A past commit as seen by the profiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    /// Subject line of the commit message.
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl CommitRecord {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            timestamp: None,
        }
    }
}

/// Dominant message format in a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStyle {
    Conventional,
    Imperative,
    Descriptive,
}

impl CommitStyle {
    /// Classify a single message.
    pub fn of(message: &str) -> Self {
        if CONVENTIONAL.is_match(message) {
            Self::Conventional
        } else if IMPERATIVE.is_match(message) {
            Self::Imperative
        } else {
            Self::Descriptive
        }
    }
}

impl fmt::Display for CommitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conventional => write!(f, "conventional"),
            Self::Imperative => write!(f, "imperative"),
            Self::Descriptive => write!(f, "descriptive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
}

/// A ranked word, scope or type with its share of the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub term: String,
    pub count: usize,
    pub frequency: f64,
}

/// Fractions of commits showing each formatting habit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessagePatterns {
    pub has_scope: f64,
    pub has_emoji: f64,
    pub has_ticket_number: f64,
    pub starts_with_capital: f64,
    pub ends_with_period: f64,
}

/// Fractions of commits using each vocabulary family, plus the most common words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyProfile {
    pub formal: f64,
    pub casual: f64,
    pub technical: f64,
    pub business: f64,
    pub top_words: Vec<RankedTerm>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeCategories {
    pub frontend: f64,
    pub backend: f64,
    pub devops: f64,
    pub testing: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopePreferences {
    pub categories: ScopeCategories,
    pub top_scopes: Vec<RankedTerm>,
}

/// How much the learned profile can be trusted; every factor is in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    pub consistency: f64,
    pub conventional_adherence: f64,
    pub scope_usage: f64,
    pub message_quality: f64,
}

impl ConfidenceFactors {
    /// Weighted sum of the factors.
    pub fn overall(&self) -> f64 {
        self.consistency * 0.3
            + self.conventional_adherence * 0.3
            + self.scope_usage * 0.2
            + self.message_quality * 0.2
    }
}

/// Commit times covered by the profiled history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySpan {
    pub oldest: DateTime<Utc>,
    pub newest: DateTime<Utc>,
}

impl HistorySpan {
    /// Whole days between the oldest and newest commit.
    pub fn days(&self) -> i64 {
        (self.newest - self.oldest).num_days()
    }
}

/// Style statistics learned from recent commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub style: CommitStyle,
    pub common_prefixes: Vec<RankedTerm>,
    pub average_length: usize,
    pub patterns: MessagePatterns,
    pub tone: Tone,
    pub vocabulary: Option<VocabularyProfile>,
    pub scope_preferences: Option<ScopePreferences>,
    pub type_frequency: Option<Vec<RankedTerm>>,
    pub confidence_factors: Option<ConfidenceFactors>,
    pub span: Option<HistorySpan>,
}

impl Default for StyleProfile {
    /// Profile used for repositories without history.
    fn default() -> Self {
        Self {
            style: CommitStyle::Conventional,
            common_prefixes: vec![RankedTerm {
                term: "feat".to_string(),
                count: 1,
                frequency: 1.0,
            }],
            average_length: DEFAULT_AVERAGE_LENGTH,
            patterns: MessagePatterns {
                has_scope: 0.2,
                has_emoji: 0.0,
                has_ticket_number: 0.0,
                starts_with_capital: 0.8,
                ends_with_period: 0.0,
            },
            tone: Tone::Casual,
            vocabulary: None,
            scope_preferences: None,
            type_frequency: None,
            confidence_factors: None,
            span: None,
        }
    }
}

/// Learn a [`StyleProfile`] from recent commits.
///
/// An empty history yields [`StyleProfile::default`].
pub fn analyze_commit_history(commits: &[CommitRecord]) -> StyleProfile {
    if commits.is_empty() {
        debug!("No commit history, using default style profile");
        return StyleProfile::default();
    }

    let profile = StyleProfile {
        style: detect_commit_style(commits),
        common_prefixes: extract_common_prefixes(commits),
        average_length: calculate_average_length(commits).unwrap_or(DEFAULT_AVERAGE_LENGTH),
        patterns: identify_patterns(commits),
        tone: detect_tone(commits),
        vocabulary: Some(analyze_vocabulary(commits)),
        scope_preferences: Some(analyze_scope_preferences(commits)),
        type_frequency: Some(analyze_type_frequency(commits)),
        confidence_factors: Some(calculate_confidence_factors(commits)),
        span: history_span(commits),
    };

    debug!(
        style = %profile.style,
        average_length = profile.average_length,
        commits = commits.len(),
        "Profiled commit history"
    );

    profile
}

/// Dominant style. Conventional needs more than 60% of commits and
/// imperative more than 50%; anything else is descriptive.
pub fn detect_commit_style(commits: &[CommitRecord]) -> CommitStyle {
    let total = commits.len() as f64;
    let count = |style: CommitStyle| {
        commits
            .iter()
            .filter(|c| CommitStyle::of(&c.message) == style)
            .count() as f64
    };

    if count(CommitStyle::Conventional) / total > 0.6 {
        CommitStyle::Conventional
    } else if count(CommitStyle::Imperative) / total > 0.5 {
        CommitStyle::Imperative
    } else {
        CommitStyle::Descriptive
    }
}

/// Top ten lowercased first words longer than two characters.
pub fn extract_common_prefixes(commits: &[CommitRecord]) -> Vec<RankedTerm> {
    let words = commits.iter().filter_map(|c| {
        c.message
            .split_whitespace()
            .next()
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() > 2)
    });
    rank(words, commits.len())
}

/// Mean message length in characters, or `None` for an empty history.
pub fn calculate_average_length(commits: &[CommitRecord]) -> Option<usize> {
    if commits.is_empty() {
        return None;
    }
    let total: usize = commits.iter().map(|c| c.message.chars().count()).sum();
    Some((total as f64 / commits.len() as f64).round() as usize)
}

pub fn identify_patterns(commits: &[CommitRecord]) -> MessagePatterns {
    let fraction = |test: &dyn Fn(&str) -> bool| {
        commits.iter().filter(|c| test(&c.message)).count() as f64 / commits.len() as f64
    };

    MessagePatterns {
        has_scope: fraction(&|m| HAS_SCOPE.is_match(m)),
        has_emoji: fraction(&|m| m.chars().any(is_emoji)),
        has_ticket_number: fraction(&|m| TICKET.is_match(m)),
        starts_with_capital: fraction(&|m| m.starts_with(|c: char| c.is_ascii_uppercase())),
        ends_with_period: fraction(&|m| m.ends_with('.')),
    }
}

/// Formal only when strictly more commits use formal words than casual ones.
pub fn detect_tone(commits: &[CommitRecord]) -> Tone {
    let formal = commits
        .iter()
        .filter(|c| FORMAL_TONE.is_match(&c.message))
        .count();
    let casual = commits
        .iter()
        .filter(|c| CASUAL_TONE.is_match(&c.message))
        .count();

    if formal > casual {
        Tone::Formal
    } else {
        Tone::Casual
    }
}

pub fn analyze_vocabulary(commits: &[CommitRecord]) -> VocabularyProfile {
    let total = commits.len();
    let mut families = [0usize; 4];
    let mut words: Vec<String> = Vec::new();

    for commit in commits {
        let lower = commit.message.to_lowercase();
        let mut seen: Vec<&str> = Vec::new();
        for word in lower.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() && !seen.contains(&word) {
                seen.push(word);
            }
        }

        for (slot, family) in [FORMAL_WORDS, CASUAL_WORDS, TECHNICAL_WORDS, BUSINESS_WORDS]
            .iter()
            .enumerate()
        {
            if seen.iter().any(|w| family.contains(w)) {
                families[slot] += 1;
            }
        }
        words.extend(seen.into_iter().map(String::from));
    }

    let share = |n: usize| n as f64 / total as f64;
    VocabularyProfile {
        formal: share(families[0]),
        casual: share(families[1]),
        technical: share(families[2]),
        business: share(families[3]),
        top_words: rank(words.into_iter(), total),
    }
}

pub fn analyze_scope_preferences(commits: &[CommitRecord]) -> ScopePreferences {
    let total = commits.len();
    let mut counts = [0usize; 4];
    let mut scopes = Vec::new();

    for commit in commits {
        let Some(caps) = SCOPE.captures(&commit.message) else {
            continue;
        };
        let scope = caps[1].to_string();
        let lower = scope.to_lowercase();

        for (slot, family) in [FRONTEND_SCOPES, BACKEND_SCOPES, DEVOPS_SCOPES, TESTING_SCOPES]
            .iter()
            .enumerate()
        {
            if family.iter().any(|p| lower.contains(p)) {
                counts[slot] += 1;
            }
        }
        scopes.push(scope);
    }

    let share = |n: usize| n as f64 / total as f64;
    ScopePreferences {
        categories: ScopeCategories {
            frontend: share(counts[0]),
            backend: share(counts[1]),
            devops: share(counts[2]),
            testing: share(counts[3]),
        },
        top_scopes: rank(scopes.into_iter(), total),
    }
}

/// Conventional types in use, most frequent first.
pub fn analyze_type_frequency(commits: &[CommitRecord]) -> Vec<RankedTerm> {
    let types = commits.iter().filter_map(|c| {
        LEADING_WORD
            .captures(&c.message)
            .map(|caps| caps[1].to_string())
            .filter(|t| CONVENTIONAL_TYPES.contains(&t.as_str()))
    });
    let mut ranked = rank(types, commits.len());
    ranked.truncate(CONVENTIONAL_TYPES.len());
    ranked
}

pub fn calculate_confidence_factors(commits: &[CommitRecord]) -> ConfidenceFactors {
    if commits.is_empty() {
        return ConfidenceFactors::default();
    }
    let total = commits.len() as f64;

    let mut style_counts: HashMap<CommitStyle, usize> = HashMap::new();
    for commit in commits {
        *style_counts.entry(CommitStyle::of(&commit.message)).or_default() += 1;
    }
    let dominant = style_counts.values().copied().max().unwrap_or(0);

    let conventional = style_counts
        .get(&CommitStyle::Conventional)
        .copied()
        .unwrap_or(0);
    let scoped = commits
        .iter()
        .filter(|c| HAS_SCOPE.is_match(&c.message))
        .count();
    let quality = commits
        .iter()
        .filter(|c| is_quality_message(&c.message))
        .count();

    ConfidenceFactors {
        consistency: dominant as f64 / total,
        conventional_adherence: conventional as f64 / total,
        scope_usage: scoped as f64 / total,
        message_quality: quality as f64 / total,
    }
}

/// Oldest and newest commit times, or `None` when no commit carries one.
pub fn history_span(commits: &[CommitRecord]) -> Option<HistorySpan> {
    let mut times = commits.iter().filter_map(|c| c.timestamp);
    let first = times.next()?;
    let (oldest, newest) = times.fold((first, first), |(oldest, newest), t| {
        (oldest.min(t), newest.max(t))
    });
    Some(HistorySpan { oldest, newest })
}

/// 20 to 72 characters with more than five characters after the first colon.
fn is_quality_message(message: &str) -> bool {
    let length = message.chars().count();
    let described = message
        .split(':')
        .nth(1)
        .is_some_and(|d| d.trim().chars().count() > 5);
    (20..=72).contains(&length) && described
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F | 0x1F300..=0x1F5FF | 0x1F680..=0x1F6FF | 0x1F1E0..=0x1F1FF
    )
}

/// Count terms, order by descending count (first occurrence breaks ties) and keep the top ten.
fn rank(terms: impl Iterator<Item = String>, total: usize) -> Vec<RankedTerm> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for term in terms {
        let count = counts.entry(term.clone()).or_insert(0);
        if *count == 0 {
            order.push(term);
        }
        *count += 1;
    }

    let mut ranked: Vec<RankedTerm> = order
        .into_iter()
        .map(|term| {
            let count = counts[&term];
            RankedTerm {
                frequency: count as f64 / total as f64,
                term,
                count,
            }
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(MAX_RANKED);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(messages: &[&str]) -> Vec<CommitRecord> {
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| CommitRecord::new(format!("{:07x}", i), *m))
            .collect()
    }

    const CONVENTIONAL_HISTORY: &[&str] = &[
        "feat(auth): add JWT authentication system",
        "fix(api): resolve null pointer exception in user service",
        "docs(readme): update installation instructions",
        "test(auth): add unit tests for login functionality",
        "refactor(utils): extract validation helpers to separate module",
        "style(css): improve button hover animations",
        "chore(deps): update dependencies to latest versions",
        "perf(api): optimize database queries for user lookup",
        "feat(ui): implement dark mode toggle",
        "fix(auth): handle expired token edge case",
    ];

    const IMPERATIVE_HISTORY: &[&str] = &[
        "Add user authentication system",
        "Fix login validation bug",
        "Update README documentation",
        "Implement password reset functionality",
        "Remove deprecated API endpoints",
        "Optimize database connection pooling",
        "Create user profile component",
        "Update styling for mobile responsiveness",
        "Add error handling for API requests",
        "Refactor authentication middleware",
    ];

    const DESCRIPTIVE_HISTORY: &[&str] = &[
        "User authentication and authorization",
        "Login form validation improvements",
        "Documentation updates",
        "Password reset workflow",
        "API cleanup and modernization",
    ];

    #[test]
    fn test_history_span_covers_timestamped_commits() {
        use chrono::TimeZone;

        let at = |secs: i64| Utc.timestamp_opt(secs, 0).single();
        let mut commits = history(&["feat: a", "fix: b", "docs: c", "chore: d"]);
        commits[0].timestamp = at(1_700_000_000 + 3 * 86_400);
        commits[1].timestamp = at(1_700_000_000);
        commits[2].timestamp = None;
        commits[3].timestamp = at(1_700_000_000 + 86_400);

        let span = history_span(&commits).unwrap();
        assert_eq!(Some(span.oldest), at(1_700_000_000));
        assert_eq!(Some(span.newest), at(1_700_000_000 + 3 * 86_400));
        assert_eq!(span.days(), 3);
        assert_eq!(analyze_commit_history(&commits).span, Some(span));
    }

    #[test]
    fn test_history_span_needs_timestamps() {
        assert_eq!(history_span(&history(CONVENTIONAL_HISTORY)), None);
        assert_eq!(history_span(&[]), None);
        assert_eq!(StyleProfile::default().span, None);
    }

    #[test]
    fn test_empty_history_returns_default_profile() {
        let profile = analyze_commit_history(&[]);
        assert_eq!(profile, StyleProfile::default());
        assert_eq!(profile.style, CommitStyle::Conventional);
        assert_eq!(profile.average_length, 50);
        assert_eq!(profile.tone, Tone::Casual);
        assert_eq!(profile.common_prefixes[0].term, "feat");
    }

    #[test]
    fn test_conventional_history() {
        let profile = analyze_commit_history(&history(CONVENTIONAL_HISTORY));
        assert_eq!(profile.style, CommitStyle::Conventional);
        assert!((profile.patterns.has_scope - 1.0).abs() < f64::EPSILON);
        assert_eq!(profile.patterns.starts_with_capital, 0.0);
    }

    #[test]
    fn test_imperative_history() {
        let commits = history(IMPERATIVE_HISTORY);
        assert_eq!(detect_commit_style(&commits), CommitStyle::Imperative);
        assert_eq!(identify_patterns(&commits).starts_with_capital, 1.0);
    }

    #[test]
    fn test_descriptive_history() {
        assert_eq!(
            detect_commit_style(&history(DESCRIPTIVE_HISTORY)),
            CommitStyle::Descriptive
        );
    }

    #[test]
    fn test_slim_conventional_majority_is_not_conventional() {
        // 3 of 5 conventional (60%) does not pass the strict 0.6 threshold
        let commits = history(&[
            "feat: one",
            "fix: two",
            "docs: three",
            "random words here",
            "other random words",
        ]);
        assert_eq!(detect_commit_style(&commits), CommitStyle::Descriptive);
    }

    #[test]
    fn test_common_prefixes_ranked() {
        let commits = history(&["add a", "Add b", "fix c", "add d", "wip", "go home"]);
        let prefixes = extract_common_prefixes(&commits);
        assert_eq!(prefixes[0].term, "add");
        assert_eq!(prefixes[0].count, 3);
        assert!((prefixes[0].frequency - 0.5).abs() < 1e-9);
        assert_eq!(prefixes[1].term, "fix");
        assert_eq!(prefixes[2].term, "wip");
        // "go" is too short to count
        assert_eq!(prefixes.len(), 3);
    }

    #[test]
    fn test_prefixes_keep_top_ten() {
        let messages: Vec<String> = (0..15).map(|i| format!("word{} text", i)).collect();
        let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
        assert_eq!(extract_common_prefixes(&history(&refs)).len(), 10);
    }

    #[test]
    fn test_average_length_rounds() {
        let commits = history(&["abc", "abcd"]);
        assert_eq!(calculate_average_length(&commits), Some(4));
        assert_eq!(calculate_average_length(&[]), None);
    }

    #[test]
    fn test_patterns_detect_emoji_tickets_and_periods() {
        let commits = history(&[
            "🚀 feat: Add user authentication #123",
            "Fix login bug (resolves JIRA-456)",
            "📝 Update documentation.",
            "remove old code",
        ]);
        let patterns = identify_patterns(&commits);
        assert_eq!(patterns.has_emoji, 0.5);
        assert_eq!(patterns.has_ticket_number, 0.5);
        assert_eq!(patterns.ends_with_period, 0.25);
        assert_eq!(patterns.has_scope, 0.25);
        assert_eq!(patterns.starts_with_capital, 0.25);
    }

    #[test]
    fn test_tone_ties_favor_casual() {
        assert_eq!(
            detect_tone(&history(&["implement parser", "fix lexer"])),
            Tone::Casual
        );
        assert_eq!(
            detect_tone(&history(&["implement parser", "resolve crash", "fix lexer"])),
            Tone::Formal
        );
    }

    #[test]
    fn test_message_can_count_toward_both_tones() {
        assert_eq!(
            detect_tone(&history(&["implement and fix parser"])),
            Tone::Casual
        );
    }

    #[test]
    fn test_fractions_within_unit_interval() {
        for messages in [CONVENTIONAL_HISTORY, IMPERATIVE_HISTORY, DESCRIPTIVE_HISTORY] {
            let profile = analyze_commit_history(&history(messages));
            let vocabulary = profile.vocabulary.unwrap();
            let scopes = profile.scope_preferences.unwrap();
            let factors = profile.confidence_factors.unwrap();
            let fractions = [
                profile.patterns.has_scope,
                profile.patterns.has_emoji,
                profile.patterns.has_ticket_number,
                profile.patterns.starts_with_capital,
                profile.patterns.ends_with_period,
                vocabulary.formal,
                vocabulary.casual,
                vocabulary.technical,
                vocabulary.business,
                scopes.categories.frontend,
                scopes.categories.backend,
                scopes.categories.devops,
                scopes.categories.testing,
                factors.consistency,
                factors.conventional_adherence,
                factors.scope_usage,
                factors.message_quality,
            ];
            for value in fractions {
                assert!((0.0..=1.0).contains(&value), "out of range: {}", value);
            }
            for term in vocabulary.top_words.iter().chain(&profile.common_prefixes) {
                assert!((0.0..=1.0).contains(&term.frequency));
            }
        }
    }

    #[test]
    fn test_scope_preferences() {
        let prefs = analyze_scope_preferences(&history(CONVENTIONAL_HISTORY));
        assert_eq!(prefs.top_scopes[0].term, "auth");
        assert_eq!(prefs.top_scopes[0].count, 3);
        // auth x3, api x2 are backend scopes
        assert!((prefs.categories.backend - 0.5).abs() < 1e-9);
        assert!((prefs.categories.frontend - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_type_frequency() {
        let types = analyze_type_frequency(&history(CONVENTIONAL_HISTORY));
        assert_eq!(types[0].term, "feat");
        assert_eq!(types[0].count, 2);
        assert!(types.iter().all(|t| CONVENTIONAL_TYPES.contains(&t.term.as_str())));

        // Uppercase first words are not types
        assert!(analyze_type_frequency(&history(&["Feat: loud"])).is_empty());
    }

    #[test]
    fn test_confidence_factors_for_conventional_history() {
        let factors = calculate_confidence_factors(&history(CONVENTIONAL_HISTORY));
        assert_eq!(factors.consistency, 1.0);
        assert_eq!(factors.conventional_adherence, 1.0);
        assert_eq!(factors.scope_usage, 1.0);
        assert!(factors.overall() > 0.8);
    }

    #[test]
    fn test_overall_confidence_weights() {
        let factors = ConfidenceFactors {
            consistency: 1.0,
            conventional_adherence: 0.0,
            scope_usage: 1.0,
            message_quality: 0.0,
        };
        assert!((factors.overall() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_vocabulary_families() {
        let vocabulary = analyze_vocabulary(&history(&[
            "implement payment api",
            "fix typo",
            "misc",
            "update user dashboard",
        ]));
        assert_eq!(vocabulary.formal, 0.25);
        assert_eq!(vocabulary.casual, 0.5);
        assert_eq!(vocabulary.technical, 0.25);
        assert_eq!(vocabulary.business, 0.5);
    }
}
