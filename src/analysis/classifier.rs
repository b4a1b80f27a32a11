//! Heuristic classification of staged changes.
//!
//! [`analyze`] turns a unified diff and the staged file list into a
//! [`ChangeAnalysis`]: files are categorized by path, code signals are
//! extracted from changed lines, and the change type is picked by walking
//! [`CHANGE_TYPE_RULES`] in order.

use tracing::debug;

use super::patterns::{
    API_CALL, BUILD_PATH, CI_PATH, DATABASE, DEPENDENCY_PATH, EXPORT, FILE_TYPES, IMPORT,
    NEW_CLASS, NEW_FUNCTION, STYLE_EXTENSIONS, TEST_CONSTRUCT, keyword_tokens, token_matches,
};
use super::types::{
    ChangeAnalysis, ChangeType, CodeChanges, FileCategory, FileChange, FileChanges, FileStatus,
};

const MIN_CONFIDENCE: i32 = 10;
const MAX_CONFIDENCE: i32 = 90;
const BASE_CONFIDENCE: i32 = 50;

/// Summary used when no file or function counts apply.
pub const DEFAULT_SUMMARY: &str = "Code changes detected";

const SECURITY_KEYWORDS: &[&str] = &[
    "security",
    "vulnerability",
    "exploit",
    "auth",
    "encrypt",
    "password",
];
const HOTFIX_KEYWORDS: &[&str] = &["hotfix", "critical", "urgent", "emergency"];
const PERF_KEYWORDS: &[&str] = &["optimize", "performance", "speed", "cache", "memory"];
pub(crate) const FIX_KEYWORDS: &[&str] = &["fix", "bug", "error", "issue", "resolve", "patch"];
const REFACTOR_KEYWORDS: &[&str] = &["refactor", "move", "rename", "restructure", "reorganize"];
const REVERT_KEYWORDS: &[&str] = &["revert", "undo", "rollback"];
const WIP_KEYWORDS: &[&str] = &["wip", "todo", "fixme"];

/// One step of the change type decision: the first rule whose predicate holds wins.
pub struct ChangeTypeRule {
    pub name: &'static str,
    pub matches: fn(&FileChanges, &CodeChanges) -> bool,
    pub change_type: ChangeType,
}

/// Ordered change type rules. Security and urgency signals come first so that
/// generic feature/chore signals can never shadow them.
pub const CHANGE_TYPE_RULES: &[ChangeTypeRule] = &[
    ChangeTypeRule {
        name: "security keyword",
        matches: |_, code| has_keyword(code, SECURITY_KEYWORDS),
        change_type: ChangeType::Security,
    },
    ChangeTypeRule {
        name: "hotfix keyword",
        matches: |_, code| has_keyword(code, HOTFIX_KEYWORDS),
        change_type: ChangeType::Hotfix,
    },
    ChangeTypeRule {
        name: "build tool path",
        matches: |files, _| files.touched_paths().any(|p| BUILD_PATH.is_match(p)),
        change_type: ChangeType::Build,
    },
    ChangeTypeRule {
        name: "ci path",
        matches: |files, _| files.touched_paths().any(|p| CI_PATH.is_match(p)),
        change_type: ChangeType::Ci,
    },
    ChangeTypeRule {
        name: "dependency manifest",
        matches: |files, _| files.touched_paths().any(|p| DEPENDENCY_PATH.is_match(p)),
        change_type: ChangeType::Deps,
    },
    ChangeTypeRule {
        name: "test files or constructs",
        matches: |files, code| files.has_category(FileCategory::Test) || code.tests > 0,
        change_type: ChangeType::Test,
    },
    ChangeTypeRule {
        name: "documentation files",
        matches: |files, _| files.has_category(FileCategory::Docs),
        change_type: ChangeType::Docs,
    },
    ChangeTypeRule {
        name: "stylesheets",
        matches: |files, _| is_style_only(files),
        change_type: ChangeType::Style,
    },
    ChangeTypeRule {
        name: "performance keyword",
        matches: |_, code| has_keyword(code, PERF_KEYWORDS),
        change_type: ChangeType::Perf,
    },
    ChangeTypeRule {
        name: "bug fix keyword",
        matches: |_, code| has_keyword(code, FIX_KEYWORDS),
        change_type: ChangeType::Fix,
    },
    ChangeTypeRule {
        name: "refactor keyword or rename",
        matches: |files, code| has_keyword(code, REFACTOR_KEYWORDS) || !files.renamed.is_empty(),
        change_type: ChangeType::Refactor,
    },
    ChangeTypeRule {
        name: "revert keyword",
        matches: |_, code| has_keyword(code, REVERT_KEYWORDS),
        change_type: ChangeType::Revert,
    },
    ChangeTypeRule {
        name: "work in progress keyword",
        matches: |_, code| has_keyword(code, WIP_KEYWORDS),
        change_type: ChangeType::Wip,
    },
    ChangeTypeRule {
        name: "new files with definitions",
        matches: |files, code| !files.added.is_empty() && code.has_new_definitions(),
        change_type: ChangeType::Feat,
    },
    ChangeTypeRule {
        name: "new definitions",
        matches: |_, code| code.has_new_definitions(),
        change_type: ChangeType::Feat,
    },
    ChangeTypeRule {
        name: "configuration files",
        matches: |files, _| files.has_category(FileCategory::Config),
        change_type: ChangeType::Chore,
    },
    ChangeTypeRule {
        name: "initial import",
        matches: |files, _| files.added.len() > 5 && files.modified.is_empty(),
        change_type: ChangeType::Init,
    },
    ChangeTypeRule {
        name: "mostly additions",
        matches: |files, _| files.added.len() > files.modified.len(),
        change_type: ChangeType::Feat,
    },
    ChangeTypeRule {
        name: "modifications",
        matches: |files, _| !files.modified.is_empty(),
        change_type: ChangeType::Feat,
    },
];

/// Classify a staged diff and its file list.
///
/// Never fails: empty input yields empty collections, a `chore` change type
/// and the default summary.
pub fn analyze(diff: &str, files: &[FileChange]) -> ChangeAnalysis {
    let file_changes = analyze_file_changes(files);
    let code_changes = analyze_code_changes(diff);

    let change_type = determine_change_type(&file_changes, &code_changes);
    let confidence = calculate_confidence(&file_changes, &code_changes);
    let summary = generate_summary(&file_changes, &code_changes);

    debug!(%change_type, confidence, "Classified staged changes");

    ChangeAnalysis {
        file_changes,
        code_changes,
        change_type: Some(change_type),
        confidence,
        summary,
        stats: None,
    }
}

/// Partition staged files by status and collect their type and category labels.
pub fn analyze_file_changes(files: &[FileChange]) -> FileChanges {
    let mut changes = FileChanges::default();

    for file in files {
        if let Some(label) = file_type_label(&file.path) {
            changes.file_types.insert(label);
        }
        changes.categories.insert(categorize_file(&file.path));

        let bucket = match file.status {
            FileStatus::Added => &mut changes.added,
            FileStatus::Modified => &mut changes.modified,
            FileStatus::Deleted => &mut changes.deleted,
            FileStatus::Renamed => &mut changes.renamed,
        };
        bucket.push(file.path.clone());
    }

    changes
}

/// Extract code signals from a unified diff.
///
/// Definitions and counters come from added lines; keywords come from every
/// added or removed line. The `---`/`+++` file headers before each file's
/// first hunk are skipped; inside a hunk such lines are ordinary content.
pub fn analyze_code_changes(diff: &str) -> CodeChanges {
    let mut changes = CodeChanges::default();
    let mut in_file_header = true;

    for line in diff.lines() {
        if line.starts_with("diff --git") {
            in_file_header = true;
            continue;
        }
        if line.starts_with("@@") {
            in_file_header = false;
            continue;
        }
        if in_file_header && (line.starts_with("+++") || line.starts_with("---")) {
            continue;
        }

        let (added, content) = match line.as_bytes().first() {
            Some(b'+') => (true, &line[1..]),
            Some(b'-') => (false, &line[1..]),
            _ => continue,
        };

        changes.keywords.extend(keyword_tokens(content));

        if !added {
            continue;
        }

        if let Some(caps) = NEW_FUNCTION.captures(content) {
            changes.new_functions.push(caps[1].to_string());
        }
        if let Some(caps) = NEW_CLASS.captures(content) {
            changes.new_classes.push(caps[1].to_string());
        }
        changes.imports += usize::from(IMPORT.is_match(content));
        changes.exports += usize::from(EXPORT.is_match(content));
        changes.api_calls += usize::from(API_CALL.is_match(content));
        changes.database += usize::from(DATABASE.is_match(content));
        changes.tests += usize::from(TEST_CONSTRUCT.is_match(content));
    }

    changes
}

/// Pick the change type from the first matching rule in [`CHANGE_TYPE_RULES`].
pub fn determine_change_type(files: &FileChanges, code: &CodeChanges) -> ChangeType {
    match CHANGE_TYPE_RULES.iter().find(|rule| (rule.matches)(files, code)) {
        Some(rule) => {
            debug!(rule = rule.name, "Change type rule matched");
            rule.change_type
        }
        None => ChangeType::Chore,
    }
}

/// Score how certain the classification is, clamped to `[10, 90]`.
///
/// Narrow, single-purpose changes score higher; sprawling ones lower.
pub fn calculate_confidence(files: &FileChanges, code: &CodeChanges) -> u8 {
    let mut confidence = BASE_CONFIDENCE;

    if files.has_category(FileCategory::Test) {
        confidence += 30;
    }
    if files.has_category(FileCategory::Docs) {
        confidence += 30;
    }
    if !code.new_functions.is_empty() {
        confidence += 20;
    }
    if code.keywords.len() > 2 {
        confidence += 15;
    }

    if files.categories.len() > 3 {
        confidence -= 20;
    }
    if files.added.len() + files.modified.len() > 10 {
        confidence -= 15;
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8
}

/// Short human-readable description such as "2 new files, 1 modified".
pub fn generate_summary(files: &FileChanges, code: &CodeChanges) -> String {
    let mut parts = Vec::new();

    if !files.added.is_empty() {
        parts.push(pluralize(files.added.len(), "new file"));
    }
    if !files.modified.is_empty() {
        parts.push(format!("{} modified", files.modified.len()));
    }
    if !code.new_functions.is_empty() {
        parts.push(pluralize(code.new_functions.len(), "new function"));
    }

    if parts.is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        parts.join(", ")
    }
}

/// Categorize a path. Checks run in priority order and the first match wins.
pub fn categorize_file(path: &str) -> FileCategory {
    let lower = path.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    let ext = extension(&lower);
    let ext_in = |set: &[&str]| ext.is_some_and(|e| set.contains(&e));

    if has("test") || has("spec") || has("__tests__") {
        FileCategory::Test
    } else if has("doc") || has("readme") || ext_in(&["md", "rst", "txt"]) {
        FileCategory::Docs
    } else if has("config")
        || has("package.json")
        || ext_in(&["json", "yaml", "yml", "toml", "ini", "env"])
    {
        FileCategory::Config
    } else if has("webpack") || has("babel") || has(".github") || has("dockerfile") {
        FileCategory::Build
    } else if ext_in(STYLE_EXTENSIONS) {
        FileCategory::Style
    } else if has("component") || has("ui") || has("view") || has("page") {
        FileCategory::Ui
    } else if has("api") || has("service") || has("controller") || has("route") {
        FileCategory::Api
    } else if has("migration") || has("schema") || has("model") || ext_in(&["sql", "db"]) {
        FileCategory::Database
    } else if has("auth") || has("security") || has("permission") || has("role") {
        FileCategory::Security
    } else if has("util") || has("helper") || has("lib") || has("common") {
        FileCategory::Utils
    } else {
        FileCategory::Code
    }
}

/// Language label for a path, or the raw extension when it is not in the table.
pub fn file_type_label(path: &str) -> Option<String> {
    let ext = extension(path)?;
    let dotted = format!(".{}", ext.to_lowercase());
    let label = FILE_TYPES
        .iter()
        .find(|(known, _)| *known == dotted)
        .map(|(_, label)| label.to_string())
        .unwrap_or(dotted);
    Some(label)
}

fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

pub(crate) fn has_keyword(code: &CodeChanges, roots: &[&str]) -> bool {
    code.keywords.iter().any(|token| token_matches(token, roots))
}

fn is_style_only(files: &FileChanges) -> bool {
    if files.file_types.contains("CSS") || files.file_types.contains("SCSS") {
        return true;
    }

    let mut paths = files.touched_paths().peekable();
    paths.peek().is_some()
        && paths.all(|p| {
            extension(&p.to_lowercase()).is_some_and(|e| STYLE_EXTENSIONS.contains(&e))
        })
}

fn pluralize(count: usize, noun: &str) -> String {
    if count > 1 {
        format!("{} {}s", count, noun)
    } else {
        format!("{} {}", count, noun)
    }
}
