//! Data model produced by the change classifier.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
        }
    }
}

/// A staged file and how it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Conventional commit change types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
    Perf,
    Build,
    Ci,
    Deps,
    Security,
    Hotfix,
    Wip,
    Revert,
    Merge,
    Init,
    Release,
}

impl ChangeType {
    pub const ALL: [ChangeType; 18] = [
        ChangeType::Feat,
        ChangeType::Fix,
        ChangeType::Docs,
        ChangeType::Style,
        ChangeType::Refactor,
        ChangeType::Test,
        ChangeType::Chore,
        ChangeType::Perf,
        ChangeType::Build,
        ChangeType::Ci,
        ChangeType::Deps,
        ChangeType::Security,
        ChangeType::Hotfix,
        ChangeType::Wip,
        ChangeType::Revert,
        ChangeType::Merge,
        ChangeType::Init,
        ChangeType::Release,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Perf => "perf",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Deps => "deps",
            Self::Security => "security",
            Self::Hotfix => "hotfix",
            Self::Wip => "wip",
            Self::Revert => "revert",
            Self::Merge => "merge",
            Self::Init => "init",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("Unknown change type: {}", s))
    }
}

/// Coarse area a file belongs to, decided from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Test,
    Docs,
    Config,
    Build,
    Style,
    Ui,
    Api,
    Database,
    Security,
    Utils,
    Code,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Docs => "docs",
            Self::Config => "config",
            Self::Build => "build",
            Self::Style => "style",
            Self::Ui => "ui",
            Self::Api => "api",
            Self::Database => "database",
            Self::Security => "security",
            Self::Utils => "utils",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staged paths partitioned by status, plus the labels detected on them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileChanges {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub renamed: Vec<String>,
    pub file_types: BTreeSet<String>,
    pub categories: BTreeSet<FileCategory>,
}

impl FileChanges {
    /// Added and modified paths, in that order.
    pub fn touched_paths(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(String::as_str)
    }

    pub fn has_category(&self, category: FileCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// Signals extracted from the lines of a unified diff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeChanges {
    pub new_functions: Vec<String>,
    pub new_classes: Vec<String>,
    pub imports: usize,
    pub exports: usize,
    pub api_calls: usize,
    pub database: usize,
    pub tests: usize,
    /// Lowercased keyword tokens found on changed lines.
    pub keywords: BTreeSet<String>,
}

impl CodeChanges {
    pub fn has_new_definitions(&self) -> bool {
        !self.new_functions.is_empty() || !self.new_classes.is_empty()
    }
}

/// File, insertion and deletion counts for the staged diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub files: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// Result of classifying one snapshot of staged changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeAnalysis {
    pub file_changes: FileChanges,
    pub code_changes: CodeChanges,
    pub change_type: Option<ChangeType>,
    /// Heuristic certainty in `[10, 90]`.
    pub confidence: u8,
    pub summary: String,
    /// Attached by the caller after classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DiffStats>,
}
