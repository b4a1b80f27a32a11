//! Wording templates for each change type.
//!
//! Index 0 is the wording closest to the primary message; alternatives are
//! drawn from the later entries.

use crate::analysis::ChangeType;

/// Placeholder replaced by the generated description.
pub const DESCRIPTION_PLACEHOLDER: &str = "{description}";

pub fn templates(change_type: ChangeType) -> &'static [&'static str] {
    match change_type {
        ChangeType::Feat => &[
            "add {description}",
            "implement {description}",
            "introduce {description}",
            "create {description}",
        ],
        ChangeType::Fix => &[
            "fix {description}",
            "resolve {description}",
            "correct {description}",
            "address {description}",
        ],
        ChangeType::Refactor => &[
            "refactor {description}",
            "restructure {description}",
            "reorganize {description}",
            "improve {description}",
        ],
        ChangeType::Docs => &[
            "update documentation",
            "add documentation for {description}",
            "improve docs",
            "document {description}",
        ],
        ChangeType::Test => &[
            "add tests for {description}",
            "improve test coverage",
            "add {description} tests",
            "update test suite",
        ],
        ChangeType::Style => &[
            "improve code style",
            "format code",
            "update styling for {description}",
            "apply style changes",
        ],
        ChangeType::Chore => &[
            "update {description}",
            "maintain {description}",
            "update dependencies",
            "configure {description}",
        ],
        ChangeType::Perf => &[
            "optimize {description}",
            "improve performance of {description}",
            "enhance {description} speed",
            "optimize code",
        ],
        ChangeType::Build => &[
            "update build system",
            "configure build for {description}",
            "improve build process",
            "fix build configuration",
        ],
        ChangeType::Ci => &[
            "update CI pipeline",
            "configure CI for {description}",
            "improve continuous integration",
            "fix CI workflow",
        ],
        ChangeType::Revert => &[
            "revert {description}",
            "undo {description}",
            "rollback {description}",
            "restore previous {description}",
        ],
        ChangeType::Security => &[
            "fix security issue in {description}",
            "improve security for {description}",
            "patch security vulnerability",
            "enhance security measures",
        ],
        ChangeType::Deps => &[
            "update dependencies",
            "upgrade {description}",
            "add dependency for {description}",
            "remove unused dependencies",
        ],
        ChangeType::Release => &[
            "prepare release {description}",
            "bump version to {description}",
            "release {description}",
            "publish {description}",
        ],
        ChangeType::Hotfix => &[
            "hotfix {description}",
            "emergency fix for {description}",
            "critical fix for {description}",
            "urgent fix for {description}",
        ],
        ChangeType::Wip => &[
            "work in progress on {description}",
            "partial implementation of {description}",
            "ongoing work on {description}",
            "initial work on {description}",
        ],
        ChangeType::Merge => &[
            "merge {description}",
            "integrate {description}",
            "combine {description}",
            "merge branch {description}",
        ],
        ChangeType::Init => &[
            "initial commit",
            "initialize {description}",
            "setup {description}",
            "bootstrap {description}",
        ],
    }
}

/// Fill the description placeholder of a template.
pub fn render(template: &str, description: &str) -> String {
    template.replace(DESCRIPTION_PLACEHOLDER, description)
}
