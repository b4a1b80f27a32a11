//! Classification of staged changes into a conventional change type.

pub mod classifier;
pub mod patterns;
pub mod types;

pub use classifier::{CHANGE_TYPE_RULES, ChangeTypeRule, analyze, categorize_file};
pub use types::{
    ChangeAnalysis, ChangeType, CodeChanges, DiffStats, FileCategory, FileChange, FileChanges,
    FileStatus,
};
