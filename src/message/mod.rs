//! Commit message synthesis: templates, scope inference and candidate ranking.

pub mod generator;
pub mod scope;
pub mod templates;

pub use generator::{
    AdaptFn, CandidateKind, GenerateOptions, MAX_MESSAGE_LENGTH, MessageCandidate,
    alternative_change_type, apply_basic_style, generate_description, generate_messages,
    validate_commit_message,
};
pub use scope::detect_action;
