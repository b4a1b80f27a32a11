//! Commit history profiling and the style guides derived from it.

pub mod guide;
pub mod profile;

pub use guide::{
    EnhancedStyleGuide, StyleGuide, VocabularyStyle, adapt_message_to_style, make_formal,
    recommendations,
};
pub use profile::{
    CommitRecord, CommitStyle, ConfidenceFactors, HistorySpan, MessagePatterns, RankedTerm,
    ScopeCategories, ScopePreferences, StyleProfile, Tone, VocabularyProfile,
    analyze_commit_history, history_span,
};
