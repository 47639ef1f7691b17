//! Error types for timeline construction and playback.

use thiserror::Error;

/// Result type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Errors that can occur while building or playing a timeline.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// A named group was declared twice within the same animation.
    #[error("group {0:?} already exists")]
    DuplicateGroup(String),

    /// A named group was referenced but never declared.
    #[error("group {0:?} not found")]
    GroupNotFound(String),

    /// Playback was started at a group index past the end.
    #[error("group index {index} out of range (animation has {count} groups)")]
    GroupIndexOutOfRange { index: usize, count: usize },

    /// A property effect reached play time with no target bound to it.
    #[error("no target bound for property effect")]
    MissingTarget,

    /// A timeline description failed to parse.
    #[error("invalid timeline description: {0}")]
    Schema(#[from] serde_json::Error),
}
