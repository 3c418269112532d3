//! Error types for story loading.
//!
//! Malformed authored content is *not* an error in this sense; it travels
//! through [`crate::report::ValidationReport`] as data. These errors cover
//! the mechanical failures around it: unreadable files and broken JSON.

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading a story document.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// The story file could not be read.
    #[error("cannot read story file: {0}")]
    Io(#[from] std::io::Error),

    /// The story file is not syntactically valid JSON.
    #[error("invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),
}
