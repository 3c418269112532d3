//! Error types for the runtime engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a game session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The current node id has no entry in the story document. After
    /// validation this indicates validation was bypassed, a programmer
    /// error rather than a user-facing condition.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A choice index outside the visible choice list.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// A gated choice was taken without the required item.
    #[error("choice requires item: {0}")]
    MissingItem(String),
}
