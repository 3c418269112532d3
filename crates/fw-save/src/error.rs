//! Error types for the persistence boundary.
//!
//! Every failure here is fatal to the save/load operation only; callers
//! convert load failures into a fresh start and log save failures, so
//! gameplay never crashes over storage.

/// Alias for `Result<T, SaveError>`.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur at the storage boundary.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The storage medium could not be read or written.
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be serialized or deserialized.
    #[error("corrupt save data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A snapshot without a player name cannot be saved.
    #[error("cannot save game without player name")]
    MissingPlayerName,

    /// The stored record was written by an incompatible format version.
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),
}
