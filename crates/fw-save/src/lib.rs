//! Save-game persistence boundary for Finsterwald.
//!
//! Holds three independent records (the current-session snapshot,
//! aggregate player statistics, and user settings) behind the
//! [`SaveStore`] trait. The engine treats saving as a best-effort side
//! effect: failures here become results that the caller logs, and they
//! never interrupt gameplay.

/// Error types for the persistence boundary.
pub mod error;
/// JSON file-backed store.
pub mod file;
/// Record types held by a store.
pub mod records;
/// The store trait and in-memory implementation.
pub mod store;

pub use error::{SaveError, SaveResult};
pub use file::JsonFileStore;
pub use records::{PlayerStats, SAVE_FORMAT_VERSION, SavedGame, Settings};
pub use store::{MemoryStore, SaveStore};
