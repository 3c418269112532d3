//! Story data model, schema validation, and graph analysis for Finsterwald.
//!
//! This crate owns the load-time trust boundary: an authored JSON story
//! document passes through the schema validator and the graph integrity
//! analyzer before the runtime is allowed to see it. It also defines the
//! runtime state types ([`Player`], [`GameState`]) that the engine crate
//! mutates through its reducer.

/// Graph integrity analysis: dangling edges, reachability, anomalies.
pub mod analyzer;
/// The story graph data model.
pub mod document;
/// Error types for story loading.
pub mod error;
/// The full load pipeline from JSON text to an accepted document.
pub mod loader;
/// Player and game-session state types.
pub mod player;
/// Validation report types.
pub mod report;
/// Structural schema validation of raw JSON.
pub mod schema;
/// Story statistics.
pub mod stats;

pub use analyzer::{AnalysisReport, analyze};
pub use document::{
    Choice, ChoiceEffect, NodeAction, NodeMetadata, START_NODE, StoryDocument, StoryNode,
};
pub use error::{StoryError, StoryResult};
pub use loader::{load_story_file, load_story_or_fallback, load_story_str};
pub use player::{DEFAULT_MAX_HP, GameState, Player};
pub use report::ValidationReport;
pub use schema::validate_document;
pub use stats::{StoryStats, story_stats};
