//! Runtime engine for Finsterwald.
//!
//! Consumes a story document that has already passed schema validation and
//! graph analysis, and drives one game session over it: a reducer for all
//! state transitions, a query layer for choice availability and effects,
//! ending classification, and session orchestration with best-effort
//! persistence through an injected save store.

/// Victory/defeat classification of ending nodes.
pub mod ending;
/// Error types for the runtime engine.
pub mod error;
/// Choice availability and effect application.
pub mod query;
/// The action enum and pure state-transition function.
pub mod reducer;
/// Session orchestration.
pub mod session;

pub use ending::{Ending, classify_ending};
pub use error::{EngineError, EngineResult};
pub use query::{
    apply_effect, apply_effects, apply_node_action, available_choices, can_select_choice,
    current_node, locked_choices, should_hide_choice,
};
pub use reducer::{GameAction, arrival_actions, reduce};
pub use session::GameSession;
