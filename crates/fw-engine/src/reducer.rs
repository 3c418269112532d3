//! The single serializing entry point for state transitions.
//!
//! Every mutation of [`GameState`] is a named action folded through
//! [`reduce`]. The function is pure: same state and action, same result,
//! and each call produces a complete new snapshot, so no partial update is
//! ever observable.

use fw_story::{ChoiceEffect, GameState, NodeAction, StoryDocument};

use crate::ending::{Ending, classify_ending};
use crate::query::{apply_effects, sync_terminal_on_death};

/// A discrete, named state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Begin the session, optionally naming the player.
    StartGame {
        /// Name to assign; `None` keeps the current name.
        player_name: Option<String>,
    },
    /// Rename the player.
    SetPlayerName {
        /// The new name.
        name: String,
    },
    /// Move the player to a node, marking it visited and classifying
    /// endings.
    NavigateToNode {
        /// Target node id.
        node_id: String,
    },
    /// Apply the effects of a taken choice, in declaration order.
    ApplyChoiceEffects {
        /// The effect list.
        effects: Vec<ChoiceEffect>,
    },
    /// Grant an item (duplicates ignored).
    AddItem {
        /// Item name.
        item: String,
    },
    /// Damage the player, clamping at zero hp.
    TakeDamage {
        /// Damage amount.
        amount: u32,
    },
    /// Heal the player, clamping at max hp.
    Heal {
        /// Heal amount.
        amount: u32,
    },
    /// Set a boolean game flag.
    SetFlag {
        /// Flag key.
        flag: String,
    },
    /// Force a terminal state.
    EndGame {
        /// Whether the ending counts as a victory.
        victory: bool,
    },
    /// Return to a fresh state, keeping the player's name.
    ResetGame,
    /// Replace the state with a restored snapshot.
    LoadSavedGame {
        /// The snapshot state.
        state: GameState,
    },
}

/// Fold one action over the state, producing the next snapshot.
///
/// The story document is consulted read-only, for ending classification
/// on navigation.
pub fn reduce(story: &StoryDocument, mut state: GameState, action: GameAction) -> GameState {
    match action {
        GameAction::StartGame { player_name } => {
            state.game_started = true;
            if let Some(name) = player_name {
                state.player.name = name;
            }
            state
        }
        GameAction::SetPlayerName { name } => {
            state.player.name = name;
            state
        }
        GameAction::NavigateToNode { node_id } => {
            state.visited_nodes.insert(node_id.clone());
            state.current_node_id = node_id;

            if let Some(node) = story.get(&state.current_node_id)
                && let Some(ending) = classify_ending(node)
            {
                // A dead player cannot win, whatever the node says.
                let victory = ending == Ending::Victory && !state.player.is_dead();
                state.is_victory = victory;
                state.is_game_over = !victory;
            }
            state
        }
        GameAction::ApplyChoiceEffects { effects } => {
            apply_effects(&mut state, &effects);
            state
        }
        GameAction::AddItem { item } => {
            state.player.add_item(item);
            state
        }
        GameAction::TakeDamage { amount } => {
            state.player.take_damage(amount);
            sync_terminal_on_death(&mut state);
            state
        }
        GameAction::Heal { amount } => {
            state.player.heal(amount);
            state
        }
        GameAction::SetFlag { flag } => {
            state.flags.insert(flag, true);
            state
        }
        GameAction::EndGame { victory } => {
            state.is_victory = victory;
            state.is_game_over = !victory;
            state
        }
        GameAction::ResetGame => GameState::new(state.player.name),
        GameAction::LoadSavedGame { state: snapshot } => snapshot,
    }
}

/// Translate a node's arrival action into dispatchable actions, the same
/// way a taken choice turns into an effect list.
pub fn arrival_actions(action: &NodeAction, state: &GameState) -> Vec<GameAction> {
    let mut actions = Vec::new();
    if let Some(item) = &action.add_item
        && !state.player.has_item(item)
    {
        actions.push(GameAction::AddItem { item: item.clone() });
    }
    if let Some(amount) = action.take_damage
        && amount > 0
    {
        actions.push(GameAction::TakeDamage { amount });
    }
    if let Some(amount) = action.heal
        && amount > 0
    {
        actions.push(GameAction::Heal { amount });
    }
    if let Some(flag) = &action.set_flag {
        actions.push(GameAction::SetFlag { flag: flag.clone() });
    }
    actions
}
