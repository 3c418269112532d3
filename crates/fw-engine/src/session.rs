//! Game session orchestration: document + state + injected save store.

use fw_save::{PlayerStats, SaveStore, SavedGame};
use fw_story::{Choice, GameState, StoryDocument, StoryNode};

use crate::error::{EngineError, EngineResult};
use crate::query::{available_choices, can_select_choice, current_node};
use crate::reducer::{GameAction, arrival_actions, reduce};

/// One running game: the validated story, the current state, and a save
/// store injected by the application entry point.
///
/// All state changes funnel through [`GameSession::dispatch`]. After every
/// dispatch the session snapshots itself to the store, best-effort:
/// persistence failures are logged and gameplay continues un-persisted.
pub struct GameSession<S: SaveStore> {
    story: StoryDocument,
    state: GameState,
    store: S,
}

impl<S: SaveStore> GameSession<S> {
    /// Start a fresh session at the entry node.
    pub fn new(story: StoryDocument, store: S, player_name: &str) -> Self {
        let mut session = Self {
            story,
            state: GameState::new(player_name),
            store,
        };
        session.dispatch(GameAction::StartGame { player_name: None });
        session
    }

    /// Resume from a stored snapshot if one exists, otherwise start fresh.
    ///
    /// A corrupt or unreadable snapshot falls back to a fresh session;
    /// load failure is never fatal.
    pub fn resume(story: StoryDocument, store: S, player_name: &str) -> Self {
        match store.load_game() {
            Ok(Some(save)) => {
                log::info!(
                    "resuming saved game for {} at '{}'",
                    save.player_name,
                    save.state.current_node_id
                );
                Self {
                    story,
                    state: save.state,
                    store,
                }
            }
            Ok(None) => Self::new(story, store, player_name),
            Err(e) => {
                log::warn!("could not load saved game, starting fresh: {e}");
                Self::new(story, store, player_name)
            }
        }
    }

    /// The validated story document.
    pub fn story(&self) -> &StoryDocument {
        &self.story
    }

    /// The current state snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The node the player is currently at.
    pub fn current_node(&self) -> EngineResult<&StoryNode> {
        current_node(&self.story, &self.state)
    }

    /// The choices currently presented to the player (hidden ones omitted,
    /// locked ones included).
    pub fn available_choices(&self) -> EngineResult<Vec<&Choice>> {
        let node = current_node(&self.story, &self.state)?;
        Ok(available_choices(node, &self.state.player))
    }

    /// Whether the player meets a choice's requirement.
    pub fn can_select(&self, choice: &Choice) -> bool {
        can_select_choice(&self.state.player, choice)
    }

    /// Dispatch an action through the reducer, then snapshot to the store.
    pub fn dispatch(&mut self, action: GameAction) {
        let was_terminal = self.state.is_terminal();
        self.state = reduce(&self.story, self.state.clone(), action);

        if !was_terminal && self.state.is_terminal() {
            self.record_result();
        }
        self.autosave();
    }

    /// Take the `index`-th visible choice at the current node.
    ///
    /// Applies the choice's effects, navigates, and on first entry to the
    /// target applies the target's arrival action.
    pub fn choose(&mut self, index: usize) -> EngineResult<()> {
        let choice = {
            let choices = self.available_choices()?;
            choices
                .get(index)
                .copied()
                .cloned()
                .ok_or(EngineError::InvalidChoice(index))?
        };

        if !self.can_select(&choice) {
            let item = choice.requires.clone().unwrap_or_default();
            return Err(EngineError::MissingItem(item));
        }

        let first_visit = !self.state.has_visited(&choice.to);

        if let Some(effects) = choice.effects.clone() {
            self.dispatch(GameAction::ApplyChoiceEffects { effects });
        }
        // A lethal effect ends the session where the player stands; the
        // target node is never entered.
        if self.state.is_terminal() {
            return Ok(());
        }
        self.dispatch(GameAction::NavigateToNode {
            node_id: choice.to.clone(),
        });

        if first_visit
            && let Some(action) = self.story.get(&choice.to).and_then(|n| n.on_arrive.clone())
        {
            for arrival in arrival_actions(&action, &self.state) {
                self.dispatch(arrival);
            }
        }

        Ok(())
    }

    /// Throw the session away and start over, keeping the player's name.
    pub fn restart(&mut self) {
        self.dispatch(GameAction::ResetGame);
    }

    /// Delete the stored snapshot. Best-effort.
    pub fn clear_save(&self) {
        if let Err(e) = self.store.clear_game() {
            log::warn!("could not clear saved game: {e}");
        }
    }

    fn record_result(&self) {
        let mut stats = match self.store.load_stats() {
            Ok(Some(stats)) => stats,
            Ok(None) => PlayerStats::default(),
            Err(e) => {
                log::warn!("could not load player stats: {e}");
                PlayerStats::default()
            }
        };
        stats.record_result(self.state.is_victory, &self.state.current_node_id);
        if let Err(e) = self.store.save_stats(&stats) {
            log::warn!("could not save player stats: {e}");
        }
    }

    fn autosave(&self) {
        match SavedGame::snapshot(self.state.clone()) {
            Ok(save) => {
                if let Err(e) = self.store.save_game(&save) {
                    log::warn!("autosave failed: {e}");
                }
            }
            // Unnamed sessions (e.g. before StartGame carries a name) are
            // not worth persisting.
            Err(e) => log::debug!("skipping autosave: {e}"),
        }
    }
}
