//! The three independent records held by a save store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fw_story::GameState;

use crate::error::{SaveError, SaveResult};

/// Current save format version, embedded in every snapshot.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// A point-in-time snapshot of one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Save format version for forward-compatibility checks.
    pub version: u32,
    /// Player name, duplicated for quick display without deserializing state.
    pub player_name: String,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// The full game state.
    pub state: GameState,
}

impl SavedGame {
    /// Snapshot a game state. Rejects states without a player name;
    /// an anonymous save can never be matched back to a session.
    pub fn snapshot(state: GameState) -> SaveResult<Self> {
        if state.player.name.trim().is_empty() {
            return Err(SaveError::MissingPlayerName);
        }
        Ok(Self {
            version: SAVE_FORMAT_VERSION,
            player_name: state.player.name.clone(),
            timestamp: Utc::now(),
            state,
        })
    }

    /// Check the record's format version before trusting its contents.
    pub fn verify_version(&self) -> SaveResult<()> {
        if self.version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

/// Aggregate statistics across all sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Sessions that reached a terminal state.
    pub games_played: u32,
    /// Sessions ending in victory.
    pub games_won: u32,
    /// Sessions ending in defeat.
    pub games_lost: u32,
    /// When a session last ended.
    pub last_played_at: Option<DateTime<Utc>>,
    /// Node id of the best ending reached, if any.
    pub best_ending: Option<String>,
}

impl PlayerStats {
    /// Record a finished session.
    pub fn record_result(&mut self, won: bool, ending_node: &str) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
            self.best_ending = Some(ending_node.to_string());
        } else {
            self.games_lost += 1;
        }
        self.last_played_at = Some(Utc::now());
    }
}

/// User-facing settings, owned by the presentation layer but persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Save automatically after every state change.
    pub auto_save: bool,
    /// Audio on/off.
    pub sound_enabled: bool,
    /// Presentation theme name.
    pub theme: String,
    /// Text reveal speed: slow, medium, or fast.
    pub text_speed: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: true,
            sound_enabled: true,
            theme: "dark".to_string(),
            text_speed: "medium".to_string(),
        }
    }
}
