//! JSON file-backed save store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SaveResult;
use crate::records::{PlayerStats, SavedGame, Settings};
use crate::store::SaveStore;

const GAME_FILE: &str = "current-game.json";
const STATS_FILE: &str = "player-stats.json";
const SETTINGS_FILE: &str = "settings.json";

/// A save store backed by a directory of JSON files, one per record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write, so constructing a store never touches the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> SaveResult<Option<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> SaveResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(file), json)?;
        Ok(())
    }

    fn remove(&self, file: &str) -> SaveResult<()> {
        let path = self.dir.join(file);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl SaveStore for JsonFileStore {
    fn load_game(&self) -> SaveResult<Option<SavedGame>> {
        match self.read::<SavedGame>(GAME_FILE)? {
            Some(save) => {
                save.verify_version()?;
                Ok(Some(save))
            }
            None => Ok(None),
        }
    }

    fn save_game(&self, save: &SavedGame) -> SaveResult<()> {
        self.write(GAME_FILE, save)
    }

    fn clear_game(&self) -> SaveResult<()> {
        self.remove(GAME_FILE)
    }

    fn load_stats(&self) -> SaveResult<Option<PlayerStats>> {
        self.read(STATS_FILE)
    }

    fn save_stats(&self, stats: &PlayerStats) -> SaveResult<()> {
        self.write(STATS_FILE, stats)
    }

    fn load_settings(&self) -> SaveResult<Option<Settings>> {
        self.read(SETTINGS_FILE)
    }

    fn save_settings(&self, settings: &Settings) -> SaveResult<()> {
        self.write(SETTINGS_FILE, settings)
    }

    fn clear_all(&self) -> SaveResult<()> {
        self.remove(GAME_FILE)?;
        self.remove(STATS_FILE)?;
        self.remove(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveError;
    use fw_story::GameState;
    use tempfile::TempDir;

    #[test]
    fn round_trip_preserves_state() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut state = GameState::new("Ana");
        state.current_node_id = "cellar".to_string();
        state.visited_nodes.insert("start".to_string());
        state.visited_nodes.insert("cellar".to_string());
        state.player.add_item("Key");

        let save = SavedGame::snapshot(state.clone()).unwrap();
        store.save_game(&save).unwrap();

        let loaded = store.load_game().unwrap().unwrap();
        assert_eq!(loaded.state.current_node_id, "cellar");
        assert_eq!(loaded.state.player, state.player);
        assert_eq!(loaded.state.visited_nodes, state.visited_nodes);
    }

    #[test]
    fn missing_file_is_none_not_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_game().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_save_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(GAME_FILE), "{ not json").unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.load_game(), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn foreign_version_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut save = SavedGame::snapshot(GameState::new("Ana")).unwrap();
        save.version = 99;
        store.save_game(&save).unwrap();

        assert!(matches!(
            store.load_game(),
            Err(SaveError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn clear_all_removes_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save_settings(&Settings::default()).unwrap();
        store.save_stats(&PlayerStats::default()).unwrap();
        store.clear_all().unwrap();

        assert!(store.load_settings().unwrap().is_none());
        assert!(store.load_stats().unwrap().is_none());
    }
}
