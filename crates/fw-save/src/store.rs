//! The save-store abstraction and an in-memory implementation.

use std::sync::Mutex;

use crate::error::SaveResult;
use crate::records::{PlayerStats, SavedGame, Settings};

/// A key-value persistence backend holding three independent records:
/// the current-session snapshot, aggregate player statistics, and user
/// settings.
///
/// The core neither knows nor cares about the storage medium. Implementors
/// are constructed by the application entry point and injected into the
/// components that need them, so tests can substitute [`MemoryStore`].
pub trait SaveStore {
    /// Load the current-session snapshot, if one exists.
    fn load_game(&self) -> SaveResult<Option<SavedGame>>;
    /// Persist the current-session snapshot.
    fn save_game(&self, save: &SavedGame) -> SaveResult<()>;
    /// Delete the current-session snapshot.
    fn clear_game(&self) -> SaveResult<()>;

    /// Load aggregate player statistics, if any were recorded.
    fn load_stats(&self) -> SaveResult<Option<PlayerStats>>;
    /// Persist aggregate player statistics.
    fn save_stats(&self, stats: &PlayerStats) -> SaveResult<()>;

    /// Load user settings, if any were stored.
    fn load_settings(&self) -> SaveResult<Option<Settings>>;
    /// Persist user settings.
    fn save_settings(&self, settings: &Settings) -> SaveResult<()>;

    /// Delete every record this store holds.
    fn clear_all(&self) -> SaveResult<()>;
}

impl<S: SaveStore + ?Sized> SaveStore for &S {
    fn load_game(&self) -> SaveResult<Option<SavedGame>> {
        (**self).load_game()
    }
    fn save_game(&self, save: &SavedGame) -> SaveResult<()> {
        (**self).save_game(save)
    }
    fn clear_game(&self) -> SaveResult<()> {
        (**self).clear_game()
    }
    fn load_stats(&self) -> SaveResult<Option<PlayerStats>> {
        (**self).load_stats()
    }
    fn save_stats(&self, stats: &PlayerStats) -> SaveResult<()> {
        (**self).save_stats(stats)
    }
    fn load_settings(&self) -> SaveResult<Option<Settings>> {
        (**self).load_settings()
    }
    fn save_settings(&self, settings: &Settings) -> SaveResult<()> {
        (**self).save_settings(settings)
    }
    fn clear_all(&self) -> SaveResult<()> {
        (**self).clear_all()
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    game: Option<SavedGame>,
    stats: Option<PlayerStats>,
    settings: Option<Settings>,
}

/// An in-memory store: the substitutable fake for tests, and the fallback
/// when no persistent directory is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn load_game(&self) -> SaveResult<Option<SavedGame>> {
        Ok(self.inner.lock().expect("store lock").game.clone())
    }

    fn save_game(&self, save: &SavedGame) -> SaveResult<()> {
        self.inner.lock().expect("store lock").game = Some(save.clone());
        Ok(())
    }

    fn clear_game(&self) -> SaveResult<()> {
        self.inner.lock().expect("store lock").game = None;
        Ok(())
    }

    fn load_stats(&self) -> SaveResult<Option<PlayerStats>> {
        Ok(self.inner.lock().expect("store lock").stats.clone())
    }

    fn save_stats(&self, stats: &PlayerStats) -> SaveResult<()> {
        self.inner.lock().expect("store lock").stats = Some(stats.clone());
        Ok(())
    }

    fn load_settings(&self) -> SaveResult<Option<Settings>> {
        Ok(self.inner.lock().expect("store lock").settings.clone())
    }

    fn save_settings(&self, settings: &Settings) -> SaveResult<()> {
        self.inner.lock().expect("store lock").settings = Some(settings.clone());
        Ok(())
    }

    fn clear_all(&self) -> SaveResult<()> {
        *self.inner.lock().expect("store lock") = MemoryInner::default();
        Ok(())
    }
}
