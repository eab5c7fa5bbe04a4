//! File-based KnowledgeStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use combat_core::PlayerLoadout;

use super::{KnowledgeStore, StoreError};

/// Stores the loadout as `player.json` in a directory.
///
/// Writes go to a temporary file first and are renamed into place.
pub struct FileKnowledgeStore {
    base_dir: PathBuf,
}

impl FileKnowledgeStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Create the store and seed it unless a loadout is already saved.
    pub fn seeded(base_dir: impl AsRef<Path>, initial: &PlayerLoadout) -> Result<Self, StoreError> {
        let store = Self::new(base_dir)?;
        if !store.loadout_path().exists() {
            store.sync_player(initial)?;
        }
        Ok(store)
    }

    fn loadout_path(&self) -> PathBuf {
        self.base_dir.join("player.json")
    }
}

impl KnowledgeStore for FileKnowledgeStore {
    fn load_player(&self) -> Result<PlayerLoadout, StoreError> {
        let path = self.loadout_path();
        if !path.exists() {
            return Err(StoreError::MissingLoadout);
        }
        let bytes = fs::read(&path)?;
        let loadout = serde_json::from_slice(&bytes)?;
        tracing::debug!("Loaded player loadout from {}", path.display());
        Ok(loadout)
    }

    fn sync_player(&self, loadout: &PlayerLoadout) -> Result<(), StoreError> {
        let path = self.loadout_path();
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(loadout)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Synced player loadout to {}", path.display());
        Ok(())
    }
}
