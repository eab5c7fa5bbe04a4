//! In-memory KnowledgeStore for tests and local runs.

use std::sync::RwLock;

use combat_core::PlayerLoadout;

use super::{KnowledgeStore, StoreError};

pub struct InMemoryKnowledgeStore {
    loadout: RwLock<Option<PlayerLoadout>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self {
            loadout: RwLock::new(None),
        }
    }

    pub fn with_loadout(loadout: PlayerLoadout) -> Self {
        Self {
            loadout: RwLock::new(Some(loadout)),
        }
    }
}

impl Default for InMemoryKnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeStore for InMemoryKnowledgeStore {
    fn load_player(&self) -> Result<PlayerLoadout, StoreError> {
        let loadout = self.loadout.read().map_err(|_| StoreError::LockPoisoned)?;
        loadout.clone().ok_or(StoreError::MissingLoadout)
    }

    fn sync_player(&self, loadout: &PlayerLoadout) -> Result<(), StoreError> {
        let mut stored = self.loadout.write().map_err(|_| StoreError::LockPoisoned)?;
        *stored = Some(loadout.clone());
        Ok(())
    }
}
