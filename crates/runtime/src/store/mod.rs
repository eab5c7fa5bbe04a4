//! Knowledge store: where the player's side comes from and goes back to.
//!
//! The runtime reads the loadout when an encounter starts and writes the
//! post-combat loadout back when the encounter is finalized.

mod file;
mod memory;

pub use file::FileKnowledgeStore;
pub use memory::InMemoryKnowledgeStore;

use combat_core::PlayerLoadout;
use thiserror::Error;

/// Errors surfaced by knowledge store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("knowledge store lock was poisoned")]
    LockPoisoned,

    #[error("no player loadout has been stored")]
    MissingLoadout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of truth for the player's side between encounters.
pub trait KnowledgeStore: Send + Sync {
    /// Current loadout: player, companions and inventory.
    fn load_player(&self) -> Result<PlayerLoadout, StoreError>;

    /// Replace the stored loadout with the post-combat one.
    fn sync_player(&self, loadout: &PlayerLoadout) -> Result<(), StoreError>;
}
