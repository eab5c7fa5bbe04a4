//! Event types for different topics.

use combat_core::{
    CombatEndPayload, CombatLogEntry, CombatantId, CombatantSnapshot, EncounterOutcome, Epoch,
};
use serde::{Deserialize, Serialize};

/// One combat log entry, in the order the session recorded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub epoch: Epoch,
    pub entry: CombatLogEntry,
}

/// A combatant's turn has begun (lightweight).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEvent {
    pub epoch: Epoch,
    pub round: u32,
    pub actor: CombatantId,
    pub actor_name: String,
    pub is_player: bool,
}

/// Encounter lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EncounterEvent {
    Started {
        epoch: Epoch,
        combatants: Vec<CombatantSnapshot>,
    },
    /// The session reached an end state; the payload is not built yet.
    Ended {
        epoch: Epoch,
        outcome: EncounterOutcome,
    },
    Finalized {
        payload: Box<CombatEndPayload>,
    },
    Abandoned {
        epoch: Epoch,
    },
}
