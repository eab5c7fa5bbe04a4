use std::collections::BTreeMap;

use super::combatant::{CombatantSnapshot, Disposition, PlayerLoadout};
use super::common::CombatantId;

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EncounterOutcome {
    Victory,
    Defeat,
    Escaped,
    Surrendered,
}

/// Summary handed to the outside world when an encounter is finalized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEndPayload {
    pub outcome: EncounterOutcome,
    pub total_rounds: u32,
    pub damage_dealt_by_player: u64,
    pub damage_taken_by_player: u64,
    pub killing_blow_by: Option<CombatantId>,
    pub notable_events: Vec<String>,
    pub final_player_state: CombatantSnapshot,
    pub final_combatant_states: Vec<CombatantSnapshot>,
    pub opponent_ids: Vec<CombatantId>,
    /// One entry per defeated opponent.
    pub dispositions: BTreeMap<CombatantId, Disposition>,
    /// Player side as it left the encounter, for syncing back to the store.
    pub player_loadout: PlayerLoadout,
}

impl CombatEndPayload {
    pub fn disposition(&self, id: CombatantId) -> Option<Disposition> {
        self.dispositions.get(&id).copied()
    }
}
