use combat_core::{ActionOption, CombatState, Combatant, CombatantId, Epoch, Phase};
use serde::{Deserialize, Serialize};

/// Read-only copy of the session taken by the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterView {
    pub epoch: Epoch,
    pub phase: Phase,
    pub state: CombatState,
}

impl EncounterView {
    pub fn is_player_turn(&self) -> bool {
        self.phase.is_active() && self.state.current_actor_id() == Some(CombatantId::PLAYER)
    }

    pub fn current_actor(&self) -> Option<&Combatant> {
        if self.phase == Phase::Idle {
            return None;
        }
        self.state.current_actor()
    }

    pub fn menu(&self) -> &[ActionOption] {
        &self.state.action_menu
    }
}
