//! Dispositions and the end-of-encounter payload.

use std::collections::BTreeMap;

use super::{CombatSession, FinalizeError, Phase};
use crate::state::{
    CombatEndPayload, CombatantId, CombatantKind, Disposition, PlayerLoadout, Side,
};

impl CombatSession {
    /// Choose what happens to a defeated opponent.
    ///
    /// Only valid once the encounter has ended, and only for opponents at 0 HP.
    pub fn set_disposition(
        &mut self,
        id: CombatantId,
        disposition: Disposition,
    ) -> Result<(), FinalizeError> {
        if !matches!(self.phase, Phase::Ended(_)) {
            return Err(FinalizeError::NotEnded);
        }
        let combatant = self
            .state
            .combatant_mut(id)
            .filter(|c| c.side() == Side::Opponent && !c.is_alive())
            .ok_or(FinalizeError::NotDefeatedOpponent(id))?;
        combatant.disposition = Some(disposition);
        Ok(())
    }

    /// Build the end payload and return the session to `Idle`.
    ///
    /// Defeated opponents without an explicit disposition default to
    /// [`Disposition::Kill`].
    pub fn finalize(&mut self) -> Result<CombatEndPayload, FinalizeError> {
        let Phase::Ended(outcome) = self.phase else {
            return Err(FinalizeError::NotEnded);
        };

        for combatant in &mut self.state.combatants {
            if combatant.side() == Side::Opponent && !combatant.is_alive() {
                combatant.disposition.get_or_insert(Disposition::Kill);
            }
        }

        let player = self
            .state
            .player()
            .ok_or(FinalizeError::NotEnded)?;

        let dispositions: BTreeMap<CombatantId, Disposition> = self
            .state
            .opponents()
            .filter_map(|c| c.disposition.map(|d| (c.id, d)))
            .collect();

        let player_loadout = PlayerLoadout {
            player: player.to_template(),
            companions: self
                .state
                .combatants
                .iter()
                .filter(|c| c.kind == CombatantKind::Companion)
                .map(|c| c.to_template())
                .collect(),
            inventory: self.state.inventory.clone(),
        };

        let payload = CombatEndPayload {
            outcome,
            total_rounds: self.state.round_number,
            damage_dealt_by_player: self.state.player_damage_dealt,
            damage_taken_by_player: self.state.player_damage_taken,
            killing_blow_by: self.state.killing_blow_by,
            notable_events: self.state.notable_events.clone(),
            final_player_state: player.snapshot(),
            final_combatant_states: self.state.combatants.iter().map(|c| c.snapshot()).collect(),
            opponent_ids: self.state.opponents().map(|c| c.id).collect(),
            dispositions,
            player_loadout,
        };

        self.reset();
        Ok(payload)
    }
}
