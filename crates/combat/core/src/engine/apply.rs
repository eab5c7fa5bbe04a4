//! Applying resolved outcomes to combat state.

use super::{CombatSession, Phase};
use crate::action::{ActionOutcome, describe_item};
use crate::effects::ItemResolution;
use crate::state::{CombatLogEntry, CombatantId, EffectKind, EncounterOutcome, LogKind, StatusEffect};

impl CombatSession {
    /// Apply an attack or skill outcome atomically.
    ///
    /// The log entry reports the HP actually restored, after the `max_hp` cap.
    ///
    /// Against a hostile target, healing and buffs go to the actor while
    /// damage and debuffs go to the target. Both ids must refer to existing
    /// combatants; nothing is touched otherwise.
    pub(super) fn apply_outcome(
        &mut self,
        actor_id: CombatantId,
        target_id: CombatantId,
        action_name: &str,
        outcome: &ActionOutcome,
        hostile: bool,
    ) {
        let Some(actor_name) = self.state.combatant(actor_id).map(|c| c.name.clone()) else {
            return;
        };
        let Some(target_name) = self.state.combatant(target_id).map(|c| c.name.clone()) else {
            return;
        };

        let serial = self.state.turn_serial;
        let (to_actor, to_target): (Vec<StatusEffect>, Vec<StatusEffect>) = outcome
            .status_effects_to_apply
            .iter()
            .cloned()
            .partition(|effect| hostile && effect.kind == EffectKind::Buff);

        let mut damage_dealt = 0;
        let mut healed = 0;
        let mut defeated = false;
        if let Some(target) = self.state.combatant_mut(target_id) {
            let was_alive = target.is_alive();
            damage_dealt = target.stats.take_damage(outcome.damage);
            defeated = was_alive && !target.is_alive();
            if !hostile {
                healed = target.stats.restore_hp(outcome.healing);
            }
            for effect in to_target {
                target.stats.add_effect(effect, serial);
            }
        }
        if let Some(actor) = self.state.combatant_mut(actor_id) {
            if hostile {
                healed = actor.stats.restore_hp(outcome.healing);
            }
            for effect in to_actor {
                actor.stats.add_effect(effect, serial);
            }
        }

        if actor_id.is_player() {
            self.state.player_damage_dealt += damage_dealt as u64;
        }
        if target_id.is_player() {
            self.state.player_damage_taken += damage_dealt as u64;
        }
        if outcome.did_crit {
            self.state
                .notable_events
                .push(format!("{actor_name} landed a critical hit on {target_name}."));
        }
        if defeated {
            self.state.killing_blow_by = Some(actor_id);
            self.state
                .notable_events
                .push(format!("{target_name} was defeated by {actor_name}."));
        }

        let (final_target_hp, max_target_hp) = self
            .state
            .combatant(target_id)
            .map(|t| (t.stats.hp, t.stats.max_hp))
            .unwrap_or_default();
        self.state.log.push(CombatLogEntry {
            kind: LogKind::Action,
            actor_id: Some(actor_id),
            actor_name: Some(actor_name),
            target_id: Some(target_id),
            target_name: Some(target_name),
            action_name: Some(action_name.to_string()),
            damage: Some(outcome.damage),
            healing: Some(healed),
            did_crit: Some(outcome.did_crit),
            did_evade: Some(outcome.did_evade),
            final_target_hp: Some(final_target_hp),
            max_target_hp: Some(max_target_hp),
            message: outcome.description.clone(),
        });

        self.check_end();
    }

    /// Apply a consumable's effects to `target_id`. Returns the HP restored.
    pub(super) fn apply_item(
        &mut self,
        actor_id: CombatantId,
        target_id: CombatantId,
        item_name: &str,
        resolution: ItemResolution,
    ) -> u32 {
        let actor_name = self
            .state
            .combatant(actor_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let serial = self.state.turn_serial;

        let Some(target) = self.state.combatant_mut(target_id) else {
            return 0;
        };
        let healed = target.stats.restore_hp(resolution.restore_hp);
        let restored_mp = target.stats.restore_mp(resolution.restore_mp);
        let message = describe_item(
            &actor_name,
            &target.name,
            item_name,
            actor_id == target_id,
            healed,
            restored_mp,
            &resolution.effects,
        );
        for effect in resolution.effects {
            target.stats.add_effect(effect, serial);
        }
        let entry = CombatLogEntry {
            kind: LogKind::Action,
            actor_id: Some(actor_id),
            actor_name: Some(actor_name),
            target_id: Some(target_id),
            target_name: Some(target.name.clone()),
            action_name: Some(item_name.to_string()),
            damage: Some(0),
            healing: Some(healed),
            did_crit: Some(false),
            did_evade: Some(false),
            final_target_hp: Some(target.stats.hp),
            max_target_hp: Some(target.stats.max_hp),
            message,
        };
        self.state.log.push(entry);
        healed
    }

    /// End the encounter with `outcome`.
    pub(super) fn end_encounter(&mut self, outcome: EncounterOutcome) {
        self.phase = Phase::Ended(outcome);
        let message = match outcome {
            EncounterOutcome::Victory => "Victory! All opponents are down.",
            EncounterOutcome::Defeat => "Defeat. The player's side has fallen.",
            EncounterOutcome::Escaped => "The player escaped.",
            EncounterOutcome::Surrendered => "The player surrendered.",
        };
        self.state.log.push(CombatLogEntry::info(message));
    }

    /// Victory is checked before defeat; at most one applies.
    pub(super) fn check_end(&mut self) {
        if !self.phase.is_active() {
            return;
        }
        if self.state.all_opponents_down() {
            self.end_encounter(EncounterOutcome::Victory);
        } else if self.state.all_player_side_down() {
            self.end_encounter(EncounterOutcome::Defeat);
        }
    }
}
