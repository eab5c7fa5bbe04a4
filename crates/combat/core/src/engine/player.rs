//! Player action handling: validate, resolve, apply.

use super::{
    ActionError, ActionReport, CombatSession, InvalidReference, PlayerAction, PreconditionFailure,
};
use crate::action::{ActionOutcome, CombatAction, resolve};
use crate::combat::{check_flee, flee_chance};
use crate::effects;
use crate::state::{
    CombatLogEntry, CombatState, Combatant, CombatantId, EncounterOutcome, LogKind, TargetType,
};
use crate::stats::StatKey;

impl CombatSession {
    /// Perform a player action.
    ///
    /// Rejected actions leave the state untouched and do not consume the turn.
    /// A failed mana or cooldown check additionally records an informational
    /// log entry. Successful actions end the player's turn; the automatic
    /// turns that follow are driven by the caller.
    pub fn act(&mut self, action: PlayerAction) -> Result<ActionReport, ActionError> {
        if !self.phase.is_active() {
            return Err(ActionError::NotActive);
        }
        let current = self
            .state
            .current_actor_id()
            .ok_or(ActionError::NotActive)?;
        if !current.is_player() {
            return Err(ActionError::NotPlayerTurn { current });
        }

        match action {
            PlayerAction::Attack { target } => self.player_attack(target),
            PlayerAction::UseSkill { skill_id, target } => self.player_skill(&skill_id, target),
            PlayerAction::UseItem { item_id, target } => self.player_item(&item_id, target),
            PlayerAction::Flee => Ok(self.player_flee()),
            PlayerAction::Surrender => Ok(self.player_surrender()),
        }
    }

    fn player_attack(&mut self, target_id: CombatantId) -> Result<ActionReport, ActionError> {
        let (player, target) = player_and_target(&self.state, target_id)?;
        if !player.is_hostile_to(target) {
            return Err(InvalidReference::WrongTargetType {
                action: "attack".to_string(),
                target: target_id,
            }
            .into());
        }

        self.begin_action(CombatantId::PLAYER);
        let (player, target) = player_and_target(&self.state, target_id)?;
        let outcome = resolve(
            player,
            target,
            CombatAction::BasicAttack,
            &self.tables,
            &mut *self.rolls,
        );
        self.apply_outcome(CombatantId::PLAYER, target_id, "attack", &outcome, true);
        Ok(self.finish_turn(Some(outcome)))
    }

    fn player_skill(
        &mut self,
        skill_id: &str,
        target_id: CombatantId,
    ) -> Result<ActionReport, ActionError> {
        let (player, target) = player_and_target(&self.state, target_id)?;
        let skill = player
            .skill(skill_id)
            .cloned()
            .ok_or_else(|| InvalidReference::UnknownSkill(skill_id.to_string()))?;

        let hostile = player.is_hostile_to(target);
        let target_ok = match skill.target_type {
            TargetType::SelfOnly => target_id == player.id,
            TargetType::Ally => !hostile,
            TargetType::Enemy => hostile,
        };
        if !target_ok {
            return Err(InvalidReference::WrongTargetType {
                action: skill.name.clone(),
                target: target_id,
            }
            .into());
        }

        let failure = if !skill.is_ready() {
            Some(PreconditionFailure::OnCooldown {
                skill_id: skill.id.clone(),
                remaining: skill.current_cooldown,
            })
        } else if player.stats.mp < skill.mana_cost {
            Some(PreconditionFailure::InsufficientMana {
                skill_id: skill.id.clone(),
                required: skill.mana_cost,
                available: player.stats.mp,
            })
        } else {
            None
        };
        if let Some(failure) = failure {
            let message = match &failure {
                PreconditionFailure::OnCooldown { remaining, .. } => format!(
                    "{} cannot use {}: on cooldown for {remaining} more turn(s).",
                    player.name, skill.name
                ),
                PreconditionFailure::InsufficientMana {
                    required,
                    available,
                    ..
                } => format!(
                    "{} cannot use {}: needs {required} MP, has {available}.",
                    player.name, skill.name
                ),
            };
            self.state.log.push(CombatLogEntry::info(message));
            return Err(failure.into());
        }

        if let Some(player) = self.state.combatant_mut(CombatantId::PLAYER) {
            player.stats.spend_mp(skill.mana_cost);
            if let Some(live) = player.skill_mut(skill_id) {
                live.start_cooldown();
            }
        }

        self.begin_action(CombatantId::PLAYER);
        let (player, target) = player_and_target(&self.state, target_id)?;
        let outcome = resolve(
            player,
            target,
            CombatAction::Skill(&skill),
            &self.tables,
            &mut *self.rolls,
        );
        self.apply_outcome(
            CombatantId::PLAYER,
            target_id,
            &skill.name,
            &outcome,
            hostile,
        );
        Ok(self.finish_turn(Some(outcome)))
    }

    fn player_item(
        &mut self,
        item_id: &str,
        target_id: CombatantId,
    ) -> Result<ActionReport, ActionError> {
        let item = self
            .state
            .inventory
            .get(item_id)
            .cloned()
            .ok_or_else(|| InvalidReference::UnknownItem(item_id.to_string()))?;
        let (player, target) = player_and_target(&self.state, target_id)?;
        if player.is_hostile_to(target) {
            return Err(InvalidReference::WrongTargetType {
                action: item.name.clone(),
                target: target_id,
            }
            .into());
        }

        self.begin_action(CombatantId::PLAYER);
        let resolution = effects::resolve_item(&item, &self.tables, &mut *self.rolls);
        self.state.inventory.consume(item_id);
        self.apply_item(CombatantId::PLAYER, target_id, &item.name, resolution);
        Ok(self.finish_turn(None))
    }

    fn player_flee(&mut self) -> ActionReport {
        let player_speed = self
            .state
            .player()
            .map_or(0, |p| p.stats.effective(StatKey::Speed));
        let fastest = self
            .state
            .living_opponents()
            .map(|o| o.stats.effective(StatKey::Speed))
            .max()
            .unwrap_or(player_speed);
        let chance = flee_chance(
            player_speed,
            fastest,
            self.state.flee_attempts,
            &self.tables,
        );

        self.begin_action(CombatantId::PLAYER);
        let escaped = check_flee(chance, self.rolls.percent());
        let name = self.player_name();

        if escaped {
            let message = format!("{name} escaped from combat.");
            self.state.notable_events.push(message.clone());
            self.push_player_entry("flee", message);
            self.end_encounter(EncounterOutcome::Escaped);
            return self.finish_turn(None);
        }

        self.state.flee_attempts += 1;
        let message = format!(
            "{name} failed to flee (attempt {}, {chance}% chance).",
            self.state.flee_attempts
        );
        self.state.notable_events.push(message.clone());
        self.push_player_entry("flee", message);
        self.finish_turn(None)
    }

    fn player_surrender(&mut self) -> ActionReport {
        let message = format!("{} surrendered.", self.player_name());
        self.state.notable_events.push(message.clone());
        self.push_player_entry("surrender", message);
        self.end_encounter(EncounterOutcome::Surrendered);
        self.finish_turn(None)
    }

    /// End the player's turn if the encounter is still running.
    fn finish_turn(&mut self, outcome: Option<ActionOutcome>) -> ActionReport {
        if self.phase.is_active() {
            self.end_turn();
        }
        ActionReport {
            outcome,
            turn_consumed: true,
            phase: self.phase,
        }
    }

    fn player_name(&self) -> String {
        self.state
            .player()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn push_player_entry(&mut self, action_name: &str, message: String) {
        let entry = CombatLogEntry {
            kind: LogKind::Action,
            actor_id: Some(CombatantId::PLAYER),
            actor_name: Some(self.player_name()),
            action_name: Some(action_name.to_string()),
            ..CombatLogEntry::info(message)
        };
        self.state.log.push(entry);
    }
}

fn player_and_target(
    state: &CombatState,
    target_id: CombatantId,
) -> Result<(&Combatant, &Combatant), InvalidReference> {
    let player = state
        .player()
        .ok_or(InvalidReference::UnknownTarget(CombatantId::PLAYER))?;
    let target = state
        .combatant(target_id)
        .ok_or(InvalidReference::UnknownTarget(target_id))?;
    if !target.is_alive() {
        return Err(InvalidReference::TargetDown(target_id));
    }
    Ok((player, target))
}
