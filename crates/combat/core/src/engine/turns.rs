//! Turn order and the per-turn lifecycle.

use super::policy::AutomaticAction;
use super::{AutomaticStep, CombatSession, TurnError};
use crate::action::{CombatAction, resolve};
use crate::state::{CombatLogEntry, Combatant, CombatantId, Epoch};
use crate::stats::StatKey;

/// Rule for ordering combatants with equal effective speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Ties favour the combatant that joined combat first. The player joins
    /// first, so it beats an equally fast opponent.
    #[default]
    JoinedFirst,
}

impl TieBreak {
    fn key(self, combatant: &Combatant) -> (std::cmp::Reverse<i32>, usize) {
        match self {
            TieBreak::JoinedFirst => (
                std::cmp::Reverse(combatant.stats.effective(StatKey::Speed)),
                combatant.join_index,
            ),
        }
    }
}

/// Turn order by effective speed, descending, ties broken by `rule`.
///
/// Computed once when the encounter starts.
pub fn compute_turn_order(combatants: &[Combatant], rule: TieBreak) -> Vec<CombatantId> {
    let mut ordered: Vec<&Combatant> = combatants.iter().collect();
    ordered.sort_by_key(|c| rule.key(c));
    ordered.into_iter().map(|c| c.id).collect()
}

/// Turn lifecycle methods for CombatSession.
impl CombatSession {
    /// Start of the current actor's turn: new turn serial, cooldowns tick.
    pub(super) fn begin_turn(&mut self) {
        self.state.turn_serial += 1;
        let Some(id) = self.state.current_actor_id() else {
            return;
        };
        if let Some(actor) = self.state.combatant_mut(id) {
            for skill in &mut actor.skills {
                skill.tick_cooldown();
            }
        }
    }

    /// End of the current actor's turn: its effects tick, then the pointer
    /// moves to the next living combatant and that turn begins.
    pub(super) fn end_turn(&mut self) {
        let serial = self.state.turn_serial;
        if let Some(actor) = self
            .state
            .current_actor_id()
            .and_then(|id| self.state.combatant_mut(id))
        {
            actor.stats.tick_effects(serial);
        }

        if !self.phase.is_active() {
            return;
        }
        self.advance_pointer();
        self.begin_turn();
    }

    /// Point at the first living entry of the turn order. Companions can
    /// join already down and must not hold the opening turn.
    pub(super) fn seek_first_living(&mut self) {
        let first_living = self
            .state
            .turn_order
            .iter()
            .position(|id| self.state.combatant(*id).is_some_and(Combatant::is_alive));
        if let Some(index) = first_living {
            self.state.current_turn_index = index;
        }
    }

    /// Move to the next living combatant, rolling the round over after the
    /// last turn-order entry.
    fn advance_pointer(&mut self) {
        let len = self.state.turn_order.len();
        for _ in 0..len {
            self.state.current_turn_index += 1;
            if self.state.current_turn_index >= len {
                self.state.current_turn_index = 0;
                self.state.round_number += 1;
                self.refresh_menu();
                let message = format!("Round {} begins.", self.state.round_number);
                self.state.log.push(CombatLogEntry::info(message));
            }
            if self.state.current_actor().is_some_and(Combatant::is_alive) {
                return;
            }
        }
    }

    /// The automatic turn due next, with the epoch it must be stepped under.
    pub fn pending_automatic_turn(&self) -> Option<(Epoch, CombatantId)> {
        if !self.phase.is_active() {
            return None;
        }
        let actor = self.state.current_actor()?;
        if actor.is_player || !actor.is_alive() {
            return None;
        }
        Some((self.epoch, actor.id))
    }

    /// Run exactly one non-player turn.
    ///
    /// `epoch` must match the session's current epoch; continuations scheduled
    /// before an abandon or restart are rejected without touching state.
    pub fn step_automatic(&mut self, epoch: Epoch) -> Result<AutomaticStep, TurnError> {
        if epoch != self.epoch {
            return Err(TurnError::StaleEpoch {
                expected: self.epoch,
                provided: epoch,
            });
        }
        if !self.phase.is_active() {
            return Err(TurnError::NotActive);
        }
        let actor_id = self.state.current_actor_id().ok_or(TurnError::NotActive)?;
        if actor_id.is_player() {
            return Err(TurnError::PlayerTurn);
        }

        let choice = match self.state.combatant(actor_id) {
            Some(actor) => self.policy.choose(actor, &self.state),
            None => AutomaticAction::Pass,
        };
        let target = match choice {
            AutomaticAction::BasicAttack { target } => self
                .state
                .combatant(target)
                .filter(|t| t.is_alive())
                .map(|t| t.id),
            AutomaticAction::Pass => None,
        };

        let outcome = match target {
            Some(target_id) => {
                self.begin_action(actor_id);
                let outcome = match (
                    self.state.combatant(actor_id),
                    self.state.combatant(target_id),
                ) {
                    (Some(actor), Some(target)) => Some(resolve(
                        actor,
                        target,
                        CombatAction::BasicAttack,
                        &self.tables,
                        &mut *self.rolls,
                    )),
                    _ => None,
                };
                if let Some(outcome) = &outcome {
                    self.apply_outcome(actor_id, target_id, "attack", outcome, true);
                }
                outcome
            }
            None => {
                if let Some(actor) = self.state.combatant(actor_id) {
                    let message = format!("{} waits.", actor.name);
                    self.state.log.push(CombatLogEntry::info(message));
                }
                None
            }
        };

        self.end_turn();

        Ok(AutomaticStep {
            actor: actor_id,
            target,
            outcome,
            phase: self.phase,
        })
    }

    /// Step automatic turns until the player's turn or the end of the
    /// encounter. With the player down, stops after one full pass over the
    /// turn order.
    pub fn run_automatic_turns(&mut self) -> Vec<AutomaticStep> {
        let mut steps = Vec::new();
        let budget = if self.state.player().is_some_and(Combatant::is_alive) {
            usize::MAX
        } else {
            self.state.turn_order.len()
        };

        while steps.len() < budget {
            let Some((epoch, _)) = self.pending_automatic_turn() else {
                break;
            };
            match self.step_automatic(epoch) {
                Ok(step) => steps.push(step),
                Err(_) => break,
            }
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatTables;
    use crate::state::{CombatantKind, CombatantTemplate};

    fn combatant(id: u32, kind: CombatantKind, speed: i32) -> Combatant {
        let template = CombatantTemplate::new(format!("C{id}"), kind, 10, 0).with_stats(1, 0, speed);
        Combatant::from_template(
            CombatantId(id),
            id as usize,
            &template,
            None,
            &CombatTables::default(),
        )
    }

    #[test]
    fn faster_combatants_act_first() {
        let combatants = [
            combatant(0, CombatantKind::Player, 10),
            combatant(1, CombatantKind::Npc, 15),
            combatant(2, CombatantKind::Beast, 5),
        ];
        assert_eq!(
            compute_turn_order(&combatants, TieBreak::JoinedFirst),
            vec![CombatantId(1), CombatantId(0), CombatantId(2)]
        );
    }

    #[test]
    fn ties_favour_first_joined() {
        let combatants = [
            combatant(0, CombatantKind::Player, 10),
            combatant(1, CombatantKind::Companion, 10),
            combatant(2, CombatantKind::Npc, 10),
            combatant(3, CombatantKind::Npc, 10),
        ];
        assert_eq!(
            compute_turn_order(&combatants, TieBreak::JoinedFirst),
            vec![CombatantId(0), CombatantId(1), CombatantId(2), CombatantId(3)]
        );
    }
}
