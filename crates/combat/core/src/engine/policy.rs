//! Behavior of combatants the player does not control.

use crate::state::{CombatState, Combatant, CombatantId};

/// What an automatic combatant does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomaticAction {
    BasicAttack { target: CombatantId },
    Pass,
}

/// Picks the action of an opponent or companion.
///
/// Policies only read state. A policy returning a target that is missing or
/// down is treated as [`AutomaticAction::Pass`].
pub trait OpponentPolicy: Send + Sync {
    fn choose(&self, actor: &Combatant, state: &CombatState) -> AutomaticAction;
}

/// Basic attack against the first living hostile combatant in turn order.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicAttackPolicy;

impl OpponentPolicy for BasicAttackPolicy {
    fn choose(&self, actor: &Combatant, state: &CombatState) -> AutomaticAction {
        state
            .in_turn_order()
            .find(|c| c.is_alive() && actor.is_hostile_to(c))
            .map_or(AutomaticAction::Pass, |target| AutomaticAction::BasicAttack {
                target: target.id,
            })
    }
}
