//! Scripted stand-in for a human player.

use async_trait::async_trait;
use combat_core::{
    CombatantId, CombatantSnapshot, Disposition, ItemEffect, PlayerAction, TargetType,
};
use runtime::{ActionProvider, EncounterView};

/// Picks actions with a fixed priority:
///
/// 1. drink a healing consumable below the HP threshold
/// 2. use the strongest ready, affordable damaging skill
/// 3. attack the weakest living opponent
///
/// Surrenders when nothing applies. Defeated opponents are captured when
/// `capture` is set.
#[derive(Clone, Debug)]
pub struct ScriptedPlayer {
    /// Percent of max HP under which healing takes priority.
    pub heal_below_percent: u32,
    pub capture: bool,
}

impl Default for ScriptedPlayer {
    fn default() -> Self {
        Self {
            heal_below_percent: 35,
            capture: false,
        }
    }
}

impl ScriptedPlayer {
    /// Choose an action for the player's turn.
    pub fn choose(&self, view: &EncounterView) -> PlayerAction {
        let Some(player) = view.state.player() else {
            return PlayerAction::Surrender;
        };
        let Some(target) = weakest_opponent(view) else {
            return PlayerAction::Surrender;
        };

        let wounded = player.stats.hp * 100 < player.stats.max_hp * self.heal_below_percent;
        if wounded {
            let potion = view.state.inventory.items.iter().find(|item| {
                item.quantity > 0
                    && item
                        .effects
                        .iter()
                        .any(|effect| matches!(effect, ItemEffect::RestoreHp(_)))
            });
            if let Some(item) = potion {
                return PlayerAction::UseItem {
                    item_id: item.id.clone(),
                    target: CombatantId::PLAYER,
                };
            }
        }

        // The menu is rebuilt once per round, so readiness is read from the
        // live combatant instead.
        let skill = player
            .skills
            .iter()
            .filter(|skill| skill.is_ready() && skill.mana_cost <= player.stats.mp)
            .filter(|skill| skill.deals_damage() && skill.target_type == TargetType::Enemy)
            .max_by_key(|skill| skill.base_damage);
        if let Some(skill) = skill {
            return PlayerAction::UseSkill {
                skill_id: skill.id.clone(),
                target,
            };
        }

        PlayerAction::Attack { target }
    }
}

fn weakest_opponent(view: &EncounterView) -> Option<CombatantId> {
    view.state
        .living_opponents()
        .min_by_key(|c| (c.stats.hp, c.id))
        .map(|c| c.id)
}

#[async_trait]
impl ActionProvider for ScriptedPlayer {
    async fn provide_action(&self, view: &EncounterView) -> runtime::Result<PlayerAction> {
        Ok(self.choose(view))
    }

    async fn choose_disposition(&self, _opponent: &CombatantSnapshot) -> Option<Disposition> {
        self.capture.then_some(Disposition::Capture)
    }
}
