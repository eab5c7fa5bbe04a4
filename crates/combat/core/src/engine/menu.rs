use super::CombatSession;
use crate::state::{ActionOption, CombatState};

/// Player options for the coming round.
///
/// One attack entry per living opponent in join order, then skills, items,
/// flee and surrender.
pub fn build_menu(state: &CombatState) -> Vec<ActionOption> {
    let mut menu: Vec<ActionOption> = state
        .living_opponents()
        .map(|opponent| ActionOption::Attack {
            target: opponent.id,
            target_name: opponent.name.clone(),
        })
        .collect();

    if let Some(player) = state.player() {
        menu.extend(player.skills.iter().map(|skill| ActionOption::UseSkill {
            skill_id: skill.id.clone(),
            name: skill.name.clone(),
            ready: skill.is_ready(),
            affordable: player.stats.mp >= skill.mana_cost,
        }));
    }

    menu.extend(
        state
            .inventory
            .items
            .iter()
            .filter(|item| item.quantity > 0)
            .map(|item| ActionOption::UseItem {
                item_id: item.id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
            }),
    );

    menu.push(ActionOption::Flee);
    menu.push(ActionOption::Surrender);
    menu
}

impl CombatSession {
    pub(super) fn refresh_menu(&mut self) {
        self.state.action_menu = build_menu(&self.state);
    }
}
