#![allow(dead_code)]

use std::collections::HashMap;

use combat_core::{
    AutomaticAction, CombatSession, CombatState, Combatant, CombatantKind, CombatantTemplate,
    OpponentPolicy, OpponentRef, PlayerLoadout, ScriptedRolls,
};

/// Player with 100 HP, 50 MP, attack 10, speed 10 and no defense.
pub fn hero() -> CombatantTemplate {
    CombatantTemplate::new("Hero", CombatantKind::Player, 100, 50).with_stats(10, 0, 10)
}

pub fn foe(name: &str, hp: u32, attack: i32, defense: i32, speed: i32) -> CombatantTemplate {
    CombatantTemplate::new(name, CombatantKind::Npc, hp, 0).with_stats(attack, defense, speed)
}

pub fn roster(entries: &[(&str, CombatantTemplate)]) -> HashMap<String, CombatantTemplate> {
    entries
        .iter()
        .map(|(key, template)| (key.to_string(), template.clone()))
        .collect()
}

pub fn refs(keys: &[&str]) -> Vec<OpponentRef> {
    keys.iter().map(|k| OpponentRef::from(*k)).collect()
}

/// Opponents that never act.
pub struct PassivePolicy;

impl OpponentPolicy for PassivePolicy {
    fn choose(&self, _actor: &Combatant, _state: &CombatState) -> AutomaticAction {
        AutomaticAction::Pass
    }
}

pub fn session(rolls: ScriptedRolls) -> CombatSession {
    CombatSession::builder().rolls(rolls).build()
}

pub fn passive_session(rolls: ScriptedRolls) -> CombatSession {
    CombatSession::builder()
        .rolls(rolls)
        .policy(PassivePolicy)
        .build()
}

/// Start `session` against a single opponent keyed `"foe"`.
pub fn start_against(
    session: &mut CombatSession,
    loadout: PlayerLoadout,
    opponent: CombatantTemplate,
) {
    let roster = roster(&[("foe", opponent)]);
    session
        .start(loadout, &refs(&["foe"]), &roster)
        .expect("encounter starts");
}
