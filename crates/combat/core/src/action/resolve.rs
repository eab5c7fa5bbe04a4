use super::describe::{describe_evade, describe_hit};
use super::outcome::{ActionOutcome, CombatAction};
use super::rolls::RollSource;
use crate::combat::{
    basic_attack_damage, calculate_damage, check_hit, crit_multiplier, is_crit, skill_base_damage,
    skill_healing,
};
use crate::config::CombatTables;
use crate::effects;
use crate::state::Combatant;

/// Resolve one action of `attacker` against `target`.
///
/// # Draw order
///
/// 1. Hit roll, only when the target is hostile to the attacker
/// 2. Crit roll and variance, only when the action deals damage
/// 3. One roll per status grant with a chance below 100
///
/// An evaded action computes nothing else. Mana and cooldown are checked by the
/// caller before this is reached.
pub fn resolve(
    attacker: &Combatant,
    target: &Combatant,
    action: CombatAction<'_>,
    tables: &CombatTables,
    rolls: &mut (impl RollSource + ?Sized),
) -> ActionOutcome {
    let attacker_stats = attacker.stats.effective_block();
    let target_stats = target.stats.effective_block();

    if attacker.is_hostile_to(target) {
        let roll = rolls.percent();
        if !check_hit(attacker_stats.accuracy, target_stats.evasion, roll, tables) {
            return ActionOutcome::evaded(describe_evade(&attacker.name, &target.name, &action));
        }
    }

    let mut damage = 0;
    let mut did_crit = false;
    if action.deals_damage() {
        did_crit = is_crit(attacker_stats.crit_chance, rolls.percent());
        let raw = match action {
            CombatAction::BasicAttack => basic_attack_damage(attacker_stats.attack),
            CombatAction::Skill(skill) => skill_base_damage(
                skill.base_damage,
                attacker_stats.attack,
                skill.damage_multiplier,
            ),
        };
        let variance = rolls.variance(tables.damage.variance_min, tables.damage.variance_max);
        damage = calculate_damage(
            raw,
            crit_multiplier(attacker.stats.crit_multiplier, did_crit),
            target_stats.defense,
            variance,
            tables,
        );
    }

    let (healing, status_effects_to_apply) = match action {
        CombatAction::BasicAttack => (0, Vec::new()),
        CombatAction::Skill(skill) => {
            let healing = if skill.heals() {
                skill_healing(
                    skill.healing_amount,
                    attacker_stats.attack,
                    skill.healing_multiplier,
                )
            } else {
                0
            };
            (healing, effects::skill_effects(skill, tables, rolls))
        }
    };

    let description = describe_hit(
        &attacker.name,
        &target.name,
        &action,
        attacker.id == target.id,
        damage,
        healing,
        did_crit,
        &status_effects_to_apply,
    );

    ActionOutcome {
        damage,
        healing,
        did_crit,
        did_evade: false,
        description,
        status_effects_to_apply,
    }
}
