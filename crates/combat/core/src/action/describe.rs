//! Human-readable outcome descriptions.

use super::outcome::CombatAction;
use crate::state::StatusEffect;

/// Description of an action that landed.
///
/// Built as: crit marker, verb clause, damage clause, healing clause,
/// effect-names clause.
#[allow(clippy::too_many_arguments)]
pub fn describe_hit(
    attacker: &str,
    target: &str,
    action: &CombatAction<'_>,
    self_targeted: bool,
    damage: u32,
    healing: u32,
    did_crit: bool,
    effects: &[StatusEffect],
) -> String {
    let mut text = String::new();
    if did_crit {
        text.push_str("[CRIT] ");
    }

    match action {
        CombatAction::BasicAttack => text.push_str(&format!("{attacker} attacks {target}")),
        CombatAction::Skill(skill) if self_targeted => {
            text.push_str(&format!("{attacker} uses {}", skill.name))
        }
        CombatAction::Skill(skill) => {
            text.push_str(&format!("{attacker} uses {} on {target}", skill.name))
        }
    }

    if damage > 0 {
        text.push_str(&format!(", dealing {damage} damage"));
    }
    if healing > 0 {
        text.push_str(&format!(", restoring {healing} HP"));
    }
    if !effects.is_empty() {
        let names: Vec<&str> = effects.iter().map(|e| e.name.as_str()).collect();
        text.push_str(&format!(", applying {}", names.join(", ")));
    }
    text.push('.');
    text
}

/// Description of a consumable being used.
pub fn describe_item(
    user: &str,
    target: &str,
    item: &str,
    self_targeted: bool,
    restored_hp: u32,
    restored_mp: u32,
    effects: &[StatusEffect],
) -> String {
    let mut text = if self_targeted {
        format!("{user} uses {item}")
    } else {
        format!("{user} uses {item} on {target}")
    };
    if restored_hp > 0 {
        text.push_str(&format!(", restoring {restored_hp} HP"));
    }
    if restored_mp > 0 {
        text.push_str(&format!(", restoring {restored_mp} MP"));
    }
    if !effects.is_empty() {
        let names: Vec<&str> = effects.iter().map(|e| e.name.as_str()).collect();
        text.push_str(&format!(", applying {}", names.join(", ")));
    }
    text.push('.');
    text
}

/// Description of an action the target evaded.
pub fn describe_evade(attacker: &str, target: &str, action: &CombatAction<'_>) -> String {
    format!("{target} evades {attacker}'s {}.", action.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EffectKind, Skill};
    use crate::stats::{Modifier, StatKey};

    #[test]
    fn clauses_appear_in_order() {
        let skill = Skill::new("drain", "Drain");
        let effect = StatusEffect::single(
            "drain:defense",
            "Defense -5",
            EffectKind::Debuff,
            2,
            StatKey::Defense,
            Modifier::Flat(-5),
            "Drain",
        );
        let text = describe_hit(
            "Hero",
            "Goblin",
            &CombatAction::Skill(&skill),
            false,
            12,
            4,
            true,
            &[effect],
        );
        assert_eq!(
            text,
            "[CRIT] Hero uses Drain on Goblin, dealing 12 damage, restoring 4 HP, applying Defense -5."
        );
    }

    #[test]
    fn basic_attack_and_evade() {
        let text = describe_hit("Hero", "Goblin", &CombatAction::BasicAttack, false, 6, 0, false, &[]);
        assert_eq!(text, "Hero attacks Goblin, dealing 6 damage.");
        assert_eq!(
            describe_evade("Hero", "Goblin", &CombatAction::BasicAttack),
            "Goblin evades Hero's attack."
        );
    }

    #[test]
    fn item_description_lists_restored_resources() {
        assert_eq!(
            describe_item("Hero", "Hero", "Potion", true, 20, 0, &[]),
            "Hero uses Potion, restoring 20 HP."
        );
        assert_eq!(
            describe_item("Hero", "Lan", "Ether", false, 0, 15, &[]),
            "Hero uses Ether on Lan, restoring 15 MP."
        );
    }
}
