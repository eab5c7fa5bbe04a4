//! Status effect resolution.
//!
//! Turns the [`EffectGrant`]s declared on skills and consumables into concrete
//! [`StatusEffect`]s. Grants with a chance below 100 draw one percent roll
//! each; certain grants draw nothing.

use crate::action::RollSource;
use crate::config::CombatTables;
use crate::state::{ConsumableItem, EffectGrant, EffectKind, ItemEffect, Skill, StatusEffect};
use crate::stats::Modifier;

/// Display name of a single-stat effect, e.g. `Attack +5` or `Defense -10%`.
pub fn effect_name(grant: &EffectGrant) -> String {
    let amount = grant.amount.amount();
    let suffix = if grant.amount.is_percent() { "%" } else { "" };
    format!("{} {amount:+}{suffix}", grant.stat.label())
}

/// Build the effect a grant produces, ignoring its chance.
pub fn build_effect(grant: &EffectGrant, kind: EffectKind, source: &str) -> StatusEffect {
    StatusEffect::single(
        format!("{}:{}", slug(source), grant.stat),
        effect_name(grant),
        kind,
        grant.duration_turns,
        grant.stat,
        grant.amount,
        source,
    )
}

/// Roll a grant's chance and build the effect on success.
pub fn roll_grant(
    grant: &EffectGrant,
    kind: EffectKind,
    source: &str,
    tables: &CombatTables,
    rolls: &mut (impl RollSource + ?Sized),
) -> Option<StatusEffect> {
    let chance = grant.chance_percent.unwrap_or(tables.effects.default_chance);
    if chance < 100 && rolls.percent() >= chance as f64 {
        return None;
    }
    Some(build_effect(grant, kind, source))
}

/// Effects a skill lands on its target: buffs first, then debuffs.
pub fn skill_effects(
    skill: &Skill,
    tables: &CombatTables,
    rolls: &mut (impl RollSource + ?Sized),
) -> Vec<StatusEffect> {
    let buffs = skill
        .buffs_applied
        .iter()
        .map(|grant| (grant, EffectKind::Buff));
    let debuffs = skill
        .debuffs_applied
        .iter()
        .map(|grant| (grant, EffectKind::Debuff));

    buffs
        .chain(debuffs)
        .filter_map(|(grant, kind)| roll_grant(grant, kind, &skill.name, tables, rolls))
        .collect()
}

/// Kind implied by a modifier's sign.
pub fn kind_for_modifier(modifier: &Modifier) -> EffectKind {
    EffectKind::from_modifier(modifier)
}

/// What using a consumable does to its target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemResolution {
    pub restore_hp: u32,
    pub restore_mp: u32,
    pub effects: Vec<StatusEffect>,
}

/// Resolve every structured effect of a consumable.
pub fn resolve_item(
    item: &ConsumableItem,
    tables: &CombatTables,
    rolls: &mut (impl RollSource + ?Sized),
) -> ItemResolution {
    let mut resolution = ItemResolution::default();
    for effect in &item.effects {
        match effect {
            ItemEffect::RestoreHp(amount) => {
                resolution.restore_hp = resolution.restore_hp.saturating_add(*amount);
            }
            ItemEffect::RestoreMp(amount) => {
                resolution.restore_mp = resolution.restore_mp.saturating_add(*amount);
            }
            ItemEffect::Grant(grant) => {
                let kind = kind_for_modifier(&grant.amount);
                if let Some(status) = roll_grant(grant, kind, &item.name, tables, rolls) {
                    resolution.effects.push(status);
                }
            }
        }
    }
    resolution
}

fn slug(source: &str) -> String {
    source
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ScriptedRolls;
    use crate::stats::StatKey;

    #[test]
    fn effect_names_show_signed_amounts() {
        let buff = EffectGrant::new(StatKey::Attack, Modifier::Flat(5), 3);
        let debuff = EffectGrant::new(StatKey::Defense, Modifier::Percent(-10), 2);
        let relative = EffectGrant::new(StatKey::Speed, Modifier::Relative(4), 2);
        assert_eq!(effect_name(&buff), "Attack +5");
        assert_eq!(effect_name(&debuff), "Defense -10%");
        assert_eq!(effect_name(&relative), "Speed +4");
    }

    #[test]
    fn chance_roll_gates_application() {
        let tables = CombatTables::default();
        let grant = EffectGrant::new(StatKey::Defense, Modifier::Flat(-5), 2).with_chance(30);
        let mut rolls = ScriptedRolls::new().with_percents([29.0, 30.0]);

        let landed = roll_grant(&grant, EffectKind::Debuff, "Sunder", &tables, &mut rolls);
        let missed = roll_grant(&grant, EffectKind::Debuff, "Sunder", &tables, &mut rolls);

        let landed = landed.unwrap();
        assert_eq!(landed.id, "sunder:defense");
        assert_eq!(landed.kind, EffectKind::Debuff);
        assert_eq!(landed.modifier(StatKey::Defense), Some(Modifier::Flat(-5)));
        assert!(missed.is_none());
    }

    #[test]
    fn certain_grants_draw_nothing() {
        let tables = CombatTables::default();
        let skill = Skill {
            buffs_applied: vec![EffectGrant::new(StatKey::Attack, Modifier::Flat(5), 3)],
            debuffs_applied: vec![EffectGrant::new(StatKey::Speed, Modifier::Flat(-2), 1)],
            ..Skill::new("war_cry", "War Cry")
        };
        let mut rolls = ScriptedRolls::new();

        let effects = skill_effects(&skill, &tables, &mut rolls);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].kind, EffectKind::Buff);
        assert_eq!(effects[1].kind, EffectKind::Debuff);
        assert_eq!(effects[0].source, "War Cry");
        assert_eq!(rolls.percents_drawn(), 0);
    }

    #[test]
    fn items_resolve_structured_effects() {
        let tables = CombatTables::default();
        let item = ConsumableItem::new("elixir", "Elixir", 1)
            .with_effect(ItemEffect::RestoreHp(50))
            .with_effect(ItemEffect::RestoreMp(10))
            .with_effect(ItemEffect::Grant(EffectGrant::new(
                StatKey::Evasion,
                Modifier::Percent(-20),
                2,
            )));
        let mut rolls = ScriptedRolls::new();

        let resolution = resolve_item(&item, &tables, &mut rolls);
        assert_eq!(resolution.restore_hp, 50);
        assert_eq!(resolution.restore_mp, 10);
        assert_eq!(resolution.effects.len(), 1);
        assert_eq!(resolution.effects[0].kind, EffectKind::Debuff);
        assert_eq!(resolution.effects[0].name, "Evasion -20%");
    }
}
