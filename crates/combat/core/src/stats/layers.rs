use strum::IntoEnumIterator;

use super::block::{StatBlock, StatKey};
use super::modifier::ModifierStack;
use crate::state::StatusEffect;

/// One stat split into its three layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBreakdown {
    pub base: i32,
    pub equipment: i32,
    pub status: i32,
}

impl StatBreakdown {
    /// Base plus equipment, the value percentage modifiers scale.
    pub fn adjusted(&self) -> i32 {
        self.base.saturating_add(self.equipment)
    }

    pub fn total(&self) -> i32 {
        self.adjusted().saturating_add(self.status)
    }
}

/// Layer a single stat: base → equipment → status effects.
pub fn layer_stat(
    base: &StatBlock,
    equipment: &StatBlock,
    effects: &[StatusEffect],
    key: StatKey,
) -> StatBreakdown {
    let base_value = base.get(key);
    let equipment_value = equipment.get(key);
    let adjusted = base_value.saturating_add(equipment_value);

    let stack: ModifierStack = effects.iter().filter_map(|e| e.modifier(key)).collect();

    StatBreakdown {
        base: base_value,
        equipment: equipment_value,
        status: stack.contribution(adjusted),
    }
}

/// Layer every stat at once.
pub fn effective_block(
    base: &StatBlock,
    equipment: &StatBlock,
    effects: &[StatusEffect],
) -> StatBlock {
    let mut block = StatBlock::ZERO;
    for key in StatKey::iter() {
        block.set(key, layer_stat(base, equipment, effects, key).total());
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EffectKind, StatusEffect};
    use crate::stats::Modifier;

    fn effect(key: StatKey, modifier: Modifier) -> StatusEffect {
        StatusEffect::single("test", "Test", EffectKind::Buff, 3, key, modifier, "unit")
    }

    #[test]
    fn layers_are_reported_separately() {
        let base = StatBlock::ZERO.with(StatKey::Attack, 20);
        let equipment = StatBlock::ZERO.with(StatKey::Attack, 10);
        let effects = [
            effect(StatKey::Attack, Modifier::Percent(10)),
            effect(StatKey::Attack, Modifier::Relative(2)),
            effect(StatKey::Defense, Modifier::Flat(99)),
        ];

        let breakdown = layer_stat(&base, &equipment, &effects, StatKey::Attack);
        assert_eq!(breakdown.base, 20);
        assert_eq!(breakdown.equipment, 10);
        // 10% of 30 (equipment-adjusted) + 2
        assert_eq!(breakdown.status, 5);
        assert_eq!(breakdown.total(), 35);
    }

    #[test]
    fn effective_block_layers_every_key() {
        let base = StatBlock {
            attack: 10,
            defense: 4,
            speed: 8,
            accuracy: 0,
            evasion: 2,
            crit_chance: 5,
        };
        let equipment = StatBlock::ZERO.with(StatKey::Defense, 6);
        let effects = [effect(StatKey::Defense, Modifier::Percent(-50))];

        let block = effective_block(&base, &equipment, &effects);
        assert_eq!(block.attack, 10);
        assert_eq!(block.defense, 5);
        assert_eq!(block.crit_chance, 5);
    }
}
