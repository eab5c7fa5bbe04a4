//! Status effects (buffs and debuffs) carried by combatants.
//!
//! # Turn-based Duration
//!
//! `duration_turns > 0` counts down once at the end of each of the owner's
//! turns and the effect is removed when it reaches 0. `0` and `-1` mean
//! permanent. An effect never ticks on the turn it arrived.

use std::collections::BTreeMap;

use crate::stats::{Modifier, StatKey};

/// Classification used for display and for choosing a description verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectKind {
    Buff,
    Debuff,
    Neutral,
}

impl EffectKind {
    /// Kind implied by the sign of a modifier.
    pub const fn from_modifier(modifier: &Modifier) -> Self {
        match modifier.amount() {
            a if a > 0 => EffectKind::Buff,
            a if a < 0 => EffectKind::Debuff,
            _ => EffectKind::Neutral,
        }
    }
}

/// An active status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    pub kind: EffectKind,
    /// Remaining turns; `0` or negative means permanent.
    pub duration_turns: i32,
    pub stat_modifiers: BTreeMap<StatKey, Modifier>,
    /// Name of the skill or item that produced the effect.
    pub source: String,
    /// Turn serial on which the effect was attached.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applied_on_turn: u64,
}

impl StatusEffect {
    /// Effect modifying a single stat.
    pub fn single(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: EffectKind,
        duration_turns: i32,
        stat: StatKey,
        modifier: Modifier,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            duration_turns,
            stat_modifiers: BTreeMap::from([(stat, modifier)]),
            source: source.into(),
            applied_on_turn: 0,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.duration_turns <= 0
    }

    pub fn modifier(&self, stat: StatKey) -> Option<Modifier> {
        self.stat_modifiers.get(&stat).copied()
    }

    /// Count down one turn. Returns true when the effect has run out.
    pub(crate) fn tick(&mut self) -> bool {
        if self.is_permanent() {
            return false;
        }
        self.duration_turns -= 1;
        self.duration_turns == 0
    }
}

/// A buff or debuff a skill or item may attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectGrant {
    pub stat: StatKey,
    pub amount: Modifier,
    pub duration_turns: i32,
    /// Percent chance to apply; the balance table default (100) when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chance_percent: Option<u32>,
}

impl EffectGrant {
    pub fn new(stat: StatKey, amount: Modifier, duration_turns: i32) -> Self {
        Self {
            stat,
            amount,
            duration_turns,
            chance_percent: None,
        }
    }

    pub fn with_chance(mut self, chance_percent: u32) -> Self {
        self.chance_percent = Some(chance_percent);
        self
    }
}
