use crate::state::{Skill, StatusEffect};

/// The action being resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CombatAction<'a> {
    BasicAttack,
    Skill(&'a Skill),
}

impl CombatAction<'_> {
    /// Name used in descriptions and log entries.
    pub fn name(&self) -> &str {
        match self {
            CombatAction::BasicAttack => "attack",
            CombatAction::Skill(skill) => &skill.name,
        }
    }

    pub fn deals_damage(&self) -> bool {
        match self {
            CombatAction::BasicAttack => true,
            CombatAction::Skill(skill) => skill.deals_damage(),
        }
    }

    pub fn heals(&self) -> bool {
        match self {
            CombatAction::BasicAttack => false,
            CombatAction::Skill(skill) => skill.heals(),
        }
    }
}

/// Result of resolving one action. Produced, applied once, then dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub damage: u32,
    pub healing: u32,
    pub did_crit: bool,
    pub did_evade: bool,
    pub description: String,
    pub status_effects_to_apply: Vec<StatusEffect>,
}

impl ActionOutcome {
    pub fn evaded(description: String) -> Self {
        Self {
            did_evade: true,
            description,
            ..Self::default()
        }
    }
}
