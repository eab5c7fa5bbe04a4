use super::status::EffectGrant;

/// Who a skill may be aimed at, relative to its user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetType {
    /// Only the user itself.
    #[strum(to_string = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
    /// The user or anyone on its side.
    Ally,
    #[default]
    Enemy,
}

/// A learned skill together with its live cooldown.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub mana_cost: u32,
    /// Turns the skill stays unavailable after use.
    pub cooldown: u32,
    pub current_cooldown: u32,
    pub base_damage: u32,
    pub damage_multiplier: f64,
    pub healing_amount: u32,
    pub healing_multiplier: f64,
    pub target_type: TargetType,
    pub buffs_applied: Vec<EffectGrant>,
    pub debuffs_applied: Vec<EffectGrant>,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            mana_cost: 0,
            cooldown: 0,
            current_cooldown: 0,
            base_damage: 0,
            damage_multiplier: 0.0,
            healing_amount: 0,
            healing_multiplier: 0.0,
            target_type: TargetType::Enemy,
            buffs_applied: Vec::new(),
            debuffs_applied: Vec::new(),
        }
    }
}

impl Skill {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn deals_damage(&self) -> bool {
        self.base_damage > 0 || self.damage_multiplier > 0.0
    }

    pub fn heals(&self) -> bool {
        self.healing_amount > 0 || self.healing_multiplier > 0.0
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    pub(crate) fn start_cooldown(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    pub(crate) fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}
