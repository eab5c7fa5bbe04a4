/// Stats that status effects and equipment can modify.
///
/// HP and MP are resources, not modifiable stats, and live on
/// [`CombatStats`](crate::state::CombatStats) directly.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKey {
    #[strum(to_string = "attack", serialize = "atk", serialize = "sucTanCong")]
    Attack,
    #[strum(to_string = "defense", serialize = "def", serialize = "phongThu")]
    Defense,
    #[strum(to_string = "speed", serialize = "spd", serialize = "tocDo")]
    Speed,
    #[strum(to_string = "accuracy", serialize = "acc", serialize = "chinhXac")]
    Accuracy,
    #[strum(to_string = "evasion", serialize = "eva", serialize = "neTranh")]
    Evasion,
    #[strum(to_string = "crit_chance", serialize = "crit")]
    CritChance,
}

impl StatKey {
    /// Human-readable name used in effect names and log text.
    pub const fn label(self) -> &'static str {
        match self {
            StatKey::Attack => "Attack",
            StatKey::Defense => "Defense",
            StatKey::Speed => "Speed",
            StatKey::Accuracy => "Accuracy",
            StatKey::Evasion => "Evasion",
            StatKey::CritChance => "Crit Chance",
        }
    }
}

/// One value per [`StatKey`].
///
/// Used for both the base layer and the equipment layer of a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub crit_chance: i32,
}

impl StatBlock {
    pub const ZERO: Self = Self {
        attack: 0,
        defense: 0,
        speed: 0,
        accuracy: 0,
        evasion: 0,
        crit_chance: 0,
    };

    pub const fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
            StatKey::Accuracy => self.accuracy,
            StatKey::Evasion => self.evasion,
            StatKey::CritChance => self.crit_chance,
        }
    }

    pub fn set(&mut self, key: StatKey, value: i32) {
        match key {
            StatKey::Attack => self.attack = value,
            StatKey::Defense => self.defense = value,
            StatKey::Speed => self.speed = value,
            StatKey::Accuracy => self.accuracy = value,
            StatKey::Evasion => self.evasion = value,
            StatKey::CritChance => self.crit_chance = value,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, key: StatKey, value: i32) -> Self {
        self.set(key, value);
        self
    }
}
