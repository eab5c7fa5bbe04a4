//! Balance tables for the combat formulas.
//!
//! Every constant the formula library uses lives here so content can retune
//! the curves without touching code. `Default` yields the canonical values.

/// Hit chance parameters: `clamp(base + accuracy - evasion, min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitParams {
    pub base: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            base: 95,
            min: 5,
            max: 95,
        }
    }
}

/// Critical hit defaults applied when a template leaves them unset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CritParams {
    /// Percent chance, compared against a `[0, 100)` draw.
    pub default_chance: i32,
    pub default_multiplier: f64,
}

impl Default for CritParams {
    fn default() -> Self {
        Self {
            default_chance: 5,
            default_multiplier: 1.5,
        }
    }
}

/// Damage pipeline parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Reduction curve constant `k` in `def / (def + k)`.
    pub defense_curve: f64,
    pub variance_min: f64,
    pub variance_max: f64,
    /// Floor applied to every damaging hit.
    pub minimum: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            defense_curve: 100.0,
            variance_min: 0.85,
            variance_max: 1.15,
            minimum: 1,
        }
    }
}

/// Flee chance parameters:
/// `clamp(base + speed_diff * speed_factor - failure_penalty * failures, min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeParams {
    pub base: i32,
    pub speed_factor: i32,
    pub failure_penalty: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for FleeParams {
    fn default() -> Self {
        Self {
            base: 50,
            speed_factor: 2,
            failure_penalty: 10,
            min: 10,
            max: 90,
        }
    }
}

/// Status effect application parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectParams {
    /// Chance used when a grant does not declare `chance_percent`.
    pub default_chance: u32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            default_chance: 100,
        }
    }
}

/// All tunable combat parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatTables {
    pub hit: HitParams,
    pub crit: CritParams,
    pub damage: DamageParams,
    pub flee: FleeParams,
    pub effects: EffectParams,
}

impl CombatTables {
    pub fn new() -> Self {
        Self::default()
    }
}
