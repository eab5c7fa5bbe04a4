//! Damage calculation and application.

use crate::config::CombatTables;

/// Whether a crit roll succeeds.
///
/// `roll` is a draw in `[0, 100)` compared against the attacker's crit chance.
pub fn is_crit(crit_chance: i32, roll: f64) -> bool {
    roll < crit_chance as f64
}

/// Multiplier applied to raw damage: the attacker's own on a crit, else 1.0.
pub fn crit_multiplier(attacker_multiplier: f64, did_crit: bool) -> f64 {
    if did_crit { attacker_multiplier } else { 1.0 }
}

/// Fraction of damage absorbed by defense.
///
/// # Formula
///
/// ```text
/// reduction = def / (def + curve)
/// ```
///
/// Negative defense counts as zero, so the reduction lies in `[0, 1)`.
pub fn damage_reduction(defense: i32, tables: &CombatTables) -> f64 {
    let defense = defense.max(0) as f64;
    let curve = tables.damage.defense_curve;
    if defense + curve <= 0.0 {
        return 0.0;
    }
    defense / (defense + curve)
}

/// Run raw damage through the damage pipeline.
///
/// # Formula
///
/// ```text
/// damage = max(minimum, floor(raw * crit_mult * (1 - reduction) * variance))
/// ```
///
/// # Arguments
///
/// * `raw` - Attack stat for basic attacks, or the skill's base damage
/// * `crit_mult` - Result of [`crit_multiplier`]
/// * `defense` - Target's effective defense
/// * `variance` - Draw in `[variance_min, variance_max]`
pub fn calculate_damage(
    raw: f64,
    crit_mult: f64,
    defense: i32,
    variance: f64,
    tables: &CombatTables,
) -> u32 {
    let reduced = raw.max(0.0) * crit_mult * (1.0 - damage_reduction(defense, tables)) * variance;
    // `as` saturates on overflow and maps NaN to 0.
    let floored = reduced.floor() as u32;
    floored.max(tables.damage.minimum)
}

/// Raw damage of a basic attack.
pub fn basic_attack_damage(attack: i32) -> f64 {
    attack as f64
}

/// Raw damage of a skill: `base_damage + attack * damage_multiplier`.
pub fn skill_base_damage(base_damage: u32, attack: i32, damage_multiplier: f64) -> f64 {
    base_damage as f64 + attack as f64 * damage_multiplier
}

/// Reduce HP, stopping at zero.
pub fn apply_damage(hp: u32, damage: u32) -> u32 {
    hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_curve_matches_reference_point() {
        let tables = CombatTables::default();
        // atk 10 vs def 50, no crit, variance 1.0
        let damage = calculate_damage(basic_attack_damage(10), 1.0, 50, 1.0, &tables);
        assert_eq!(damage, 6);
    }

    #[test]
    fn damage_never_drops_below_minimum() {
        let tables = CombatTables::default();
        assert_eq!(calculate_damage(0.0, 1.0, 0, 0.85, &tables), 1);
        assert_eq!(calculate_damage(1.0, 1.0, 10_000, 0.85, &tables), 1);
        assert_eq!(calculate_damage(-50.0, 1.0, 0, 1.0, &tables), 1);
    }

    #[test]
    fn negative_defense_counts_as_zero() {
        let tables = CombatTables::default();
        assert_eq!(damage_reduction(-40, &tables), 0.0);
        assert_eq!(calculate_damage(20.0, 1.0, -40, 1.0, &tables), 20);
    }

    #[test]
    fn crit_uses_attacker_multiplier() {
        assert!(is_crit(5, 4.9));
        assert!(!is_crit(5, 5.0));
        assert_eq!(crit_multiplier(2.0, true), 2.0);
        assert_eq!(crit_multiplier(2.0, false), 1.0);

        let tables = CombatTables::default();
        assert_eq!(calculate_damage(20.0, 1.5, 0, 1.0, &tables), 30);
    }

    #[test]
    fn skill_damage_scales_with_attack() {
        assert_eq!(skill_base_damage(10, 20, 1.5), 40.0);
        assert_eq!(skill_base_damage(0, 20, 0.0), 0.0);
    }

    #[test]
    fn hp_saturates_at_zero() {
        assert_eq!(apply_damage(6, 6), 0);
        assert_eq!(apply_damage(6, 100), 0);
        assert_eq!(apply_damage(10, 3), 7);
    }
}
