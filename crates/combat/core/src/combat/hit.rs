//! Hit chance and evasion.

use crate::config::CombatTables;

/// Chance, in percent, that an attack lands.
///
/// # Formula
///
/// ```text
/// hit_chance = clamp(base + accuracy - evasion, min, max)
/// ```
///
/// With default tables the result lies in `[5, 95]`.
pub fn hit_chance(accuracy: i32, evasion: i32, tables: &CombatTables) -> i32 {
    let params = tables.hit;
    params
        .base
        .saturating_add(accuracy)
        .saturating_sub(evasion)
        .clamp(params.min, params.max)
}

/// Check whether an attack lands.
///
/// # Arguments
///
/// * `roll` - Draw in `[0, 100)`
///
/// # Returns
///
/// `true` when `roll < hit_chance`; otherwise the target evades.
pub fn check_hit(accuracy: i32, evasion: i32, roll: f64, tables: &CombatTables) -> bool {
    roll < hit_chance(accuracy, evasion, tables) as f64
}
