//! Flee chance.

use crate::config::CombatTables;

/// Chance, in percent, that a flee attempt succeeds.
///
/// # Formula
///
/// ```text
/// chance = clamp(base + (player_speed - fastest_opponent_speed) * speed_factor
///                - failure_penalty * prior_failures, min, max)
/// ```
pub fn flee_chance(
    player_speed: i32,
    fastest_opponent_speed: i32,
    prior_failures: u32,
    tables: &CombatTables,
) -> i32 {
    let params = tables.flee;
    let speed_diff = player_speed as i64 - fastest_opponent_speed as i64;
    let chance = params.base as i64 + speed_diff * params.speed_factor as i64
        - params.failure_penalty as i64 * prior_failures as i64;
    chance.clamp(params.min as i64, params.max as i64) as i32
}

/// One draw in `[0, 100)`; `roll < chance` escapes.
pub fn check_flee(chance: i32, roll: f64) -> bool {
    roll < chance as f64
}
