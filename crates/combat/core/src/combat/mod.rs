//! Combat formula library.
//!
//! Pure functions over explicit roll values and a [`CombatTables`] parameter
//! block. Nothing here draws randomness or touches combat state; callers pass
//! rolls in and apply the results themselves.
//!
//! # Core Functions
//!
//! - `hit_chance` / `check_hit`: accuracy vs evasion
//! - `calculate_damage`: crit, defense curve, variance and the damage floor
//! - `skill_healing`: flat plus attack-scaled healing
//! - `flee_chance` / `check_flee`: speed gap and failure penalty
//!
//! [`CombatTables`]: crate::config::CombatTables

pub mod damage;
pub mod flee;
pub mod heal;
pub mod hit;

pub use damage::{
    apply_damage, basic_attack_damage, calculate_damage, crit_multiplier, damage_reduction,
    is_crit, skill_base_damage,
};
pub use flee::{check_flee, flee_chance};
pub use heal::{apply_healing, skill_healing};
pub use hit::{check_hit, hit_chance};
