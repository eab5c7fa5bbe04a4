//! Single-action resolution.
//!
//! [`resolve`] computes what one action would do and returns an immutable
//! [`ActionOutcome`]. It never mutates combatants; the session applies the
//! outcome afterwards, so a failed validation leaves nothing half-applied.

mod describe;
mod outcome;
mod resolve;
mod rolls;

pub use describe::{describe_evade, describe_hit, describe_item};
pub use outcome::{ActionOutcome, CombatAction};
pub use resolve::resolve;
pub use rolls::{RollSource, ScriptedRolls, SeededRolls};
