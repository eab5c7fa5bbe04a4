//! Read-only collaborators the engine consults.
//!
//! - [`RngOracle`]: deterministic randomness for hit, crit, variance and
//!   effect-chance draws
//! - [`RosterOracle`]: resolves opponent references into combatant templates

mod rng;
mod roster;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use roster::{OpponentRef, RosterOracle};
