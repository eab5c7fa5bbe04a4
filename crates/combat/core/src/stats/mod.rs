//! Stat layering.
//!
//! Effective stats are computed in a fixed order:
//!
//! ```text
//! base → + equipment → + Σ status modifiers
//! ```
//!
//! Percentage status modifiers apply against the equipment-adjusted value,
//! flat and relative modifiers are plain addition. The three layers are kept
//! apart in [`StatBreakdown`] because equipment and status bonuses are
//! displayed separately.

mod block;
mod layers;
mod modifier;

pub use block::{StatBlock, StatKey};
pub use layers::{StatBreakdown, effective_block, layer_stat};
pub use modifier::{Modifier, ModifierStack, ParseModifierError};
