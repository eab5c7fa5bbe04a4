//! Combat state and the data types it is built from.
//!
//! [`CombatState`] is mutated exclusively by
//! [`CombatSession`](crate::engine::CombatSession); everything else reads it.
pub mod types;

mod combat;

pub use combat::CombatState;
pub use types::{
    ActionOption, CombatEndPayload, CombatLogEntry, CombatStats, Combatant, CombatantId,
    CombatantKind, CombatantSnapshot, CombatantTemplate, ConsumableItem, Disposition, EffectGrant,
    EffectKind, EncounterOutcome, Epoch, Inventory, ItemEffect, LogKind, PlayerLoadout, Side,
    Skill, StatusEffect, TargetType,
};
