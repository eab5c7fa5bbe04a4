mod combatant;
mod common;
mod item;
mod log;
mod menu;
mod payload;
mod skill;
mod status;

pub use combatant::{
    CombatStats, Combatant, CombatantKind, CombatantSnapshot, CombatantTemplate, Disposition,
    PlayerLoadout, Side,
};
pub use common::{CombatantId, Epoch};
pub use item::{ConsumableItem, Inventory, ItemEffect};
pub use log::{CombatLogEntry, LogKind};
pub use menu::ActionOption;
pub use payload::{CombatEndPayload, EncounterOutcome};
pub use skill::{Skill, TargetType};
pub use status::{EffectGrant, EffectKind, StatusEffect};
