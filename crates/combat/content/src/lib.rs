//! Data-driven combat content.
//!
//! Loads the catalogs an encounter host needs from RON/TOML files:
//! - Balance tables (`tables.toml`)
//! - Skill catalog (`skills.ron`)
//! - Consumable catalog (`items.ron`)
//! - Opponent roster (`roster.ron`)
//! - Starting player loadout (`player.ron`)
//!
//! Consumables authored with free-text effect descriptors are converted into
//! the structured [`ItemEffect`](combat_core::ItemEffect) schema once, at load
//! time, by [`legacy::parse_effect_text`].

pub mod legacy;
pub mod loaders;
pub mod roster;

pub use legacy::parse_effect_text;
pub use loaders::{
    CombatantSpec, Content, ContentFactory, ItemLoader, ItemSpec, LoadResult, PlayerLoader,
    PlayerSpec, RosterLoader, SkillLoader, TablesLoader,
};
pub use roster::Roster;
