//! Deterministic turn-based combat rules.
//!
//! `combat-core` defines the canonical combat rules and exposes pure APIs that
//! the runtime, content tooling and tests share:
//!
//! - [`combat`] is the formula library (hit, crit, damage, healing, flee)
//! - [`stats`] layers base, equipment and status modifiers into effective stats
//! - [`effects`] turns skill and item grants into [`StatusEffect`]s
//! - [`action`] resolves a single action into an immutable [`ActionOutcome`]
//! - [`engine`] hosts [`CombatSession`], the only place combat state mutates
pub mod action;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{ActionOutcome, CombatAction, RollSource, ScriptedRolls, SeededRolls, resolve};
pub use config::CombatTables;
pub use engine::{
    ActionError, ActionReport, AutomaticAction, AutomaticStep, BasicAttackPolicy, CombatError,
    CombatSession, CombatSessionBuilder, FinalizeError, InvalidReference, OpponentPolicy, Phase,
    PlayerAction, PreconditionFailure, StartError, TieBreak, TurnError,
};
pub use env::{OpponentRef, PcgRng, RngOracle, RosterOracle, compute_seed};
pub use error::{CombatFailure, ErrorSeverity};
pub use state::{
    ActionOption, CombatEndPayload, CombatLogEntry, CombatState, CombatStats, Combatant,
    CombatantId, CombatantKind, CombatantSnapshot, CombatantTemplate, ConsumableItem, Disposition,
    EffectGrant, EffectKind, EncounterOutcome, Epoch, Inventory, ItemEffect, LogKind,
    PlayerLoadout, Side, Skill, StatusEffect, TargetType,
};
pub use stats::{Modifier, ModifierStack, StatBlock, StatBreakdown, StatKey};
