//! Async orchestration for combat encounters.
//!
//! This crate wires a [`CombatSession`](combat_core::CombatSession), the
//! opponent roster and the knowledge store into a worker task. Consumers
//! embed [`Runtime`] to run encounters, subscribe to events, and issue
//! commands through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`store`] defines the knowledge store the player's side syncs with
//! - `workers` keeps the encounter task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod store;

mod workers;

pub use api::{
    ActionProvider, AttackFirstProvider, EncounterView, Result, RuntimeError, RuntimeHandle,
};
pub use events::{EncounterEvent, Event, EventBus, LogEvent, Topic, TurnEvent};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use store::{FileKnowledgeStore, InMemoryKnowledgeStore, KnowledgeStore, StoreError};
