//! High-level runtime orchestrator.
//!
//! The runtime owns the encounter worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive encounters.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use combat_core::{
    CombatEndPayload, CombatSession, CombatSessionBuilder, CombatTables, ErrorSeverity,
    OpponentPolicy, OpponentRef, Phase, RollSource, RosterOracle,
};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::store::KnowledgeStore;
use crate::workers::{Command, EncounterWorker};

/// Consecutive rejected player actions tolerated before giving up.
const MAX_REJECTED_ACTIONS: usize = 8;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tables: CombatTables,
    /// Pause before each automatic turn so a presentation layer can keep up.
    pub npc_turn_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Game seed for roll derivation; random when unset.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tables: CombatTables::default(),
            npc_turn_delay: Duration::from_millis(600),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_NPC_DELAY_MS` - Pause before each automatic turn (default: 600)
    /// - `COMBAT_SEED` - Game seed (default: random)
    /// - `COMBAT_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `COMBAT_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(delay) = read_env::<u64>("COMBAT_NPC_DELAY_MS") {
            config.npc_turn_delay = Duration::from_millis(delay);
        }
        config.seed = read_env::<u64>("COMBAT_SEED");
        if let Some(capacity) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn with_tables(mut self, tables: CombatTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_npc_turn_delay(mut self, delay: Duration) -> Self {
        self.npc_turn_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates encounters
///
/// Design: Runtime owns the worker and coordinates the player's side.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to runtime events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Run one encounter to completion with the configured player provider.
    ///
    /// Asks the provider for an action on every player turn, waits for the
    /// paced automatic turns in between, applies the provider's dispositions
    /// and returns the finalized payload.
    pub async fn run_encounter(&mut self, opponents: Vec<OpponentRef>) -> Result<CombatEndPayload> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let mut turns = self.handle.subscribe(Topic::Turn);
        let mut encounters = self.handle.subscribe(Topic::Encounter);
        let epoch = self.handle.start_encounter(opponents).await?;
        let mut rejected = 0;

        let view = loop {
            let view = self.handle.query().await?;
            if view.epoch != epoch || view.phase == Phase::Idle {
                return Err(RuntimeError::EncounterAbandoned);
            }
            if view.phase.outcome().is_some() {
                break view;
            }
            if !view.is_player_turn() {
                wait_for_progress(&mut turns, &mut encounters).await?;
                continue;
            }

            let action = provider.provide_action(&view).await?;
            match self.handle.perform(action).await {
                Ok(_) => rejected = 0,
                Err(error) if error.severity() != ErrorSeverity::Internal => {
                    rejected += 1;
                    warn!(error = %error, attempt = rejected, "Player action rejected");
                    if rejected >= MAX_REJECTED_ACTIONS {
                        return Err(error);
                    }
                }
                Err(error) => return Err(error),
            }
        };

        for opponent in view.state.opponents().filter(|c| !c.is_alive()) {
            if let Some(disposition) = provider.choose_disposition(&opponent.snapshot()).await {
                self.handle.set_disposition(opponent.id, disposition).await?;
            }
        }

        self.handle.finalize().await
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, which stops once every handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        let Runtime {
            handle,
            worker_handle,
            ..
        } = self;
        drop(handle);

        worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Wait until the worker reports a new turn or an encounter change.
async fn wait_for_progress(
    turns: &mut broadcast::Receiver<Event>,
    encounters: &mut broadcast::Receiver<Event>,
) -> Result<()> {
    let received = tokio::select! {
        event = turns.recv() => event,
        event = encounters.recv() => event,
    };
    match received {
        Ok(_) => Ok(()),
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            debug!(skipped, "Event subscriber lagged");
            Ok(())
        }
        Err(broadcast::error::RecvError::Closed) => Err(RuntimeError::EventStreamClosed),
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Arc<dyn RosterOracle + Send + Sync>>,
    store: Option<Arc<dyn KnowledgeStore>>,
    session: CombatSessionBuilder,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            store: None,
            session: CombatSession::builder(),
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the opponent roster (required)
    pub fn roster(mut self, roster: impl RosterOracle + Send + Sync + 'static) -> Self {
        self.roster = Some(Arc::new(roster));
        self
    }

    /// Set the knowledge store (required)
    pub fn store(mut self, store: Arc<dyn KnowledgeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the seeded roll source, e.g. with scripted rolls in tests
    pub fn rolls(mut self, rolls: impl RollSource + Send + 'static) -> Self {
        self.session = self.session.rolls(rolls);
        self
    }

    /// Replace the opponent policy
    pub fn policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.session = self.session.policy(policy);
        self
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let config = self.config;

        let seed = config.seed.unwrap_or_else(rand::random);
        let session = self.session.tables(config.tables).seed(seed).build();

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let worker = EncounterWorker::new(
            session,
            roster,
            store,
            command_rx,
            command_tx.downgrade(),
            event_bus.clone(),
            config.npc_turn_delay,
        );
        let worker_handle = tokio::spawn(worker.run());

        info!(
            seed,
            npc_turn_delay_ms = config.npc_turn_delay.as_millis() as u64,
            "Runtime built"
        );

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            player_provider: self.player_provider,
            worker_handle,
        })
    }
}
