//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving an encounter or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{
    ActionReport, CombatEndPayload, CombatantId, Disposition, Epoch, OpponentRef, PlayerAction,
};

use super::errors::{Result, RuntimeError};
use super::view::EncounterView;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start an encounter against `opponents` with the stored player loadout.
    ///
    /// Returns the epoch the encounter runs under. Automatic turns that are
    /// due before the player's first turn run in the background.
    pub async fn start_encounter(&self, opponents: Vec<OpponentRef>) -> Result<Epoch> {
        self.request(|reply| Command::Start { opponents, reply })
            .await?
    }

    /// Perform a player action on the player's turn.
    ///
    /// The automatic turns that follow are paced by the worker and reported
    /// through [`Topic::Turn`] and [`Topic::Log`].
    pub async fn perform(&self, action: PlayerAction) -> Result<ActionReport> {
        self.request(|reply| Command::Act { action, reply }).await?
    }

    /// Choose what happens to a defeated opponent before finalizing.
    pub async fn set_disposition(&self, id: CombatantId, disposition: Disposition) -> Result<()> {
        self.request(|reply| Command::SetDisposition {
            id,
            disposition,
            reply,
        })
        .await?
    }

    /// Build the end payload, sync the player's side back to the knowledge
    /// store and return the session to idle.
    pub async fn finalize(&self) -> Result<CombatEndPayload> {
        self.request(|reply| Command::Finalize { reply }).await?
    }

    /// Drop the current encounter without a payload.
    ///
    /// Pending automatic turns are discarded. Returns false when nothing was
    /// running.
    pub async fn abandon(&self) -> Result<bool> {
        self.request(|reply| Command::Abandon { reply }).await
    }

    /// Query the current encounter (read-only snapshot)
    pub async fn query(&self) -> Result<EncounterView> {
        self.request(|reply| Command::Query { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Combat log entries
    /// - `Topic::Turn` - Turn starts
    /// - `Topic::Encounter` - Encounter lifecycle
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
