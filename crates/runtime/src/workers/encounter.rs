//! Encounter worker that owns the authoritative [`CombatSession`].
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle),
//! drives the session, and publishes log, turn and encounter events to the
//! EventBus. Automatic turns are paced: each one is re-submitted as an
//! [`Command::AutomaticTurn`] after the configured delay, carrying the epoch
//! it was scheduled under.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use combat_core::{
    ActionReport, CombatEndPayload, CombatFailure, CombatSession, CombatantId, Disposition, Epoch,
    OpponentRef, PlayerAction, RosterOracle, TurnError,
};

use crate::api::{EncounterView, Result};
use crate::events::{EncounterEvent, Event, EventBus, LogEvent, TurnEvent};
use crate::store::KnowledgeStore;

/// Commands that can be sent to the encounter worker
pub enum Command {
    /// Start an encounter with the stored loadout.
    Start {
        opponents: Vec<OpponentRef>,
        reply: oneshot::Sender<Result<Epoch>>,
    },
    /// Perform a player action.
    Act {
        action: PlayerAction,
        reply: oneshot::Sender<Result<ActionReport>>,
    },
    /// Run one paced automatic turn. Issued by the worker itself.
    AutomaticTurn { epoch: Epoch },
    SetDisposition {
        id: CombatantId,
        disposition: Disposition,
        reply: oneshot::Sender<Result<()>>,
    },
    Finalize {
        reply: oneshot::Sender<Result<CombatEndPayload>>,
    },
    Abandon {
        reply: oneshot::Sender<bool>,
    },
    /// Query the current encounter (read-only).
    Query {
        reply: oneshot::Sender<EncounterView>,
    },
}

/// Background task that processes encounter commands.
pub struct EncounterWorker {
    session: CombatSession,
    roster: Arc<dyn RosterOracle + Send + Sync>,
    store: Arc<dyn KnowledgeStore>,
    command_rx: mpsc::Receiver<Command>,
    /// Weak so that pending continuations never keep the worker alive.
    command_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    npc_turn_delay: Duration,
}

impl EncounterWorker {
    pub fn new(
        session: CombatSession,
        roster: Arc<dyn RosterOracle + Send + Sync>,
        store: Arc<dyn KnowledgeStore>,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
        npc_turn_delay: Duration,
    ) -> Self {
        Self {
            session,
            roster,
            store,
            command_rx,
            command_tx,
            event_bus,
            npc_turn_delay,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "Encounter worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { opponents, reply } => {
                let result = self.handle_start(opponents);
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Act { action, reply } => {
                let result = self.handle_action(action);
                if reply.send(result).is_err() {
                    debug!("Act reply channel closed (caller dropped)");
                }
            }
            Command::AutomaticTurn { epoch } => self.handle_automatic_turn(epoch),
            Command::SetDisposition {
                id,
                disposition,
                reply,
            } => {
                let result = self
                    .session
                    .set_disposition(id, disposition)
                    .map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("SetDisposition reply channel closed (caller dropped)");
                }
            }
            Command::Finalize { reply } => {
                let result = self.handle_finalize();
                if reply.send(result).is_err() {
                    debug!("Finalize reply channel closed (caller dropped)");
                }
            }
            Command::Abandon { reply } => {
                let abandoned = self.handle_abandon();
                if reply.send(abandoned).is_err() {
                    debug!("Abandon reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                if reply.send(self.view()).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_start(&mut self, opponents: Vec<OpponentRef>) -> Result<Epoch> {
        let loadout = self.store.load_player()?;
        let epoch = self
            .session
            .start(loadout, &opponents, self.roster.as_ref())?;

        let joined = self.session.state().combatants.len();
        info!(
            target: "runtime::worker",
            %epoch,
            requested = opponents.len(),
            combatants = joined,
            "Encounter started"
        );

        self.event_bus
            .publish(Event::Encounter(EncounterEvent::Started {
                epoch,
                combatants: self
                    .session
                    .state()
                    .combatants
                    .iter()
                    .map(|c| c.snapshot())
                    .collect(),
            }));
        self.publish_progress();
        Ok(epoch)
    }

    fn handle_action(&mut self, action: PlayerAction) -> Result<ActionReport> {
        match self.session.act(action.clone()) {
            Ok(report) => {
                debug!(
                    target: "runtime::worker",
                    action = ?action,
                    phase = ?report.phase,
                    "Player action resolved"
                );
                self.publish_progress();
                Ok(report)
            }
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    action = ?action,
                    code = error.error_code(),
                    severity = ?error.severity(),
                    "Player action rejected"
                );
                // Precondition failures leave an info entry behind.
                self.publish_log();
                Err(error.into())
            }
        }
    }

    fn handle_automatic_turn(&mut self, epoch: Epoch) {
        match self.session.step_automatic(epoch) {
            Ok(step) => {
                debug!(
                    target: "runtime::worker",
                    %epoch,
                    actor = %step.actor,
                    target = ?step.target,
                    damage = step.outcome.as_ref().map_or(0, |o| o.damage),
                    "Automatic turn resolved"
                );
                self.publish_progress();
            }
            Err(TurnError::StaleEpoch { expected, provided }) => {
                warn!(
                    target: "runtime::worker",
                    %expected,
                    %provided,
                    "Discarding automatic turn scheduled for a previous encounter"
                );
            }
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    %epoch,
                    error = %error,
                    "Automatic turn skipped"
                );
            }
        }
    }

    fn handle_finalize(&mut self) -> Result<CombatEndPayload> {
        let payload = self.session.finalize()?;

        if let Err(error) = self.store.sync_player(&payload.player_loadout) {
            warn!(
                target: "runtime::worker",
                error = %error,
                "Failed to sync player loadout back to the knowledge store"
            );
        }

        info!(
            target: "runtime::worker",
            outcome = %payload.outcome,
            rounds = payload.total_rounds,
            dealt = payload.damage_dealt_by_player,
            taken = payload.damage_taken_by_player,
            "Encounter finalized"
        );
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::Finalized {
                payload: Box::new(payload.clone()),
            }));
        Ok(payload)
    }

    fn handle_abandon(&mut self) -> bool {
        let epoch = self.session.epoch();
        if !self.session.abandon() {
            return false;
        }
        info!(target: "runtime::worker", %epoch, "Encounter abandoned");
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::Abandoned { epoch }));
        true
    }

    fn view(&self) -> EncounterView {
        EncounterView {
            epoch: self.session.epoch(),
            phase: self.session.phase(),
            state: self.session.state().clone(),
        }
    }

    fn publish_log(&mut self) {
        let epoch = self.session.epoch();
        for entry in self.session.drain_log() {
            self.event_bus
                .publish(Event::Log(LogEvent { epoch, entry }));
        }
    }

    /// Publish what the last state change produced and schedule whatever
    /// automatic turn is due next.
    fn publish_progress(&mut self) {
        self.publish_log();
        let epoch = self.session.epoch();

        if let Some(outcome) = self.session.phase().outcome() {
            info!(target: "runtime::worker", %epoch, %outcome, "Encounter ended");
            self.event_bus
                .publish(Event::Encounter(EncounterEvent::Ended { epoch, outcome }));
            return;
        }

        if let Some(actor) = self.session.current_actor() {
            self.event_bus.publish(Event::Turn(TurnEvent {
                epoch,
                round: self.session.state().round_number,
                actor: actor.id,
                actor_name: actor.name.clone(),
                is_player: actor.is_player,
            }));
        }
        self.schedule_automatic();
    }

    fn schedule_automatic(&self) {
        let Some((epoch, actor)) = self.session.pending_automatic_turn() else {
            return;
        };
        let command_tx = self.command_tx.clone();
        let delay = self.npc_turn_delay;
        trace!(
            target: "runtime::worker",
            %epoch,
            %actor,
            delay_ms = delay.as_millis() as u64,
            "Scheduling automatic turn"
        );

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(command_tx) = command_tx.upgrade() else {
                return;
            };
            if command_tx
                .send(Command::AutomaticTurn { epoch })
                .await
                .is_err()
            {
                trace!("Worker stopped before automatic turn for {epoch}");
            }
        });
    }
}
