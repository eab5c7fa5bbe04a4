//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::types::{EncounterEvent, LogEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Combat log entries
    Log,
    /// Turn starts
    Turn,
    /// Encounter start, end, finalize and abandon
    Encounter,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Log(LogEvent),
    Turn(TurnEvent),
    Encounter(EncounterEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Log,
            Event::Turn(_) => Topic::Turn,
            Event::Encounter(_) => Topic::Encounter,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels exist for every topic from construction
/// on, so cloning shares them.
#[derive(Clone)]
pub struct EventBus {
    log: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    encounter: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            log: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            encounter: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Log => &self.log,
            Topic::Turn => &self.turn,
            Topic::Encounter => &self.encounter,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatantId, Epoch};

    fn turn(actor: u32) -> Event {
        Event::Turn(TurnEvent {
            epoch: Epoch(1),
            round: 1,
            actor: CombatantId(actor),
            actor_name: format!("C{actor}"),
            is_player: actor == 0,
        })
    }

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut encounters = bus.subscribe(Topic::Encounter);

        bus.publish(turn(2));
        bus.publish(Event::Encounter(EncounterEvent::Abandoned { epoch: Epoch(1) }));

        assert!(matches!(turns.try_recv(), Ok(Event::Turn(t)) if t.actor == CombatantId(2)));
        assert!(turns.try_recv().is_err());
        assert!(matches!(
            encounters.try_recv(),
            Ok(Event::Encounter(EncounterEvent::Abandoned { .. }))
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(turn(0));
        let clone = bus.clone();
        let mut rx = clone.subscribe(Topic::Turn);
        bus.publish(turn(1));
        assert!(matches!(rx.try_recv(), Ok(Event::Turn(t)) if t.actor == CombatantId(1)));
    }
}
