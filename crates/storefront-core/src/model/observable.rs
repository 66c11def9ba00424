//! Base for state entities that announce their changes on the bus.

use crate::event_bus::{EventBus, EventPayload};

/// Change notifier embedded in every state entity
///
/// Holds the bus it was constructed with and nothing else.
#[derive(Debug, Clone)]
pub struct ObservableState {
    events: EventBus,
}

impl ObservableState {
    /// Create a notifier emitting on `events`
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    /// Announce a change to whoever listens for `name`
    pub fn emit_changes(&self, name: &str, payload: EventPayload) {
        self.events.emit(name, &payload);
    }

    /// The bus this entity emits on
    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

/// Implemented by state entities built on [`ObservableState`]
pub trait Observable {
    /// The embedded notifier
    fn observable(&self) -> &ObservableState;

    /// Announce a change, see [`ObservableState::emit_changes`]
    fn emit_changes(&self, name: &str, payload: EventPayload) {
        self.observable().emit_changes(name, payload);
    }
}
