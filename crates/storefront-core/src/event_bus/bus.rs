//! Event Bus implementation.
//!
//! Provides the [`EventBus`] handle, subscription keys and the dispatch rules
//! shared by every component of the storefront.

use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

use super::events::EventPayload;
use crate::error::Result;

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Which emissions a subscription receives
#[derive(Debug, Clone)]
pub enum SubscriptionKey {
    /// Emissions whose name equals this string.
    Exact(String),
    /// Emissions whose name matches this regular expression.
    Pattern(Regex),
    /// Every emission.
    All,
}

impl SubscriptionKey {
    /// Compile a pattern key
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Check if an emission with this name is delivered under this key
    pub fn matches(&self, name: &str) -> bool {
        match self {
            SubscriptionKey::Exact(key) => key == name,
            SubscriptionKey::Pattern(regex) => regex.is_match(name),
            SubscriptionKey::All => true,
        }
    }
}

impl PartialEq for SubscriptionKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::All, Self::All) => true,
            _ => false,
        }
    }
}

impl Eq for SubscriptionKey {}

impl From<&str> for SubscriptionKey {
    fn from(name: &str) -> Self {
        Self::Exact(name.to_string())
    }
}

impl From<String> for SubscriptionKey {
    fn from(name: String) -> Self {
        Self::Exact(name)
    }
}

impl From<Regex> for SubscriptionKey {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl std::fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionKey::Exact(name) => write!(f, "{}", name),
            SubscriptionKey::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
            SubscriptionKey::All => write!(f, "*"),
        }
    }
}

/// Handler invoked with the payload of a matching emission
pub type EventHandler = Rc<dyn Fn(&EventPayload)>;

/// Handler invoked with the name and payload of every emission
pub type WildcardHandler = Rc<dyn Fn(&str, &EventPayload)>;

#[derive(Clone)]
enum Callback {
    Keyed(EventHandler),
    Wildcard(WildcardHandler),
}

impl Callback {
    fn invoke(&self, name: &str, payload: &EventPayload) {
        match self {
            Callback::Keyed(handler) => handler(payload),
            Callback::Wildcard(handler) => handler(name, payload),
        }
    }

    fn is_handler(&self, other: &EventHandler) -> bool {
        matches!(self, Callback::Keyed(handler) if Rc::ptr_eq(handler, other))
    }
}

struct Registration {
    id: SubscriptionId,
    key: SubscriptionKey,
    callback: Callback,
}

/// Synchronous publish/subscribe dispatcher.
///
/// `EventBus` is a cheap handle: clones share the same registrations, which
/// is how the bus is injected into the state model and the presenter.
///
/// Dispatch rules:
/// - `emit` runs every matching callback in registration order, on the
///   caller's stack, with the payload passed by reference.
/// - The callbacks for an emission are fixed when it starts, so callbacks
///   may subscribe, unsubscribe and emit while being dispatched.
/// - A panicking callback unwinds through `emit`; there is no isolation.
/// - Nested emission has no cycle detection. An event whose handlers end
///   up emitting the same event again recurses until the stack overflows.
#[derive(Clone, Default)]
pub struct EventBus {
    registrations: Rc<RefCell<Vec<Registration>>>,
}

impl EventBus {
    /// Create a new event bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler under an exact name, a pattern or [`SubscriptionKey::All`]
    ///
    /// Registering the same handler twice under the same key is allowed and
    /// makes it run twice per emission.
    pub fn subscribe(&self, key: impl Into<SubscriptionKey>, handler: EventHandler) -> SubscriptionId {
        self.register(key.into(), Callback::Keyed(handler))
    }

    /// Subscribe a closure, see [`EventBus::subscribe`]
    pub fn on<F>(&self, key: impl Into<SubscriptionKey>, handler: F) -> SubscriptionId
    where
        F: Fn(&EventPayload) + 'static,
    {
        self.subscribe(key, Rc::new(handler))
    }

    /// Subscribe a handler that receives every emission along with its name
    ///
    /// Meant for diagnostics such as event logging.
    pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &EventPayload) + 'static,
    {
        self.register(SubscriptionKey::All, Callback::Wildcard(Rc::new(handler)))
    }

    fn register(&self, key: SubscriptionKey, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId::new();
        tracing::debug!("Subscription {} added for {}", id, key);
        self.registrations
            .borrow_mut()
            .push(Registration { id, key, callback });
        id
    }

    /// Remove every registration of `handler` under `key`
    ///
    /// Handlers are compared by identity. Returns true if anything was removed.
    pub fn unsubscribe(&self, key: &SubscriptionKey, handler: &EventHandler) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|r| !(r.key == *key && r.callback.is_handler(handler)));
        let removed = before - registrations.len();
        if removed > 0 {
            tracing::debug!("Removed {} subscription(s) for {}", removed, key);
        }
        removed > 0
    }

    /// Remove a single registration by its id
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        let removed = before != registrations.len();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Remove every registration under `key`, returning how many were removed
    pub fn unsubscribe_all(&self, key: &SubscriptionKey) -> usize {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|r| r.key != *key);
        before - registrations.len()
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.registrations.borrow_mut().clear();
    }

    /// Deliver `payload` to every callback whose key matches `name`
    ///
    /// Returns the number of callbacks that ran. Emitting with no
    /// subscribers is a no-op.
    pub fn emit(&self, name: &str, payload: &EventPayload) -> usize {
        let callbacks: Vec<Callback> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.key.matches(name))
            .map(|r| r.callback.clone())
            .collect();

        tracing::trace!(event = name, subscribers = callbacks.len(), "emit");

        for callback in &callbacks {
            callback.invoke(name, payload);
        }
        callbacks.len()
    }

    /// Build a closure that emits `name` with `payload` each time it is called
    ///
    /// Lets a UI callback trigger an event without holding the bus itself.
    /// The closure keeps the bus alive; storing it inside a handler on the
    /// same bus creates a reference cycle.
    pub fn emit_to(&self, name: impl Into<String>, payload: EventPayload) -> impl Fn() + 'static {
        let bus = self.clone();
        let name = name.into();
        move || {
            bus.emit(&name, &payload);
        }
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::shared;
    use std::cell::Cell;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> EventHandler {
        let log = log.clone();
        let tag = tag.to_string();
        Rc::new(move |_: &EventPayload| log.borrow_mut().push(tag.clone()))
    }

    #[test]
    fn test_event_bus_creation() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.emit("items:changed", &EventPayload::Empty), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe_by_id() {
        let bus = EventBus::new();

        let id = bus.on("order:ready", |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe_id(id));
        assert_eq!(bus.subscriber_count(), 0);

        // Double unsubscribe should return false
        assert!(!bus.unsubscribe_id(id));
    }

    #[test]
    fn test_exact_and_pattern_delivery_in_registration_order() {
        let bus = EventBus::new();
        let log = shared(Vec::new());

        bus.subscribe("order.address:change", recorder(&log, "exact"));
        bus.subscribe(
            SubscriptionKey::pattern(r"^(order|contacts)\..*:change").unwrap(),
            recorder(&log, "pattern"),
        );
        bus.subscribe("contacts.email:change", recorder(&log, "other"));

        let count = bus.emit("order.address:change", &EventPayload::Empty);
        assert_eq!(count, 2);
        assert_eq!(*log.borrow(), vec!["exact", "pattern"]);
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handler: EventHandler = Rc::new(move |_: &EventPayload| h.set(h.get() + 1));

        bus.subscribe("basket:open", handler.clone());
        bus.subscribe("basket:open", handler.clone());
        bus.emit("basket:open", &EventPayload::Empty);
        assert_eq!(hits.get(), 2);

        // Removal by identity drops both registrations
        assert!(bus.unsubscribe(&"basket:open".into(), &handler));
        bus.emit("basket:open", &EventPayload::Empty);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_unsubscribe_requires_same_key_and_handler() {
        let bus = EventBus::new();
        let log = shared(Vec::new());
        let first = recorder(&log, "first");
        let second = recorder(&log, "second");

        bus.subscribe("modal:close", first.clone());
        bus.subscribe("modal:close", second.clone());

        assert!(!bus.unsubscribe(&"modal:open".into(), &first));
        assert!(bus.unsubscribe(&"modal:close".into(), &first));

        bus.emit("modal:close", &EventPayload::Empty);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_unsubscribe_all_for_key() {
        let bus = EventBus::new();
        bus.on("a", |_| {});
        bus.on("a", |_| {});
        bus.on("b", |_| {});
        let pattern = SubscriptionKey::pattern("^a").unwrap();
        bus.subscribe(pattern.clone(), Rc::new(|_: &EventPayload| {}));

        assert_eq!(bus.unsubscribe_all(&"a".into()), 2);
        assert_eq!(bus.unsubscribe_all(&pattern), 1);
        assert_eq!(bus.unsubscribe_all(&"missing".into()), 0);
        assert_eq!(bus.subscriber_count(), 1);

        bus.clear();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_all_receives_names() {
        let bus = EventBus::new();
        let seen = shared(Vec::new());
        let s = seen.clone();
        bus.subscribe_all(move |name, _| s.borrow_mut().push(name.to_string()));

        bus.emit("card:select", &EventPayload::Empty);
        bus.emit("modal:open", &EventPayload::Empty);

        assert_eq!(*seen.borrow(), vec!["card:select", "modal:open"]);
    }

    #[test]
    fn test_emit_to_closure() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        bus.on("order:open", move |_| h.set(h.get() + 1));

        let open_order = bus.emit_to("order:open", EventPayload::Empty);
        open_order();
        open_order();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_nested_emit_and_subscribe_during_dispatch() {
        let bus = EventBus::new();
        let log = shared(Vec::new());

        let inner_bus = bus.clone();
        let l = log.clone();
        bus.on("outer", move |_| {
            l.borrow_mut().push("outer".to_string());
            let late = l.clone();
            inner_bus.on("outer", move |_| late.borrow_mut().push("late".to_string()));
            inner_bus.emit("inner", &EventPayload::Empty);
        });
        let l = log.clone();
        bus.on("inner", move |_| l.borrow_mut().push("inner".to_string()));

        // Handlers added during dispatch wait for the next emission
        bus.emit("outer", &EventPayload::Empty);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_keeps_snapshot() {
        let bus = EventBus::new();
        let later: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let runs = Rc::new(Cell::new(0));

        let inner_bus = bus.clone();
        let target = later.clone();
        bus.on("basket:open", move |_| {
            if let Some(id) = target.get() {
                inner_bus.unsubscribe_id(id);
            }
        });
        let r = runs.clone();
        later.set(Some(bus.on("basket:open", move |_| r.set(r.get() + 1))));

        // Removed mid-emission, but this emission already captured it
        assert_eq!(bus.emit("basket:open", &EventPayload::Empty), 2);
        assert_eq!(runs.get(), 1);
        assert_eq!(bus.subscriber_count(), 1);

        assert_eq!(bus.emit("basket:open", &EventPayload::Empty), 1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_panicking_handler_propagates_to_emitter() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let bus = EventBus::new();
        bus.on("order:submit", |_| panic!("handler failed"));
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        bus.on("contacts:submit", move |_| r.set(r.get() + 1));

        let result = catch_unwind(AssertUnwindSafe(|| {
            bus.emit("order:submit", &EventPayload::Empty)
        }));
        assert!(result.is_err());

        // The bus is still usable afterwards
        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(bus.emit("contacts:submit", &EventPayload::Empty), 1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_key_equality() {
        let a = SubscriptionKey::pattern("^order").unwrap();
        let b = SubscriptionKey::pattern("^order").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, SubscriptionKey::from("^order"));
        assert_eq!(SubscriptionKey::All, SubscriptionKey::All);
        assert!(SubscriptionKey::pattern("(").is_err());
    }
}
