//! # Event Bus Module
//!
//! Mediator between the state model and the views. Neither side holds a
//! reference to the other: views emit intents, the model reacts and emits
//! change events, and views re-render from those.
//!
//! ## Overview
//!
//! - Subscriptions are keyed by an exact event name, a regular expression,
//!   or [`SubscriptionKey::All`] for diagnostics
//! - Dispatch is synchronous and in registration order
//! - The bus is a cloneable handle passed to whoever needs it; there is no
//!   global instance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::event_bus::{names, EventBus, EventPayload, SubscriptionKey};
//!
//! let bus = EventBus::new();
//!
//! // Exact name
//! bus.on(names::ORDER_READY, |payload| {
//!     if let Some(order) = payload.as_order() {
//!         println!("order ready: {:?}", order);
//!     }
//! });
//!
//! // Any field edit in either checkout form
//! bus.on(SubscriptionKey::pattern(names::FIELD_CHANGE_PATTERN)?, |payload| {
//!     println!("field edited: {}", payload.description());
//! });
//!
//! bus.emit(names::BASKET_OPEN, &EventPayload::Empty);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
