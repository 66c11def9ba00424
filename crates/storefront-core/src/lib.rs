//! # Storefront Core
//!
//! Mediator between the storefront's state and its views.
//! Provides the event bus, the observable state base, the application
//! state with its validation rules, and the checkout stage machine.

pub mod error;
pub mod event_bus;
pub mod model;
pub mod types;

pub use error::{Error, Result};

pub use event_bus::{
    field_change_event, names, EventBus, EventHandler, EventPayload, SubscriptionId,
    SubscriptionKey, WildcardHandler,
};

pub use model::{
    AppState, CheckoutStage, CheckoutTransition, FieldChange, FormErrors, InitialState,
    Observable, ObservableState, OrderConfirmation, OrderDraft, OrderField, PaymentMethod,
    ProductItem, ProductRef,
};

pub use types::{shared, shared_vec, Shared, SharedVec};
