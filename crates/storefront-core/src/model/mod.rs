//! State model for the storefront
//!
//! This module provides:
//! - Products shared between catalog and basket
//! - The order draft and its form fields
//! - Per-field validation messages
//! - The observable base and the application state built on it
//! - The checkout stage machine

pub mod app_state;
pub mod checkout;
pub mod form_errors;
pub mod observable;
pub mod order;
pub mod product;

pub use app_state::{
    AppState, InitialState, ADDRESS_REQUIRED, CONTACTS_FORM_FIELDS, EMAIL_REQUIRED,
    ORDER_FORM_FIELDS, PAYMENT_REQUIRED, PHONE_REQUIRED,
};
pub use checkout::{CheckoutStage, CheckoutTransition};
pub use form_errors::FormErrors;
pub use observable::{Observable, ObservableState};
pub use order::{FieldChange, OrderConfirmation, OrderDraft, OrderField, PaymentMethod};
pub use product::{ProductItem, ProductRef};
