//! Event names and payloads carried by the bus.
//!
//! Event names are plain strings so views and the model can agree on them
//! without sharing types; [`names`] lists the ones the storefront uses.
//! Payloads are a closed enum, cloned cheaply because products are shared
//! references.

use crate::model::{FieldChange, FormErrors, OrderConfirmation, OrderDraft, OrderField, ProductRef};

/// Event names exchanged between views, the presenter and the state model
pub mod names {
    /// Catalog was replaced; payload is [`EventPayload::Catalog`](super::EventPayload::Catalog).
    pub const ITEMS_CHANGED: &str = "items:changed";
    /// Delivery form validation ran; payload is the new form errors.
    pub const ORDER_FORM_ERRORS_CHANGED: &str = "orderFormErrors:change";
    /// Contacts form validation ran; payload is the new form errors.
    pub const CONTACTS_FORM_ERRORS_CHANGED: &str = "contactsFormErrors:change";
    /// Contacts form has no errors; payload is the order draft.
    pub const CONTACTS_READY: &str = "contacts:ready";
    /// Delivery form has no errors; payload is the order draft.
    pub const ORDER_READY: &str = "order:ready";

    /// A catalog card was clicked.
    pub const CARD_SELECT: &str = "card:select";
    /// The preview's buy button was clicked.
    pub const CARD_TO_BASKET: &str = "card:toBasket";
    /// The basket button on the page was clicked.
    pub const BASKET_OPEN: &str = "basket:open";
    /// A basket line's delete button was clicked.
    pub const BASKET_DELETE: &str = "basket:delete";
    /// The basket's checkout button was clicked.
    pub const ORDER_OPEN: &str = "order:open";
    /// The delivery form was submitted.
    pub const ORDER_SUBMIT: &str = "order:submit";
    /// The contacts form was submitted.
    pub const CONTACTS_SUBMIT: &str = "contacts:submit";
    /// The server accepted the order; payload is the confirmation.
    pub const ORDER_PLACED: &str = "order:placed";
    /// A modal was shown.
    pub const MODAL_OPEN: &str = "modal:open";
    /// A modal was closed.
    pub const MODAL_CLOSE: &str = "modal:close";

    /// Matches field edits from either checkout form, e.g. `order.address:change`.
    pub const FIELD_CHANGE_PATTERN: &str = r"^(order|contacts)\..*:change";
}

/// Name of the event a form emits when one of its fields is edited
///
/// `form` is the form's name (`order` or `contacts`).
pub fn field_change_event(form: &str, field: OrderField) -> String {
    format!("{}.{}:change", form, field)
}

/// Data delivered with an emission
#[derive(Debug, Clone, Default)]
pub enum EventPayload {
    /// No data.
    #[default]
    Empty,
    /// The full catalog.
    Catalog(Vec<ProductRef>),
    /// A single product, shared with the catalog.
    Product(ProductRef),
    /// Result of a validation pass.
    FormErrors(FormErrors),
    /// Snapshot of the order draft.
    Order(OrderDraft),
    /// A form field edit.
    FieldChange(FieldChange),
    /// Server response to a placed order.
    OrderPlaced(OrderConfirmation),
}

impl EventPayload {
    /// Get a short description of this payload for logging
    pub fn description(&self) -> String {
        match self {
            EventPayload::Empty => "-".to_string(),
            EventPayload::Catalog(items) => format!("{} catalog items", items.len()),
            EventPayload::Product(item) => format!("product {}", item.borrow().id),
            EventPayload::FormErrors(errors) if errors.is_empty() => "no errors".to_string(),
            EventPayload::FormErrors(errors) => errors.summary(),
            EventPayload::Order(order) => format!(
                "order of {} item(s), total {:?}",
                order.items.len(),
                order.total
            ),
            EventPayload::FieldChange(change) => {
                format!("{} = {:?}", change.field, change.value)
            }
            EventPayload::OrderPlaced(confirmation) => {
                format!("order placed, total {}", confirmation.total)
            }
        }
    }

    /// The catalog, if this payload carries one
    pub fn as_catalog(&self) -> Option<&[ProductRef]> {
        match self {
            EventPayload::Catalog(items) => Some(items),
            _ => None,
        }
    }

    /// The product, if this payload carries one
    pub fn as_product(&self) -> Option<&ProductRef> {
        match self {
            EventPayload::Product(item) => Some(item),
            _ => None,
        }
    }

    /// The form errors, if this payload carries them
    pub fn as_form_errors(&self) -> Option<&FormErrors> {
        match self {
            EventPayload::FormErrors(errors) => Some(errors),
            _ => None,
        }
    }

    /// The order draft, if this payload carries one
    pub fn as_order(&self) -> Option<&OrderDraft> {
        match self {
            EventPayload::Order(order) => Some(order),
            _ => None,
        }
    }

    /// The field edit, if this payload carries one
    pub fn as_field_change(&self) -> Option<&FieldChange> {
        match self {
            EventPayload::FieldChange(change) => Some(change),
            _ => None,
        }
    }

    /// The order confirmation, if this payload carries one
    pub fn as_order_placed(&self) -> Option<&OrderConfirmation> {
        match self {
            EventPayload::OrderPlaced(confirmation) => Some(confirmation),
            _ => None,
        }
    }
}
