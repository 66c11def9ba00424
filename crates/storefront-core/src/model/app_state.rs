//! Application state: catalog, basket, order draft and form errors.
//!
//! All operations take `&self`. Interior borrows are released before any
//! event is emitted, so handlers may query the state while it notifies them.

use std::cell::RefCell;

use super::form_errors::FormErrors;
use super::observable::{Observable, ObservableState};
use super::order::{OrderDraft, OrderField};
use super::product::{ProductItem, ProductRef};
use crate::event_bus::{names, EventBus, EventPayload};
use crate::types::SharedVec;

/// Message for a missing payment method
pub const PAYMENT_REQUIRED: &str = "Select a payment method";
/// Message for a missing delivery address
pub const ADDRESS_REQUIRED: &str = "Enter a delivery address";
/// Message for a missing email
pub const EMAIL_REQUIRED: &str = "Enter an email address";
/// Message for a missing phone number
pub const PHONE_REQUIRED: &str = "Enter a phone number";

/// Fields of the delivery form
pub const ORDER_FORM_FIELDS: [OrderField; 2] = [OrderField::Payment, OrderField::Address];
/// Fields of the contacts form
pub const CONTACTS_FORM_FIELDS: [OrderField; 2] = [OrderField::Email, OrderField::Phone];

/// Field values an [`AppState`] starts with
#[derive(Debug, Clone, Default)]
pub struct InitialState {
    /// Initial catalog
    pub catalog: Vec<ProductRef>,
    /// Initial basket contents
    pub basket: Vec<ProductRef>,
    /// Initial order draft
    pub order: OrderDraft,
}

/// The storefront's state entity
pub struct AppState {
    base: ObservableState,
    catalog: RefCell<Vec<ProductRef>>,
    basket: SharedVec<ProductRef>,
    order: RefCell<OrderDraft>,
    form_errors: RefCell<FormErrors>,
}

impl Observable for AppState {
    fn observable(&self) -> &ObservableState {
        &self.base
    }
}

impl AppState {
    /// Create the state from initial values, emitting on `events`
    ///
    /// Construction does not emit anything.
    pub fn new(initial: InitialState, events: EventBus) -> Self {
        Self {
            base: ObservableState::new(events),
            catalog: RefCell::new(initial.catalog),
            basket: std::rc::Rc::new(RefCell::new(initial.basket)),
            order: RefCell::new(initial.order),
            form_errors: RefCell::new(FormErrors::new()),
        }
    }

    // ---------------------------------------------------------------------
    // Catalog
    // ---------------------------------------------------------------------

    /// Replace the catalog and emit `items:changed` with it
    ///
    /// An empty catalog is still announced.
    pub fn set_catalog(&self, items: Vec<ProductItem>) {
        let catalog: Vec<ProductRef> = items.into_iter().map(ProductItem::into_shared).collect();
        *self.catalog.borrow_mut() = catalog.clone();
        tracing::debug!("Catalog replaced with {} items", catalog.len());
        self.emit_changes(names::ITEMS_CHANGED, EventPayload::Catalog(catalog));
    }

    /// Current catalog, sharing products with the state
    pub fn catalog(&self) -> Vec<ProductRef> {
        self.catalog.borrow().clone()
    }

    /// Look up a catalog product by id
    pub fn product(&self, id: &str) -> Option<ProductRef> {
        self.catalog
            .borrow()
            .iter()
            .find(|item| item.borrow().id == id)
            .cloned()
    }

    /// Clear `selected` on every catalog product
    pub fn reset_selected(&self) {
        for item in self.catalog.borrow().iter() {
            item.borrow_mut().selected = false;
        }
    }

    // ---------------------------------------------------------------------
    // Basket
    // ---------------------------------------------------------------------

    /// Append a product to the basket
    ///
    /// The caller marks the product `selected` and refreshes its views; no
    /// event is emitted. A product whose id is already in the basket is not
    /// added again and `false` is returned.
    pub fn add_to_basket(&self, item: ProductRef) -> bool {
        let id = item.borrow().id.clone();
        let mut basket = self.basket.borrow_mut();
        if basket.iter().any(|entry| entry.borrow().id == id) {
            tracing::debug!("Product {} already in basket", id);
            return false;
        }
        basket.push(item);
        true
    }

    /// Remove the basket entry with `id`
    ///
    /// No event is emitted and the remaining entries keep their old indexes
    /// until [`AppState::reset_indexes`] is called.
    pub fn remove_from_basket(&self, id: &str) -> bool {
        let mut basket = self.basket.borrow_mut();
        match basket.iter().position(|entry| entry.borrow().id == id) {
            Some(position) => {
                let removed = basket.remove(position);
                removed.borrow_mut().index = None;
                true
            }
            None => false,
        }
    }

    /// Renumber basket entries 1..N in their current order
    pub fn reset_indexes(&self) {
        for (position, item) in self.basket.borrow().iter().enumerate() {
            item.borrow_mut().index = Some(position + 1);
        }
    }

    /// Empty the basket in place
    ///
    /// The shared sequence returned by [`AppState::basket`] stays the same
    /// object, so existing holders see it empty.
    pub fn reset_basket(&self) {
        let mut basket = self.basket.borrow_mut();
        for item in basket.iter() {
            item.borrow_mut().index = None;
        }
        basket.clear();
    }

    /// The basket sequence itself
    pub fn basket(&self) -> SharedVec<ProductRef> {
        self.basket.clone()
    }

    /// Snapshot of the basket entries
    pub fn basket_items(&self) -> Vec<ProductRef> {
        self.basket.borrow().clone()
    }

    /// Whether a product with `id` is in the basket
    pub fn is_in_basket(&self, id: &str) -> bool {
        self.basket.borrow().iter().any(|entry| entry.borrow().id == id)
    }

    /// Number of basket entries
    pub fn basket_amount(&self) -> usize {
        self.basket.borrow().len()
    }

    /// Sum of basket prices, priceless products counting as 0
    ///
    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn basket_total_price(&self) -> u64 {
        self.basket
            .borrow()
            .iter()
            .map(|item| item.borrow().price.unwrap_or(0))
            .fold(0u64, |total, price| total.saturating_add(price))
    }

    // ---------------------------------------------------------------------
    // Order draft
    // ---------------------------------------------------------------------

    /// Fill `order.items` with the ids of priced basket entries, in basket order
    pub fn set_items(&self) {
        let items: Vec<String> = self
            .basket
            .borrow()
            .iter()
            .filter_map(|item| {
                let item = item.borrow();
                item.price.map(|_| item.id.clone())
            })
            .collect();
        self.order.borrow_mut().items = items;
    }

    /// Set `order.total` to the current basket total
    pub fn set_order_total(&self) {
        let total = self.basket_total_price();
        self.order.borrow_mut().total = Some(total);
    }

    /// Store a field value, then run both validation passes
    ///
    /// Contacts are validated first, then the delivery form, whichever form
    /// the field belongs to. Each pass that finds no errors emits its
    /// readiness event (`contacts:ready`, `order:ready`) with the draft.
    pub fn set_order_field(&self, field: OrderField, value: &str) {
        {
            let mut order = self.order.borrow_mut();
            match field {
                OrderField::Payment => {
                    order.payment = if value.is_empty() {
                        None
                    } else {
                        match value.parse() {
                            Ok(method) => Some(method),
                            Err(e) => {
                                tracing::warn!("{}", e);
                                None
                            }
                        }
                    };
                }
                OrderField::Address => order.address = value.to_string(),
                OrderField::Email => order.email = value.to_string(),
                OrderField::Phone => order.phone = value.to_string(),
            }
        }

        if self.validate_contacts() {
            self.emit_changes(names::CONTACTS_READY, EventPayload::Order(self.order()));
        }

        if self.validate_order() {
            self.emit_changes(names::ORDER_READY, EventPayload::Order(self.order()));
        }
    }

    /// Validate the delivery form fields
    ///
    /// Replaces the form errors with this pass's result, emits
    /// `orderFormErrors:change`, and returns whether there were no errors.
    pub fn validate_order(&self) -> bool {
        let mut errors = FormErrors::new();
        {
            let order = self.order.borrow();
            if order.payment.is_none() {
                errors.insert(OrderField::Payment, PAYMENT_REQUIRED);
            }
            if order.address.is_empty() {
                errors.insert(OrderField::Address, ADDRESS_REQUIRED);
            }
        }
        self.publish_errors(names::ORDER_FORM_ERRORS_CHANGED, errors)
    }

    /// Validate the contacts form fields
    ///
    /// Replaces the form errors with this pass's result, emits
    /// `contactsFormErrors:change`, and returns whether there were no errors.
    pub fn validate_contacts(&self) -> bool {
        let mut errors = FormErrors::new();
        {
            let order = self.order.borrow();
            if order.email.is_empty() {
                errors.insert(OrderField::Email, EMAIL_REQUIRED);
            }
            if order.phone.is_empty() {
                errors.insert(OrderField::Phone, PHONE_REQUIRED);
            }
        }
        self.publish_errors(names::CONTACTS_FORM_ERRORS_CHANGED, errors)
    }

    fn publish_errors(&self, event: &str, errors: FormErrors) -> bool {
        let valid = errors.is_empty();
        *self.form_errors.borrow_mut() = errors.clone();
        self.emit_changes(event, EventPayload::FormErrors(errors));
        valid
    }

    /// Replace the order draft with an empty one
    pub fn reset_order(&self) {
        *self.order.borrow_mut() = OrderDraft::default();
    }

    /// Snapshot of the order draft
    pub fn order(&self) -> OrderDraft {
        self.order.borrow().clone()
    }

    /// Errors from the most recent validation pass
    pub fn form_errors(&self) -> FormErrors {
        self.form_errors.borrow().clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog.borrow().len())
            .field("basket", &self.basket.borrow().len())
            .field("order", &self.order.borrow())
            .field("form_errors", &self.form_errors.borrow())
            .finish()
    }
}
