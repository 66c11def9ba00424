//! View interface
//!
//! Defines what the presenter asks of the rendering layer, and the plain
//! data it hands over. Implementations forward user actions back by
//! emitting on the presenter's event bus.

use storefront_core::{FormErrors, OrderField, ProductItem};
use storefront_settings::ShopSettings;

/// A product as a catalog card or preview shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    /// Price text, or the priceless label
    pub price_label: String,
    /// Whether the product is already in the basket
    pub selected: bool,
}

impl CardView {
    /// Build the card for `item` using the shop's labels
    pub fn from_product(item: &ProductItem, shop: &ShopSettings) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            category: item.category.clone(),
            image: item.image.clone(),
            description: item.description.clone(),
            price_label: shop.format_price(item.price),
            selected: item.selected,
        }
    }

    /// Whether the preview's buy button is enabled
    pub fn can_buy(&self) -> bool {
        !self.selected
    }
}

/// One numbered basket line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketLine {
    pub id: String,
    /// 1-based position
    pub index: usize,
    pub title: String,
    pub price_label: String,
}

/// Basket contents as the basket modal shows them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketView {
    pub lines: Vec<BasketLine>,
    pub total: u64,
    pub total_label: String,
    /// Whether the checkout button is enabled
    pub checkout_enabled: bool,
    /// Placeholder shown instead of lines when the basket is empty
    pub empty_label: Option<String>,
}

impl BasketView {
    /// Whether the empty-state placeholder is showing
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Validity and error text of a checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Whether the submit button is enabled
    pub valid: bool,
    /// Messages for the form's fields joined with `" | "`
    pub errors: String,
}

impl FormState {
    /// Form state for `fields` given the latest validation result
    pub fn from_errors(errors: &FormErrors, fields: &[OrderField]) -> Self {
        Self {
            valid: errors.is_valid_for(fields),
            errors: errors.summary_for(fields),
        }
    }
}

/// What the modal displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// Product details with a buy button
    Preview(CardView),
    /// Basket lines and total
    Basket(BasketView),
    /// Payment method and delivery address
    OrderForm(FormState),
    /// Email and phone
    ContactsForm(FormState),
    /// Purchase confirmation
    Success {
        /// Amount the server charged
        total: u64,
        /// Text describing the charge
        description: String,
    },
}

/// Rendering side of the storefront
///
/// All methods have empty default implementations so a view only overrides
/// what it displays.
pub trait StorefrontView {
    /// Show the catalog cards on the page
    fn render_catalog(&self, _cards: &[CardView]) {}

    /// Update the basket counter on the page
    fn set_basket_counter(&self, _count: usize) {}

    /// Open the modal with `content`
    fn render_modal(&self, _content: &ModalContent) {}

    /// Redraw the basket inside an already open modal
    fn update_basket(&self, _basket: &BasketView) {}

    /// Close the modal
    fn close_modal(&self) {}

    /// Lock or unlock page scrolling while a modal is open
    fn set_page_locked(&self, _locked: bool) {}

    /// Refresh the delivery form's validity and errors
    fn set_order_form(&self, _state: &FormState) {}

    /// Refresh the contacts form's validity and errors
    fn set_contacts_form(&self, _state: &FormState) {}

    /// Clear the delivery form's inputs and payment buttons
    fn reset_order_form(&self) {}
}
