//! Console view
//!
//! Renders the storefront as log lines. Used by the binary, which has no
//! graphical front end.

use std::cell::Cell;

use storefront_presenter::{BasketView, CardView, FormState, ModalContent, StorefrontView};
use tracing::info;

/// View that logs what a graphical front end would draw
#[derive(Debug, Default)]
pub struct ConsoleView {
    modal_open: Cell<bool>,
}

impl ConsoleView {
    /// Create a console view
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a modal is currently showing
    pub fn modal_open(&self) -> bool {
        self.modal_open.get()
    }

    fn log_basket(basket: &BasketView) {
        if let Some(empty) = &basket.empty_label {
            info!("Basket: {}", empty);
            return;
        }
        for line in &basket.lines {
            info!("  {}. {} - {}", line.index, line.title, line.price_label);
        }
        info!(
            "Basket total: {} (checkout {})",
            basket.total_label,
            if basket.checkout_enabled { "enabled" } else { "disabled" }
        );
    }
}

impl StorefrontView for ConsoleView {
    fn render_catalog(&self, cards: &[CardView]) {
        info!("Catalog: {} products", cards.len());
        for card in cards {
            info!("  [{}] {} ({}) - {}", card.id, card.title, card.category, card.price_label);
        }
    }

    fn set_basket_counter(&self, count: usize) {
        info!("Basket counter: {}", count);
    }

    fn render_modal(&self, content: &ModalContent) {
        self.modal_open.set(true);
        match content {
            ModalContent::Preview(card) => {
                info!("Preview: {} - {}", card.title, card.price_label);
            }
            ModalContent::Basket(basket) => Self::log_basket(basket),
            ModalContent::OrderForm(_) => info!("Delivery form opened"),
            ModalContent::ContactsForm(_) => info!("Contacts form opened"),
            ModalContent::Success { description, .. } => info!("Order placed. {}", description),
        }
    }

    fn update_basket(&self, basket: &BasketView) {
        Self::log_basket(basket);
    }

    fn close_modal(&self) {
        self.modal_open.set(false);
    }

    fn set_order_form(&self, state: &FormState) {
        if !state.valid {
            info!("Delivery form: {}", state.errors);
        }
    }

    fn set_contacts_form(&self, state: &FormState) {
        if !state.valid {
            info!("Contacts form: {}", state.errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_tracking() {
        let view = ConsoleView::new();
        assert!(!view.modal_open());

        view.render_modal(&ModalContent::OrderForm(FormState::default()));
        assert!(view.modal_open());

        view.close_modal();
        assert!(!view.modal_open());
    }
}
