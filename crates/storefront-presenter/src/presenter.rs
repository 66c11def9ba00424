//! Storefront presenter
//!
//! Subscribes the storefront's handlers on the bus. View intents become
//! state mutations, state change events become view updates, and network
//! calls are queued for [`Storefront::process_requests`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::Context;
use storefront_api::ShopApi;
use storefront_core::model::{CONTACTS_FORM_FIELDS, ORDER_FORM_FIELDS};
use storefront_core::{
    names, AppState, CheckoutStage, CheckoutTransition, EventBus, EventPayload, InitialState,
    OrderConfirmation, OrderDraft, OrderField, SubscriptionId, SubscriptionKey,
};
use storefront_settings::ShopSettings;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::view::{BasketLine, BasketView, CardView, FormState, ModalContent, StorefrontView};

/// Network work queued by event handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopRequest {
    /// Load the catalog
    FetchCatalog,
    /// Submit an order draft
    PlaceOrder(OrderDraft),
}

type Handler = fn(&Inner, &EventPayload);

struct Inner {
    state: AppState,
    events: EventBus,
    api: Rc<dyn ShopApi>,
    view: Rc<dyn StorefrontView>,
    shop: ShopSettings,
    stage: Cell<CheckoutStage>,
    requests: UnboundedSender<ShopRequest>,
    pending: RefCell<UnboundedReceiver<ShopRequest>>,
    subscriptions: RefCell<Vec<SubscriptionId>>,
}

/// The storefront application: state, handlers and request queue
///
/// Single-threaded. Drive the queued network requests by awaiting
/// [`Storefront::process_requests`] on the same thread.
pub struct Storefront {
    inner: Rc<Inner>,
}

impl Storefront {
    /// Create the state on `events` and subscribe every handler
    pub fn new(
        events: EventBus,
        api: Rc<dyn ShopApi>,
        view: Rc<dyn StorefrontView>,
        shop: ShopSettings,
    ) -> storefront_core::Result<Self> {
        let (requests, pending) = mpsc::unbounded_channel();
        let inner = Rc::new(Inner {
            state: AppState::new(InitialState::default(), events.clone()),
            events,
            api,
            view,
            shop,
            stage: Cell::new(CheckoutStage::Browsing),
            requests,
            pending: RefCell::new(pending),
            subscriptions: RefCell::new(Vec::new()),
        });
        Inner::wire(&inner)?;
        Ok(Self { inner })
    }

    /// The application state
    pub fn state(&self) -> &AppState {
        &self.inner.state
    }

    /// The bus views emit their intents on
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Current checkout stage
    pub fn stage(&self) -> CheckoutStage {
        self.inner.stage.get()
    }

    /// Labels used for prices and the basket
    pub fn shop(&self) -> &ShopSettings {
        &self.inner.shop
    }

    /// Basket as it would be rendered now
    pub fn basket_view(&self) -> BasketView {
        self.inner.basket_view()
    }

    /// Queue a catalog fetch
    pub fn request_catalog(&self) {
        self.inner.queue(ShopRequest::FetchCatalog);
    }

    /// Run queued requests until the queue is empty
    ///
    /// Requests queued while processing are run too. A failed request is
    /// logged and leaves the state as it was. Returns how many requests ran.
    pub async fn process_requests(&self) -> usize {
        let mut handled = 0;
        loop {
            let next = self.inner.pending.borrow_mut().try_recv();
            let Ok(request) = next else {
                break;
            };
            if let Err(e) = self.inner.run(request).await {
                error!("{:#}", e);
            }
            handled += 1;
        }
        handled
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("state", &self.inner.state)
            .field("stage", &self.inner.stage.get())
            .finish()
    }
}

impl Inner {
    fn wire(inner: &Rc<Self>) -> storefront_core::Result<()> {
        let diagnostics = inner.events.subscribe_all(|name, payload| {
            debug!("Event {}: {}", name, payload.description());
        });
        inner.subscriptions.borrow_mut().push(diagnostics);

        Self::bind(inner, names::ITEMS_CHANGED, Self::on_items_changed);
        Self::bind(inner, names::CARD_SELECT, Self::on_card_select);
        Self::bind(inner, names::CARD_TO_BASKET, Self::on_card_to_basket);
        Self::bind(inner, names::BASKET_OPEN, Self::on_basket_open);
        Self::bind(inner, names::BASKET_DELETE, Self::on_basket_delete);
        Self::bind(inner, names::ORDER_OPEN, Self::on_order_open);
        Self::bind(inner, names::ORDER_FORM_ERRORS_CHANGED, Self::on_order_errors);
        Self::bind(inner, names::CONTACTS_FORM_ERRORS_CHANGED, Self::on_contacts_errors);
        Self::bind(
            inner,
            SubscriptionKey::pattern(names::FIELD_CHANGE_PATTERN)?,
            Self::on_field_change,
        );
        Self::bind(inner, names::ORDER_READY, Self::on_order_ready);
        Self::bind(inner, names::CONTACTS_READY, Self::on_contacts_ready);
        Self::bind(inner, names::ORDER_SUBMIT, Self::on_order_submit);
        Self::bind(inner, names::CONTACTS_SUBMIT, Self::on_contacts_submit);
        Self::bind(inner, names::MODAL_OPEN, Self::on_modal_open);
        Self::bind(inner, names::MODAL_CLOSE, Self::on_modal_close);
        Ok(())
    }

    fn bind(inner: &Rc<Self>, key: impl Into<SubscriptionKey>, handler: Handler) {
        let weak: Weak<Self> = Rc::downgrade(inner);
        let id = inner.events.on(key, move |payload| {
            if let Some(inner) = weak.upgrade() {
                handler(&inner, payload);
            }
        });
        inner.subscriptions.borrow_mut().push(id);
    }

    fn queue(&self, request: ShopRequest) {
        debug!("Queued {:?}", request);
        if self.requests.send(request).is_err() {
            error!("Request queue is closed");
        }
    }

    fn advance(&self, transition: CheckoutTransition) -> bool {
        let from = self.stage.get();
        match from.apply(transition) {
            Ok(to) => {
                if to != from {
                    debug!("Checkout {} -> {}", from, to);
                }
                self.stage.set(to);
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    fn open_modal(&self, content: ModalContent) {
        self.view.render_modal(&content);
        self.events.emit(names::MODAL_OPEN, &EventPayload::Empty);
    }

    fn close_modal(&self) {
        self.view.close_modal();
        self.events.emit(names::MODAL_CLOSE, &EventPayload::Empty);
    }

    fn basket_view(&self) -> BasketView {
        let lines: Vec<BasketLine> = self
            .state
            .basket_items()
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let item = item.borrow();
                BasketLine {
                    id: item.id.clone(),
                    index: item.index.unwrap_or(position + 1),
                    title: item.title.clone(),
                    price_label: self.shop.format_price(item.price),
                }
            })
            .collect();
        let total = self.state.basket_total_price();
        let empty_label = lines
            .is_empty()
            .then(|| self.shop.empty_basket_label.clone());

        BasketView {
            checkout_enabled: !lines.is_empty() && total >= 1,
            total_label: self.shop.format_amount(total),
            total,
            empty_label,
            lines,
        }
    }

    async fn run(&self, request: ShopRequest) -> anyhow::Result<()> {
        match request {
            ShopRequest::FetchCatalog => {
                let items = self
                    .api
                    .product_list()
                    .await
                    .context("Failed to load the catalog")?;
                info!("Loaded {} products", items.len());
                self.state.set_catalog(items);
            }
            ShopRequest::PlaceOrder(order) => match self.api.place_order(&order).await {
                Ok(confirmation) => self.complete_order(confirmation),
                Err(e) => {
                    self.advance(CheckoutTransition::SubmissionFailed);
                    return Err(anyhow::Error::new(e).context("Failed to place the order"));
                }
            },
        }
        Ok(())
    }

    fn complete_order(&self, confirmation: OrderConfirmation) {
        info!(
            "Order {} placed for {}",
            confirmation.id.as_deref().unwrap_or("-"),
            confirmation.total
        );
        self.state.reset_basket();
        self.state.reset_order();
        self.state.reset_selected();
        self.view.set_basket_counter(0);
        self.advance(CheckoutTransition::SubmissionSucceeded);

        let total = confirmation.total;
        self.events
            .emit(names::ORDER_PLACED, &EventPayload::OrderPlaced(confirmation));
        self.open_modal(ModalContent::Success {
            total,
            description: format!("Charged {}", self.shop.format_amount(total)),
        });
    }

    // ---------------------------------------------------------------------
    // Handlers
    // ---------------------------------------------------------------------

    fn on_items_changed(&self, _payload: &EventPayload) {
        let cards: Vec<CardView> = self
            .state
            .catalog()
            .iter()
            .map(|item| CardView::from_product(&item.borrow(), &self.shop))
            .collect();
        self.view.render_catalog(&cards);
    }

    fn on_card_select(&self, payload: &EventPayload) {
        let Some(item) = payload.as_product() else {
            warn!("{} without a product", names::CARD_SELECT);
            return;
        };
        let card = CardView::from_product(&item.borrow(), &self.shop);
        self.open_modal(ModalContent::Preview(card));
    }

    fn on_card_to_basket(&self, payload: &EventPayload) {
        let Some(item) = payload.as_product() else {
            warn!("{} without a product", names::CARD_TO_BASKET);
            return;
        };
        item.borrow_mut().selected = true;
        self.state.add_to_basket(item.clone());
        self.view.set_basket_counter(self.state.basket_amount());
        self.close_modal();
    }

    fn on_basket_open(&self, _payload: &EventPayload) {
        self.state.reset_indexes();
        self.open_modal(ModalContent::Basket(self.basket_view()));
    }

    fn on_basket_delete(&self, payload: &EventPayload) {
        let Some(item) = payload.as_product() else {
            warn!("{} without a product", names::BASKET_DELETE);
            return;
        };
        let id = {
            let mut item = item.borrow_mut();
            item.selected = false;
            item.id.clone()
        };
        self.state.remove_from_basket(&id);
        self.state.reset_indexes();
        self.view.set_basket_counter(self.state.basket_amount());
        self.view.update_basket(&self.basket_view());
    }

    fn on_order_open(&self, _payload: &EventPayload) {
        if self.advance(CheckoutTransition::OpenOrderForm) {
            self.open_modal(ModalContent::OrderForm(FormState::default()));
        }
    }

    fn on_order_errors(&self, payload: &EventPayload) {
        let Some(errors) = payload.as_form_errors() else {
            return;
        };
        let form = FormState::from_errors(errors, &ORDER_FORM_FIELDS);
        self.advance(CheckoutTransition::OrderValidated { valid: form.valid });
        self.view.set_order_form(&form);
    }

    fn on_contacts_errors(&self, payload: &EventPayload) {
        let Some(errors) = payload.as_form_errors() else {
            return;
        };
        let form = FormState::from_errors(errors, &CONTACTS_FORM_FIELDS);
        self.advance(CheckoutTransition::ContactsValidated { valid: form.valid });
        self.view.set_contacts_form(&form);
    }

    fn on_field_change(&self, payload: &EventPayload) {
        let Some(change) = payload.as_field_change() else {
            warn!("Field change event without a field");
            return;
        };
        match change.field.parse::<OrderField>() {
            Ok(field) => self.state.set_order_field(field, &change.value),
            Err(e) => warn!("Ignoring field edit: {}", e),
        }
    }

    fn on_order_ready(&self, _payload: &EventPayload) {
        self.advance(CheckoutTransition::OrderValidated { valid: true });
    }

    fn on_contacts_ready(&self, _payload: &EventPayload) {
        self.advance(CheckoutTransition::ContactsValidated { valid: true });
    }

    fn on_order_submit(&self, _payload: &EventPayload) {
        if !self.advance(CheckoutTransition::SubmitOrderForm) {
            return;
        }
        self.state.set_items();
        self.state.set_order_total();
        self.open_modal(ModalContent::ContactsForm(FormState::default()));
    }

    fn on_contacts_submit(&self, _payload: &EventPayload) {
        if self.advance(CheckoutTransition::SubmitContacts) {
            self.queue(ShopRequest::PlaceOrder(self.state.order()));
        }
    }

    fn on_modal_open(&self, _payload: &EventPayload) {
        self.view.set_page_locked(true);
    }

    fn on_modal_close(&self, _payload: &EventPayload) {
        self.view.set_page_locked(false);
        self.state.reset_order();
        self.view.reset_order_form();
        self.advance(CheckoutTransition::Close);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for id in self.subscriptions.get_mut().drain(..) {
            self.events.unsubscribe_id(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_api::MemoryShopApi;
    use storefront_core::{FieldChange, ProductItem};

    struct NullView;

    impl StorefrontView for NullView {}

    fn storefront() -> Storefront {
        let api = MemoryShopApi::new(vec![
            ProductItem::new("a", "Book", Some(750)),
            ProductItem::new("b", "Box", None),
        ]);
        Storefront::new(
            EventBus::new(),
            Rc::new(api),
            Rc::new(NullView),
            ShopSettings::default(),
        )
        .expect("presenter")
    }

    #[test]
    fn test_dropping_presenter_unsubscribes() {
        let events = EventBus::new();
        let storefront = Storefront::new(
            events.clone(),
            Rc::new(MemoryShopApi::default()),
            Rc::new(NullView),
            ShopSettings::default(),
        )
        .unwrap();
        assert!(events.subscriber_count() > 0);

        drop(storefront);
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn test_submit_out_of_order_is_ignored() {
        let storefront = storefront();
        storefront.events().emit(names::ORDER_SUBMIT, &EventPayload::Empty);
        assert_eq!(storefront.stage(), CheckoutStage::Browsing);
        assert!(storefront.state().order().items.is_empty());

        storefront.events().emit(names::CONTACTS_SUBMIT, &EventPayload::Empty);
        assert_eq!(storefront.stage(), CheckoutStage::Browsing);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let storefront = storefront();
        let before = storefront.state().order();
        storefront.events().emit(
            "order.zip:change",
            &EventPayload::FieldChange(FieldChange::new("zip", "12345")),
        );
        assert_eq!(storefront.state().order(), before);
    }

    #[tokio::test]
    async fn test_catalog_request() {
        let storefront = storefront();
        storefront.request_catalog();
        assert_eq!(storefront.process_requests().await, 1);
        assert_eq!(storefront.state().catalog().len(), 2);
        assert_eq!(storefront.process_requests().await, 0);
    }
}
