//! # Storefront Presenter
//!
//! Wires the storefront together: subscribes handlers on the event bus,
//! turns view intents into state operations, turns state change events into
//! view updates, and runs catalog and order requests against a
//! [`ShopApi`](storefront_api::ShopApi).

pub mod presenter;
pub mod view;

pub use presenter::{ShopRequest, Storefront};
pub use view::{BasketLine, BasketView, CardView, FormState, ModalContent, StorefrontView};
