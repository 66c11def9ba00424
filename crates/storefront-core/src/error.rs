//! Error handling for the storefront core
//!
//! The core rarely fails: validation problems are reported as
//! [`FormErrors`](crate::model::FormErrors) data, not as errors. The variants
//! here cover malformed input at the edges of the core:
//! - Subscription patterns that do not compile
//! - Field names and payment methods that are not recognized
//! - Checkout stage transitions that are not allowed
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::model::CheckoutStage;

/// Main error type for the storefront core
#[derive(Error, Debug)]
pub enum Error {
    /// A subscription pattern is not a valid regular expression
    #[error("Invalid subscription pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An order field name is not one of the known form fields
    #[error("Unknown order field: {0}")]
    UnknownField(String),

    /// A payment method is not one of the supported methods
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// The checkout cannot move from its current stage on this event
    #[error("Cannot {event} while checkout is at {from}")]
    InvalidTransition {
        /// The stage the checkout was at.
        from: CheckoutStage,
        /// The transition that was requested.
        event: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a rejected checkout transition
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Error::InvalidTransition { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
