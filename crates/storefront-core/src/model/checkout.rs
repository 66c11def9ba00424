//! Checkout progression.
//!
//! ```text
//! Browsing -> OrderForm <-> OrderFormValid -> ContactsForm <-> ContactsFormValid
//!     ^                                                              |
//!     |                        success                               v
//!     +--------------------------------------------------------- Submitted
//! ```
//!
//! A failed submission returns to `ContactsFormValid` with the draft intact.
//! Closing the modal returns to `Browsing` from anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Where the user is in the checkout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Looking at the catalog or basket
    #[default]
    Browsing,
    /// Delivery form open with errors
    OrderForm,
    /// Delivery form open and complete
    OrderFormValid,
    /// Contacts form open with errors
    ContactsForm,
    /// Contacts form open and complete
    ContactsFormValid,
    /// Order sent, waiting for the server
    Submitted,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browsing => write!(f, "browsing"),
            Self::OrderForm => write!(f, "order form"),
            Self::OrderFormValid => write!(f, "valid order form"),
            Self::ContactsForm => write!(f, "contacts form"),
            Self::ContactsFormValid => write!(f, "valid contacts form"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// Something that moves the checkout along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutTransition {
    /// The delivery form was opened from the basket
    OpenOrderForm,
    /// The delivery form was validated
    OrderValidated {
        /// Whether the pass found no errors
        valid: bool,
    },
    /// The delivery form was submitted
    SubmitOrderForm,
    /// The contacts form was validated
    ContactsValidated {
        /// Whether the pass found no errors
        valid: bool,
    },
    /// The contacts form was submitted
    SubmitContacts,
    /// The server accepted the order
    SubmissionSucceeded,
    /// The order could not be placed
    SubmissionFailed,
    /// The modal was closed
    Close,
}

impl fmt::Display for CheckoutTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenOrderForm => write!(f, "open order form"),
            Self::OrderValidated { .. } => write!(f, "validate order form"),
            Self::SubmitOrderForm => write!(f, "submit order form"),
            Self::ContactsValidated { .. } => write!(f, "validate contacts"),
            Self::SubmitContacts => write!(f, "submit contacts"),
            Self::SubmissionSucceeded => write!(f, "complete submission"),
            Self::SubmissionFailed => write!(f, "fail submission"),
            Self::Close => write!(f, "close"),
        }
    }
}

impl CheckoutStage {
    /// Stage reached by applying `transition`
    ///
    /// Validation results outside their own form leave the stage as it is,
    /// since every field edit validates both forms.
    pub fn apply(self, transition: CheckoutTransition) -> Result<Self> {
        use CheckoutStage::*;
        use CheckoutTransition::*;

        let next = match (self, transition) {
            (_, Close) => Browsing,
            (Browsing, OpenOrderForm) => OrderForm,

            (OrderForm | OrderFormValid, OrderValidated { valid }) => {
                if valid {
                    OrderFormValid
                } else {
                    OrderForm
                }
            }
            (stage, OrderValidated { .. }) => stage,
            (OrderFormValid, SubmitOrderForm) => ContactsForm,

            (ContactsForm | ContactsFormValid, ContactsValidated { valid }) => {
                if valid {
                    ContactsFormValid
                } else {
                    ContactsForm
                }
            }
            (stage, ContactsValidated { .. }) => stage,
            (ContactsFormValid, SubmitContacts) => Submitted,

            (Submitted, SubmissionSucceeded) => Browsing,
            (Submitted, SubmissionFailed) => ContactsFormValid,

            (from, event) => {
                return Err(Error::InvalidTransition {
                    from,
                    event: event.to_string(),
                })
            }
        };
        Ok(next)
    }

    /// Whether a checkout form is showing
    pub fn in_checkout(&self) -> bool {
        !matches!(self, CheckoutStage::Browsing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::CheckoutTransition::*;

    fn run(transitions: &[CheckoutTransition]) -> Result<CheckoutStage> {
        transitions
            .iter()
            .try_fold(CheckoutStage::default(), |stage, t| stage.apply(*t))
    }

    #[test]
    fn test_happy_path() {
        let stage = run(&[
            OpenOrderForm,
            OrderValidated { valid: false },
            OrderValidated { valid: true },
            SubmitOrderForm,
            ContactsValidated { valid: true },
            SubmitContacts,
        ])
        .unwrap();
        assert_eq!(stage, CheckoutStage::Submitted);
        assert_eq!(stage.apply(SubmissionSucceeded).unwrap(), CheckoutStage::Browsing);
    }

    #[test]
    fn test_failure_keeps_contacts_valid() {
        let stage = run(&[
            OpenOrderForm,
            OrderValidated { valid: true },
            SubmitOrderForm,
            ContactsValidated { valid: true },
            SubmitContacts,
            SubmissionFailed,
        ])
        .unwrap();
        assert_eq!(stage, CheckoutStage::ContactsFormValid);
        assert_eq!(stage.apply(SubmitContacts).unwrap(), CheckoutStage::Submitted);
    }

    #[test]
    fn test_invalid_pass_reopens_form() {
        let stage = run(&[OpenOrderForm, OrderValidated { valid: true }]).unwrap();
        assert_eq!(
            stage.apply(OrderValidated { valid: false }).unwrap(),
            CheckoutStage::OrderForm
        );
    }

    #[test]
    fn test_other_form_validation_is_ignored() {
        let stage = run(&[OpenOrderForm, ContactsValidated { valid: true }]).unwrap();
        assert_eq!(stage, CheckoutStage::OrderForm);

        let stage = CheckoutStage::ContactsForm;
        assert_eq!(stage.apply(OrderValidated { valid: true }).unwrap(), stage);
        assert_eq!(
            CheckoutStage::Browsing.apply(OrderValidated { valid: true }).unwrap(),
            CheckoutStage::Browsing
        );
    }

    #[test]
    fn test_rejected_transitions() {
        let err = CheckoutStage::OrderForm.apply(SubmitOrderForm).unwrap_err();
        assert!(err.is_invalid_transition());

        assert!(CheckoutStage::Browsing.apply(SubmitContacts).is_err());
        assert!(CheckoutStage::ContactsFormValid.apply(SubmissionSucceeded).is_err());
        assert!(CheckoutStage::OrderForm.apply(OpenOrderForm).is_err());
    }

    #[test]
    fn test_close_from_anywhere() {
        for stage in [
            CheckoutStage::Browsing,
            CheckoutStage::OrderFormValid,
            CheckoutStage::ContactsForm,
            CheckoutStage::Submitted,
        ] {
            assert_eq!(stage.apply(Close).unwrap(), CheckoutStage::Browsing);
        }
        assert!(!CheckoutStage::Browsing.in_checkout());
        assert!(CheckoutStage::Submitted.in_checkout());
    }
}
