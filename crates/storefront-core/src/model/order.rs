//! Order draft and checkout form fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Fields editable in the two checkout forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    /// Payment method (delivery form)
    Payment,
    /// Delivery address (delivery form)
    Address,
    /// Email (contacts form)
    Email,
    /// Phone number (contacts form)
    Phone,
}

impl OrderField {
    /// All fields, delivery form first
    pub const ALL: [OrderField; 4] = [
        OrderField::Payment,
        OrderField::Address,
        OrderField::Email,
        OrderField::Phone,
    ];

    /// Field name as used in event names and the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Payment => "payment",
            OrderField::Address => "address",
            OrderField::Email => "email",
            OrderField::Phone => "phone",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(OrderField::Payment),
            "address" => Ok(OrderField::Address),
            "email" => Ok(OrderField::Email),
            "phone" => Ok(OrderField::Phone),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay online by card
    Card,
    /// Pay on delivery
    Cash,
}

impl PaymentMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(Error::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// In-progress checkout data, serialized as the order submission record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Ids of priced basket items, in basket order
    pub items: Vec<String>,
    /// Basket total, set when the delivery form is submitted
    pub total: Option<u64>,
    /// Delivery address
    pub address: String,
    /// Chosen payment method
    pub payment: Option<PaymentMethod>,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
}

impl OrderDraft {
    /// Text value of a field, payment rendered by its wire name
    pub fn field(&self, field: OrderField) -> String {
        match field {
            OrderField::Payment => self
                .payment
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            OrderField::Address => self.address.clone(),
            OrderField::Email => self.email.clone(),
            OrderField::Phone => self.phone.clone(),
        }
    }

    /// Whether nothing has been entered or derived yet
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A field edit reported by a checkout form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Raw field name from the form
    pub field: String,
    /// New value
    pub value: String,
}

impl FieldChange {
    /// Create a field change
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Server acknowledgement of a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Server-assigned order id
    #[serde(default)]
    pub id: Option<String>,
    /// Amount charged
    pub total: u64,
}
