//! Validation messages per checkout field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::order::OrderField;

/// Human-readable validation messages keyed by field
///
/// A field with no entry is currently valid. Each validation pass builds a
/// fresh value rather than patching the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<OrderField, String>);

impl FormErrors {
    /// Create an empty set of errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any previous one
    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for a field, if it is invalid
    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether there are no errors at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether none of `fields` has an error
    pub fn is_valid_for(&self, fields: &[OrderField]) -> bool {
        fields.iter().all(|f| !self.0.contains_key(f))
    }

    /// Messages for `fields`, in the given order, joined for display
    pub fn summary_for(&self, fields: &[OrderField]) -> String {
        fields
            .iter()
            .filter_map(|f| self.get(*f))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// All messages joined for display
    pub fn summary(&self) -> String {
        self.0.values().map(String::as_str).collect::<Vec<_>>().join(" | ")
    }

    /// Iterate over invalid fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_for_selected_fields() {
        let mut errors = FormErrors::new();
        errors.insert(OrderField::Address, "Enter a delivery address");
        errors.insert(OrderField::Payment, "Select a payment method");

        assert_eq!(
            errors.summary_for(&[OrderField::Payment, OrderField::Address]),
            "Select a payment method | Enter a delivery address"
        );
        assert_eq!(errors.summary_for(&[OrderField::Email]), "");
        assert!(errors.is_valid_for(&[OrderField::Email, OrderField::Phone]));
        assert!(!errors.is_valid_for(&[OrderField::Payment]));
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = FormErrors::new();
        errors.insert(OrderField::Phone, "Enter a phone number");

        let json = serde_json::to_value(&errors).expect("Should serialize");
        assert_eq!(json, serde_json::json!({"phone": "Enter a phone number"}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next(), Some((OrderField::Phone, "Enter a phone number")));
    }
}
