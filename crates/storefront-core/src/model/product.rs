//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{shared, Shared};

/// A product as listed in the catalog
///
/// `selected` and `index` are view state owned by the storefront; they are
/// never read from or written to the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItem {
    /// Stable identifier, unique within the catalog
    pub id: String,
    /// Display title
    pub title: String,
    /// Long description shown in the preview
    #[serde(default)]
    pub description: String,
    /// Image path or URL
    #[serde(default)]
    pub image: String,
    /// Category label
    #[serde(default)]
    pub category: String,
    /// Price in credits; `None` means the product is not for sale
    pub price: Option<u64>,
    /// Set once the product has been added to the basket
    #[serde(skip)]
    pub selected: bool,
    /// 1-based position in the basket, only while in the basket
    #[serde(skip)]
    pub index: Option<usize>,
}

impl ProductItem {
    /// Create a product with the fields the model cares about
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Option<u64>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            ..Default::default()
        }
    }

    /// Whether the product can be bought at all
    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }

    /// Wrap the product for sharing between catalog and basket
    pub fn into_shared(self) -> ProductRef {
        shared(self)
    }
}

/// A product shared between the catalog and the basket
pub type ProductRef = Shared<ProductItem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
            "description": "Useful for everyone",
            "image": "/5_Dots.svg",
            "title": "+1 hour in a day",
            "category": "soft skill",
            "price": 750
        }"#;

        let item: ProductItem = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(item.title, "+1 hour in a day");
        assert_eq!(item.price, Some(750));
        assert!(!item.selected);
        assert_eq!(item.index, None);
    }

    #[test]
    fn test_null_price_is_priceless() {
        let json = r#"{"id": "b", "title": "Mystery", "price": null}"#;
        let item: ProductItem = serde_json::from_str(json).expect("Should deserialize");
        assert!(!item.is_priced());
        assert_eq!(item.category, "");
    }

    #[test]
    fn test_transient_fields_not_serialized() {
        let mut item = ProductItem::new("a", "Widget", Some(10));
        item.selected = true;
        item.index = Some(1);

        let json = serde_json::to_value(&item).expect("Should serialize");
        assert!(json.get("selected").is_none());
        assert!(json.get("index").is_none());
    }

    #[test]
    fn test_shared_selection_is_visible_through_clones() {
        let catalog_entry = ProductItem::new("a", "Widget", Some(10)).into_shared();
        let basket_entry = catalog_entry.clone();

        basket_entry.borrow_mut().selected = true;
        assert!(catalog_entry.borrow().selected);
    }
}
