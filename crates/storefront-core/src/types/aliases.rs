//! Type aliases for the shared, single-threaded ownership used by the model.
//!
//! The storefront runs on one thread: the event bus dispatches synchronously
//! and products are shared between the catalog and the basket. Everything is
//! built from `Rc<RefCell<T>>`, so these aliases give the nesting a name.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::types::*;
//!
//! // Instead of: Rc<RefCell<Vec<ProductRef>>>
//! let basket: SharedVec<ProductRef> = shared_vec();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// A product lives once and is referenced from both the catalog and the
/// basket, so toggling `selected` through either is visible through both.
///
/// # Example
/// ```rust,ignore
/// let item: Shared<ProductItem> = shared(ProductItem::default());
/// item.borrow_mut().selected = true;
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector whose identity outlives its contents.
///
/// Holders of a clone observe in-place changes such as `clear()`.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new empty `SharedVec<T>`.
#[inline]
pub fn shared_vec<T>() -> SharedVec<T> {
    Rc::new(RefCell::new(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_creation() {
        let value: Shared<i32> = shared(42);
        let alias = value.clone();

        *value.borrow_mut() = 100;
        assert_eq!(*alias.borrow(), 100);
    }

    #[test]
    fn test_shared_vec_identity() {
        let vec: SharedVec<&str> = shared_vec();
        let holder = vec.clone();

        vec.borrow_mut().push("item1");
        vec.borrow_mut().push("item2");
        assert_eq!(holder.borrow().len(), 2);

        vec.borrow_mut().clear();
        assert!(holder.borrow().is_empty());
        assert!(Rc::ptr_eq(&vec, &holder));
    }
}
