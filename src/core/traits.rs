//! Core traits for the reference data the engine consumes
//!
//! The pricing engine never owns where promotions come from. Anything that can
//! answer "which stores exist" and "what does this store offer" can back the
//! quote engines, the bundled JSON catalog being the default implementation.

use crate::types::{DiscountRule, PricingError};

/// Source of per-store promotion rules
pub trait CatalogSource {
    /// Names of all stores, in catalog order
    fn list_stores(&self) -> Vec<&str>;

    /// Ordered promotion rules of a store
    ///
    /// # Errors
    ///
    /// Returns `StoreNotFound` when the store is absent. Implementations must not
    /// answer an unknown store with an empty rule list.
    fn rules_for(&self, store: &str) -> Result<&[DiscountRule], PricingError>;
}
