//! Core trait for per-characteristic matching.
//!
//! Each characteristic of a category gets one matcher. The engine asks every
//! matcher for its subset of products and intersects the results.

use crate::selection::FilterSelection;
use catalog::{Product, ProductId};
use std::collections::HashSet;

/// Matches products against the selection for one characteristic.
///
/// `Send + Sync` so that the engine can evaluate matchers in parallel.
pub trait CharacteristicMatcher: Send + Sync {
    /// The characteristic this matcher is bound to (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether the selection constrains this characteristic at all.
    ///
    /// An inactive matcher admits every product, including products that
    /// carry no attribute for the characteristic.
    fn is_active(&self, selection: &FilterSelection) -> bool;

    /// Whether one product satisfies the active filter.
    ///
    /// Only consulted while the matcher is active. A product without an
    /// attribute of the right shape never matches.
    fn matches(&self, product: &Product, selection: &FilterSelection) -> bool;

    /// Ids of the products this characteristic admits
    fn subset(&self, products: &[Product], selection: &FilterSelection) -> HashSet<ProductId> {
        if !self.is_active(selection) {
            return products.iter().map(|p| p.id).collect();
        }
        products
            .iter()
            .filter(|product| self.matches(product, selection))
            .map(|product| product.id)
            .collect()
    }
}
