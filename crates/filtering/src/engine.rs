//! The CharacteristicFilterEngine computes the visible product list.
//!
//! Every characteristic of the category contributes one subset of products;
//! the visible list is the intersection of those subsets. When there is
//! nothing to intersect, or the intersection is empty, the whole category is
//! shown instead of an empty page.

use crate::matchers;
use crate::selection::FilterSelection;
use crate::traits::CharacteristicMatcher;
use catalog::{Category, CategoryStats, Product, ProductId};
use rayon::prelude::*;
use std::collections::HashSet;

/// Why the engine returned the unfiltered product list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The category defines no characteristics
    NoCharacteristics,
    /// The active filters admit no product at the same time
    EmptyIntersection,
}

/// Result of one filter pass
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub products: Vec<&'a Product>,
    /// Set when `products` is the full list because of the fallback policy
    pub fallback: Option<FallbackReason>,
}

impl<'a> FilterOutcome<'a> {
    pub fn ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }
}

/// Filters a category's products by its characteristics.
///
/// Built once per category; statistics the matchers need (largest observed
/// values) are computed at construction, so `filter` only walks the
/// products once per characteristic.
///
/// ## Usage
/// ```ignore
/// let engine = CharacteristicFilterEngine::new(&category);
///
/// let mut selection = FilterSelection::new();
/// selection.select_facet("color", "red");
/// selection.set_bound("weight", BoundKind::High, Some(10.0));
///
/// let visible = engine.filter(&selection);
/// ```
pub struct CharacteristicFilterEngine<'a> {
    category: &'a Category,
    matchers: Vec<Box<dyn CharacteristicMatcher>>,
}

impl<'a> CharacteristicFilterEngine<'a> {
    pub fn new(category: &'a Category) -> Self {
        let stats = CategoryStats::compute(category);
        let matchers = category
            .characteristics
            .iter()
            .map(|characteristic| matchers::for_characteristic(characteristic, &stats))
            .collect();
        Self { category, matchers }
    }

    pub fn category(&self) -> &'a Category {
        self.category
    }

    /// The products to display for `selection`
    pub fn filter(&self, selection: &FilterSelection) -> Vec<&'a Product> {
        self.filter_outcome(selection).products
    }

    /// Like `filter`, but also reports whether the fallback kicked in.
    ///
    /// ## Algorithm
    /// 1. No characteristics: return every product
    /// 2. Compute each characteristic's subset of product ids (in parallel)
    /// 3. Intersect the subsets
    /// 4. Empty intersection: return every product
    /// 5. Otherwise return the matching products in category order, once per id
    pub fn filter_outcome(&self, selection: &FilterSelection) -> FilterOutcome<'a> {
        let category: &'a Category = self.category;
        let products = &category.products;

        if self.matchers.is_empty() {
            tracing::debug!(
                "Category '{}' has no characteristics, showing all {} products",
                self.category.name,
                products.len()
            );
            return self.fallback(FallbackReason::NoCharacteristics);
        }

        let subsets: Vec<HashSet<ProductId>> = self
            .matchers
            .par_iter()
            .map(|matcher| {
                let subset = matcher.subset(products, selection);
                tracing::debug!(
                    "Characteristic matched: {} (active: {}, matched: {}/{})",
                    matcher.name(),
                    matcher.is_active(selection),
                    subset.len(),
                    products.len()
                );
                subset
            })
            .collect();

        let matching = intersect(subsets);
        if matching.is_empty() {
            tracing::debug!(
                "No product satisfies every filter in '{}', showing all {} products",
                self.category.name,
                products.len()
            );
            return self.fallback(FallbackReason::EmptyIntersection);
        }

        let mut seen = HashSet::with_capacity(matching.len());
        let visible: Vec<&'a Product> = products
            .iter()
            .filter(|product| matching.contains(&product.id) && seen.insert(product.id))
            .collect();

        tracing::debug!(
            "Filtered '{}': {} of {} products visible",
            self.category.name,
            visible.len(),
            products.len()
        );
        FilterOutcome {
            products: visible,
            fallback: None,
        }
    }

    fn fallback(&self, reason: FallbackReason) -> FilterOutcome<'a> {
        let category: &'a Category = self.category;
        FilterOutcome {
            products: category.products.iter().collect(),
            fallback: Some(reason),
        }
    }
}

/// Intersect id sets, starting from the smallest
fn intersect(mut subsets: Vec<HashSet<ProductId>>) -> HashSet<ProductId> {
    subsets.sort_by_key(|s| s.len());
    let mut iter = subsets.into_iter();
    let Some(mut result) = iter.next() else {
        return HashSet::new();
    };
    for subset in iter {
        result.retain(|id| subset.contains(id));
        if result.is_empty() {
            break;
        }
    }
    result
}
