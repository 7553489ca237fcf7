//! Matcher for `range` characteristics.

use crate::selection::FilterSelection;
use crate::traits::CharacteristicMatcher;
use catalog::Product;

/// Keeps products whose `low..high` pair fits inside the selected bounds.
///
/// Activation and bound resolution follow `NumberMatcher`. A pair fits when
/// its `low` is at or above the selected low and its `high` is at or below
/// the selected high. A pair without a `high` borrows the largest `high`
/// seen in the category; if there is none, the pair does not match.
pub struct RangeMatcher {
    name: String,
    max_high: Option<f64>,
}

impl RangeMatcher {
    /// # Arguments
    /// * `name` - The characteristic name
    /// * `max_high` - Largest `high` carried by any product for this characteristic
    pub fn new(name: impl Into<String>, max_high: Option<f64>) -> Self {
        Self {
            name: name.into(),
            max_high,
        }
    }
}

impl CharacteristicMatcher for RangeMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self, selection: &FilterSelection) -> bool {
        selection.has_bounds()
    }

    fn matches(&self, product: &Product, selection: &FilterSelection) -> bool {
        let bounds = selection.resolve_bounds(&self.name);
        product
            .attributes_named(&self.name)
            .filter_map(|data| data.as_range())
            .any(|range| {
                let Some(high) = range.high.or(self.max_high) else {
                    return false;
                };
                range.low >= bounds.low && bounds.high.is_none_or(|limit| high <= limit)
            })
    }
}
