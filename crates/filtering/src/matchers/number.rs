//! Matcher for `number` characteristics.

use crate::selection::FilterSelection;
use crate::traits::CharacteristicMatcher;
use catalog::Product;

/// Keeps products whose numeric value lies within the selected bounds.
///
/// ## Algorithm
/// 1. Inactive until the selection holds at least one bound, for any
///    characteristic
/// 2. Resolve bounds for this characteristic: low defaults to 0, high is
///    open-ended
/// 3. A stored zero (or NaN) stands in for "unknown" and is replaced by the
///    largest value observed for the characteristic
/// 4. Keep the product if the effective value is within `[low, high]`
pub struct NumberMatcher {
    name: String,
    max_observed: Option<f64>,
}

impl NumberMatcher {
    /// # Arguments
    /// * `name` - The characteristic name
    /// * `max_observed` - Largest value carried by any product, used for zero values
    pub fn new(name: impl Into<String>, max_observed: Option<f64>) -> Self {
        Self {
            name: name.into(),
            max_observed,
        }
    }

    fn effective_value(&self, value: f64) -> Option<f64> {
        if value == 0.0 || value.is_nan() {
            self.max_observed
        } else {
            Some(value)
        }
    }
}

impl CharacteristicMatcher for NumberMatcher {
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
            .filter_map(|data| data.as_number())
            .filter_map(|value| self.effective_value(value))
            .any(|value| bounds.contains(value))
    }
}
