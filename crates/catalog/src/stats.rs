//! Per-characteristic statistics over a category's products.
//!
//! Matching needs the largest observed value of a characteristic in two
//! places (zero-valued numbers and ranges without a `high`), and the filter
//! sidebar needs observed bounds for its placeholders. Both are computed here
//! once per category instead of rescanning the products on every filter pass.

use crate::types::{AttributeData, Category, CharacteristicType};
use rayon::prelude::*;
use std::collections::HashMap;

/// Observed value bounds for one characteristic.
///
/// Every field is `None` when no product carries a value of the right shape;
/// callers never see an infinity standing in for "nothing observed".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacteristicStats {
    /// Products holding at least one value of the characteristic's shape
    pub product_count: usize,
    /// Smallest `number` value, or smallest range `low`
    pub min: Option<f64>,
    /// Largest `number` value, or largest range `low`
    pub max: Option<f64>,
    /// Largest range `high` (always `None` for non-range characteristics)
    pub max_high: Option<f64>,
}

impl CharacteristicStats {
    /// The upper end of what users can filter on: `max_high` for ranges,
    /// `max` for everything else.
    pub fn upper_bound(&self) -> Option<f64> {
        self.max_high.or(self.max)
    }
}

/// Statistics for every characteristic of a category, keyed by name
#[derive(Debug, Clone, Default)]
pub struct CategoryStats {
    by_name: HashMap<String, CharacteristicStats>,
}

impl CategoryStats {
    /// Scan the category once, one characteristic per rayon task
    pub fn compute(category: &Category) -> Self {
        let by_name = category
            .characteristics
            .par_iter()
            .map(|characteristic| {
                let stats = compute_characteristic(category, &characteristic.name, characteristic.kind);
                (characteristic.name.clone(), stats)
            })
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&CharacteristicStats> {
        self.by_name.get(name)
    }

    /// Largest `number` value observed for `name`
    pub fn max_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|s| s.max)
    }

    /// Largest range `high` observed for `name`
    pub fn max_high(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|s| s.max_high)
    }
}

fn compute_characteristic(
    category: &Category,
    name: &str,
    kind: CharacteristicType,
) -> CharacteristicStats {
    let mut stats = CharacteristicStats::default();

    for product in &category.products {
        let mut carried = false;
        for data in product.attributes_named(name) {
            match (kind, data) {
                (CharacteristicType::Number, AttributeData::Number(n)) => {
                    carried = true;
                    observe(&mut stats.min, *n, f64::min);
                    observe(&mut stats.max, *n, f64::max);
                }
                (CharacteristicType::Range, AttributeData::Range(r)) => {
                    carried = true;
                    observe(&mut stats.min, r.low, f64::min);
                    observe(&mut stats.max, r.low, f64::max);
                    if let Some(high) = r.high {
                        observe(&mut stats.max_high, high, f64::max);
                    }
                }
                (CharacteristicType::Text, AttributeData::Text(_)) => carried = true,
                _ => {}
            }
        }
        if carried {
            stats.product_count += 1;
        }
    }

    stats
}

/// Fold `value` into `slot`, skipping NaN so it can never poison a bound
fn observe(slot: &mut Option<f64>, value: f64, pick: fn(f64, f64) -> f64) {
    if value.is_nan() {
        return;
    }
    *slot = Some(match *slot {
        Some(current) => pick(current, value),
        None => value,
    });
}
