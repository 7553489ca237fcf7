//! Facet summaries for the filter sidebar.
//!
//! The storefront renders one block per characteristic: a checkbox per
//! distinct value for `text`, and low/high inputs with the observed bounds as
//! placeholders for `number` and `range`.

use catalog::{Category, CategoryStats, CharacteristicType};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// One selectable value of a `text` characteristic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetValue {
    pub value: String,
    /// Products carrying the value (each product counted once)
    pub product_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetDetail {
    /// Distinct values, sorted
    Values { values: Vec<FacetValue> },
    /// Observed bounds; `None` when no product carries the characteristic
    Bounds { min: Option<f64>, max: Option<f64> },
}

/// Sidebar data for one characteristic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetSummary {
    pub name: String,
    pub kind: CharacteristicType,
    pub unit: String,
    pub detail: FacetDetail,
}

impl FacetSummary {
    /// Placeholder texts for the low/high inputs, e.g. `("from 8", "to 14.5")`.
    ///
    /// Falls back to plain labels when nothing was observed, instead of
    /// printing an infinity.
    pub fn bound_placeholders(&self) -> Option<(String, String)> {
        let FacetDetail::Bounds { min, max } = &self.detail else {
            return None;
        };
        let low = min.map_or_else(|| "from".to_string(), |v| format!("from {}", v));
        let high = max.map_or_else(|| "to".to_string(), |v| format!("to {}", v));
        Some((low, high))
    }
}

/// Summarize every characteristic of a category, in definition order
pub fn summarize(category: &Category) -> Vec<FacetSummary> {
    let stats = CategoryStats::compute(category);
    category
        .characteristics
        .par_iter()
        .map(|characteristic| {
            let detail = match characteristic.kind {
                CharacteristicType::Text => FacetDetail::Values {
                    values: text_values(category, &characteristic.name),
                },
                CharacteristicType::Number | CharacteristicType::Range => {
                    let observed = stats.get(&characteristic.name);
                    FacetDetail::Bounds {
                        min: observed.and_then(|s| s.min),
                        max: observed.and_then(|s| s.upper_bound()),
                    }
                }
            };
            FacetSummary {
                name: characteristic.name.clone(),
                kind: characteristic.kind,
                unit: characteristic.unit.clone(),
                detail,
            }
        })
        .collect()
}

fn text_values(category: &Category, name: &str) -> Vec<FacetValue> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in &category.products {
        let distinct: HashSet<&str> = product
            .attributes_named(name)
            .filter_map(|data| data.as_text())
            .collect();
        for value in distinct {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(value, product_count)| FacetValue {
            value: value.to_string(),
            product_count,
        })
        .collect()
}
