//! Filter selection state.
//!
//! A `FilterSelection` is the shopper's current set of choices on a category
//! page: facet picks for `text` characteristics and low/high bounds for
//! `number` and `range` characteristics. It is owned by the caller, starts
//! empty, and is never persisted.

use crate::error::{FilterError, Result};
use catalog::{Category, CharacteristicType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Which end of a numeric bound an entry sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundKind {
    Low,
    High,
}

/// One numeric bound for one characteristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundEntry {
    pub name: String,
    pub kind: BoundKind,
    pub value: f64,
}

/// How facet picks are scoped when matching `text` characteristics.
///
/// `Shared` pools every pick into one set that all text characteristics
/// match against, so "red" picked as a color also satisfies a material
/// filter whose values include "red". Storefront pages built against that
/// behavior can opt back into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSelectionScope {
    #[default]
    PerCharacteristic,
    Shared,
}

/// Resolved bounds for one characteristic.
///
/// A missing low bound is `0`; a missing high bound is open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBounds {
    pub low: f64,
    pub high: Option<f64>,
}

impl ResolvedBounds {
    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && self.high.is_none_or(|high| value <= high)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    scope: TextSelectionScope,
    text_picks: HashMap<String, BTreeSet<String>>,
    bounds: Vec<BoundEntry>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: TextSelectionScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> TextSelectionScope {
        self.scope
    }

    // ---------------------------------------------------------------------
    // Facet picks
    // ---------------------------------------------------------------------

    /// Flip a facet checkbox. Returns whether the value is now selected.
    pub fn toggle_facet(&mut self, name: &str, value: &str) -> bool {
        if self.is_facet_selected(name, value) {
            self.deselect_facet(name, value);
            false
        } else {
            self.select_facet(name, value);
            true
        }
    }

    pub fn select_facet(&mut self, name: &str, value: &str) {
        self.text_picks
            .entry(name.to_string())
            .or_default()
            .insert(value.to_string());
    }

    pub fn deselect_facet(&mut self, name: &str, value: &str) {
        if let Some(picks) = self.text_picks.get_mut(name) {
            picks.remove(value);
            if picks.is_empty() {
                self.text_picks.remove(name);
            }
        }
    }

    pub fn is_facet_selected(&self, name: &str, value: &str) -> bool {
        self.text_picks
            .get(name)
            .is_some_and(|picks| picks.contains(value))
    }

    /// Picks made under one characteristic
    pub fn text_picks_for(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.text_picks.get(name)
    }

    /// Whether `value` is picked under any characteristic
    pub fn is_picked_anywhere(&self, value: &str) -> bool {
        self.text_picks.values().any(|picks| picks.contains(value))
    }

    pub fn has_text_picks(&self) -> bool {
        !self.text_picks.is_empty()
    }

    // ---------------------------------------------------------------------
    // Numeric bounds
    // ---------------------------------------------------------------------

    /// Set or clear one bound. `None` or NaN clears it (an emptied input).
    pub fn set_bound(&mut self, name: &str, kind: BoundKind, value: Option<f64>) {
        self.clear_bound(name, kind);
        if let Some(value) = value.filter(|v| !v.is_nan()) {
            self.bounds.push(BoundEntry {
                name: name.to_string(),
                kind,
                value,
            });
        }
    }

    pub fn clear_bound(&mut self, name: &str, kind: BoundKind) {
        self.bounds.retain(|b| !(b.name == name && b.kind == kind));
    }

    pub fn bound(&self, name: &str, kind: BoundKind) -> Option<f64> {
        self.bounds
            .iter()
            .find(|b| b.name == name && b.kind == kind)
            .map(|b| b.value)
    }

    pub fn bounds(&self) -> &[BoundEntry] {
        &self.bounds
    }

    /// Any bound on any characteristic. Numeric and range filters switch on
    /// together as soon as one bound exists.
    pub fn has_bounds(&self) -> bool {
        !self.bounds.is_empty()
    }

    pub fn resolve_bounds(&self, name: &str) -> ResolvedBounds {
        ResolvedBounds {
            low: self.bound(name, BoundKind::Low).unwrap_or(0.0),
            high: self.bound(name, BoundKind::High),
        }
    }

    // ---------------------------------------------------------------------
    // Whole-selection operations
    // ---------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        !self.has_text_picks() && !self.has_bounds()
    }

    /// Drop every pick and bound, keeping the scope
    pub fn reset(&mut self) {
        self.text_picks.clear();
        self.bounds.clear();
    }

    /// Apply a `name=value` facet pick
    pub fn apply_pick(&mut self, input: &str) -> Result<()> {
        let (name, value) = split_assignment(input)?;
        self.select_facet(name, value);
        Ok(())
    }

    /// Apply a `name=number` bound
    pub fn apply_bound(&mut self, kind: BoundKind, input: &str) -> Result<()> {
        let (name, raw) = split_assignment(input)?;
        let value: f64 = raw.parse().map_err(|e| FilterError::InvalidSelection {
            input: input.to_string(),
            reason: format!("bound is not a number: {}", e),
        })?;
        if value.is_nan() {
            return Err(FilterError::InvalidSelection {
                input: input.to_string(),
                reason: "bound is not a number".to_string(),
            });
        }
        self.set_bound(name, kind, Some(value));
        Ok(())
    }

    /// Check that every pick and bound refers to a characteristic of the
    /// right type. Filtering tolerates mismatches; this is for catching
    /// typos at the edges.
    pub fn validate_against(&self, category: &Category) -> Result<()> {
        for name in self.text_picks.keys() {
            expect_kind(category, name, "text", |k| k == CharacteristicType::Text)?;
        }
        for bound in &self.bounds {
            expect_kind(category, &bound.name, "number or range", |k| {
                matches!(k, CharacteristicType::Number | CharacteristicType::Range)
            })?;
        }
        Ok(())
    }
}

fn split_assignment(input: &str) -> Result<(&str, &str)> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| FilterError::InvalidSelection {
            input: input.to_string(),
            reason: "expected name=value".to_string(),
        })?;
    if name.is_empty() {
        return Err(FilterError::InvalidSelection {
            input: input.to_string(),
            reason: "missing characteristic name".to_string(),
        });
    }
    Ok((name, value))
}

fn expect_kind(
    category: &Category,
    name: &str,
    expected: &'static str,
    accepts: impl Fn(CharacteristicType) -> bool,
) -> Result<()> {
    let characteristic = category
        .characteristic(name)
        .ok_or_else(|| FilterError::UnknownCharacteristic(name.to_string()))?;
    if accepts(characteristic.kind) {
        Ok(())
    } else {
        Err(FilterError::WrongCharacteristicType {
            name: name.to_string(),
            expected,
            found: characteristic.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::CharacteristicDefinition;

    #[test]
    fn test_new_selection_is_empty() {
        let selection = FilterSelection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.scope(), TextSelectionScope::PerCharacteristic);
    }

    #[test]
    fn test_toggle_facet() {
        let mut selection = FilterSelection::new();

        assert!(selection.toggle_facet("color", "red"));
        assert!(selection.is_facet_selected("color", "red"));
        assert!(selection.has_text_picks());

        assert!(!selection.toggle_facet("color", "red"));
        assert!(!selection.is_facet_selected("color", "red"));
        // The emptied set is dropped so the filter reads as inactive
        assert!(!selection.has_text_picks());
    }

    #[test]
    fn test_picks_are_scoped_by_name() {
        let mut selection = FilterSelection::new();
        selection.select_facet("color", "red");

        assert!(selection.text_picks_for("material").is_none());
        assert!(selection.is_picked_anywhere("red"));
        assert!(!selection.is_picked_anywhere("blue"));
    }

    #[test]
    fn test_set_bound_replaces() {
        let mut selection = FilterSelection::new();
        selection.set_bound("weight", BoundKind::Low, Some(5.0));
        selection.set_bound("weight", BoundKind::Low, Some(7.0));
        selection.set_bound("weight", BoundKind::High, Some(10.0));

        assert_eq!(selection.bounds().len(), 2);
        assert_eq!(selection.bound("weight", BoundKind::Low), Some(7.0));
        assert_eq!(selection.bound("weight", BoundKind::High), Some(10.0));
    }

    #[test]
    fn test_clearing_bounds() {
        let mut selection = FilterSelection::new();
        selection.set_bound("weight", BoundKind::Low, Some(5.0));
        selection.set_bound("weight", BoundKind::Low, None);
        assert!(!selection.has_bounds());

        selection.set_bound("weight", BoundKind::High, Some(5.0));
        selection.set_bound("weight", BoundKind::High, Some(f64::NAN));
        assert!(!selection.has_bounds());
    }

    #[test]
    fn test_resolve_bounds_defaults() {
        let mut selection = FilterSelection::new();
        let bounds = selection.resolve_bounds("weight");
        assert_eq!(bounds.low, 0.0);
        assert_eq!(bounds.high, None);
        assert!(bounds.contains(1e12));
        assert!(!bounds.contains(-1.0));

        selection.set_bound("weight", BoundKind::High, Some(10.0));
        let bounds = selection.resolve_bounds("weight");
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(10.5));
    }

    #[test]
    fn test_reset_keeps_scope() {
        let mut selection = FilterSelection::new().with_scope(TextSelectionScope::Shared);
        selection.select_facet("color", "red");
        selection.set_bound("weight", BoundKind::Low, Some(1.0));

        selection.reset();
        assert!(selection.is_empty());
        assert_eq!(selection.scope(), TextSelectionScope::Shared);
    }

    #[test]
    fn test_apply_pick_and_bound() {
        let mut selection = FilterSelection::new();
        selection.apply_pick("color=dark red").unwrap();
        selection.apply_bound(BoundKind::High, "weight=10.5").unwrap();

        assert!(selection.is_facet_selected("color", "dark red"));
        assert_eq!(selection.bound("weight", BoundKind::High), Some(10.5));
    }

    #[test]
    fn test_apply_invalid_input() {
        let mut selection = FilterSelection::new();

        assert!(matches!(
            selection.apply_pick("color"),
            Err(FilterError::InvalidSelection { .. })
        ));
        assert!(matches!(
            selection.apply_pick("=red"),
            Err(FilterError::InvalidSelection { .. })
        ));
        assert!(matches!(
            selection.apply_bound(BoundKind::Low, "weight=heavy"),
            Err(FilterError::InvalidSelection { .. })
        ));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_validate_against_category() {
        let category = Category::new("Bikes")
            .with_characteristic(CharacteristicDefinition::new("color", CharacteristicType::Text))
            .with_characteristic(CharacteristicDefinition::new("weight", CharacteristicType::Number));

        let mut selection = FilterSelection::new();
        selection.select_facet("color", "red");
        selection.set_bound("weight", BoundKind::Low, Some(1.0));
        assert!(selection.validate_against(&category).is_ok());

        let mut typo = FilterSelection::new();
        typo.select_facet("colour", "red");
        assert_eq!(
            typo.validate_against(&category),
            Err(FilterError::UnknownCharacteristic("colour".to_string()))
        );

        let mut wrong = FilterSelection::new();
        wrong.set_bound("color", BoundKind::High, Some(3.0));
        assert!(matches!(
            wrong.validate_against(&category),
            Err(FilterError::WrongCharacteristicType { found: CharacteristicType::Text, .. })
        ));
    }
}
