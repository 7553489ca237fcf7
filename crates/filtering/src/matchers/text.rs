//! Matcher for `text` characteristics.
//!
//! Picks within one characteristic are OR-ed: a product matches if any of
//! its values for the characteristic is picked.

use crate::selection::{FilterSelection, TextSelectionScope};
use crate::traits::CharacteristicMatcher;
use catalog::Product;

/// Matches products whose text value for a characteristic is among the picks.
///
/// ## Scoping
/// - `PerCharacteristic`: only picks made under this characteristic count,
///   and only attributes with this characteristic's name are checked.
/// - `Shared`: every pick counts, and every text attribute of the product is
///   checked regardless of its name.
pub struct TextMatcher {
    name: String,
}

impl TextMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CharacteristicMatcher for TextMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self, selection: &FilterSelection) -> bool {
        match selection.scope() {
            TextSelectionScope::PerCharacteristic => selection
                .text_picks_for(&self.name)
                .is_some_and(|picks| !picks.is_empty()),
            TextSelectionScope::Shared => selection.has_text_picks(),
        }
    }

    fn matches(&self, product: &Product, selection: &FilterSelection) -> bool {
        match selection.scope() {
            TextSelectionScope::PerCharacteristic => {
                let Some(picks) = selection.text_picks_for(&self.name) else {
                    return false;
                };
                product
                    .attributes_named(&self.name)
                    .filter_map(|data| data.as_text())
                    .any(|value| picks.contains(value))
            }
            TextSelectionScope::Shared => product
                .text_values()
                .any(|value| selection.is_picked_anywhere(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::AttributeValue;

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "Red frame")
                .with_attribute(AttributeValue::text("color", "red"))
                .with_attribute(AttributeValue::text("material", "steel")),
            Product::new(2, "Blue frame").with_attribute(AttributeValue::text("color", "blue")),
            Product::new(3, "Red leather saddle")
                .with_attribute(AttributeValue::text("material", "red")),
            Product::new(4, "Bare"),
        ]
    }

    #[test]
    fn test_inactive_without_picks() {
        let matcher = TextMatcher::new("color");
        let selection = FilterSelection::new();

        assert!(!matcher.is_active(&selection));
        assert_eq!(matcher.subset(&products(), &selection).len(), 4);
    }

    #[test]
    fn test_union_within_characteristic() {
        let matcher = TextMatcher::new("color");
        let mut selection = FilterSelection::new();
        selection.select_facet("color", "red");
        selection.select_facet("color", "blue");

        let subset = matcher.subset(&products(), &selection);
        assert_eq!(subset.len(), 2);
        assert!(subset.contains(&1));
        assert!(subset.contains(&2));
    }

    #[test]
    fn test_picks_for_other_characteristic_do_not_activate() {
        let matcher = TextMatcher::new("color");
        let mut selection = FilterSelection::new();
        selection.select_facet("material", "steel");

        assert!(!matcher.is_active(&selection));
    }

    #[test]
    fn test_per_characteristic_scope_has_no_leakage() {
        let matcher = TextMatcher::new("color");
        let mut selection = FilterSelection::new();
        selection.select_facet("color", "red");

        let subset = matcher.subset(&products(), &selection);
        assert_eq!(subset.len(), 1);
        assert!(subset.contains(&1));
        assert!(!subset.contains(&3));
    }

    #[test]
    fn test_shared_scope_leaks_across_characteristics() {
        let matcher = TextMatcher::new("color");
        let mut selection = FilterSelection::new().with_scope(TextSelectionScope::Shared);
        selection.select_facet("color", "red");

        // Product 3's material is "red", which satisfies the color filter
        let subset = matcher.subset(&products(), &selection);
        assert_eq!(subset.len(), 2);
        assert!(subset.contains(&1));
        assert!(subset.contains(&3));
    }

    #[test]
    fn test_shared_scope_activates_every_text_matcher() {
        let matcher = TextMatcher::new("color");
        let mut selection = FilterSelection::new().with_scope(TextSelectionScope::Shared);
        selection.select_facet("material", "steel");

        assert!(matcher.is_active(&selection));
        let subset = matcher.subset(&products(), &selection);
        assert_eq!(subset.len(), 1);
        assert!(subset.contains(&1));
    }

    #[test]
    fn test_numeric_attribute_never_matches() {
        let matcher = TextMatcher::new("color");
        let mut selection = FilterSelection::new();
        selection.select_facet("color", "5");
        let odd = Product::new(9, "Odd").with_attribute(AttributeValue::number("color", 5.0));

        assert!(!matcher.matches(&odd, &selection));
    }
}
