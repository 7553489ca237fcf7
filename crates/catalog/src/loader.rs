//! Loading category documents.
//!
//! A category arrives as one JSON document:
//! `{ name, description, characteristics: [...], products: [...] }`.
//! After parsing, the document is validated for the identity rules the
//! filtering engine relies on.

use crate::error::{CatalogError, Result};
use crate::types::Category;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load and validate a category from a JSON file
pub fn load_category(path: &Path) -> Result<Category> {
    info!("Loading category from {:?}", path);
    let content = fs::read_to_string(path)?;
    let category = parse_category(&content)?;

    let (characteristics, products, attributes) = category.counts();
    info!(
        "Loaded category '{}': {} characteristics, {} products, {} attribute values",
        category.name, characteristics, products, attributes
    );
    Ok(category)
}

/// Parse and validate a category from a JSON string
pub fn parse_category(json: &str) -> Result<Category> {
    let category: Category = serde_json::from_str(json)?;
    validate(&category)?;
    Ok(category)
}

/// Validate category integrity
///
/// Check that:
/// - characteristic names are unique
/// - product ids are unique
///
/// Attributes naming an unknown characteristic are orphans, not errors:
/// they are reported and kept, and simply never match anything.
pub fn validate(category: &Category) -> Result<()> {
    if category.name.trim().is_empty() {
        return Err(CatalogError::Validation(
            "category name must not be empty".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for characteristic in &category.characteristics {
        if !names.insert(characteristic.name.as_str()) {
            return Err(CatalogError::DuplicateCharacteristic {
                category: category.name.clone(),
                name: characteristic.name.clone(),
            });
        }
    }

    let mut ids = HashSet::new();
    for product in &category.products {
        if !ids.insert(product.id) {
            return Err(CatalogError::DuplicateProduct {
                category: category.name.clone(),
                id: product.id,
            });
        }
    }

    for (name, count) in category.orphaned_attributes() {
        warn!(
            "Category '{}': {} attribute value(s) reference unknown characteristic '{}'",
            category.name, count, name
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttributeData, CharacteristicType, RangeValue};

    const SAMPLE: &str = r#"{
        "name": "Bikes",
        "description": "Two wheels",
        "characteristics": [
            { "name": "color", "type": "text" },
            { "name": "weight", "type": "number", "unit": "kg" },
            { "name": "wheel", "type": "range", "unit": "in" }
        ],
        "products": [
            { "id": 1, "name": "Road", "price": 1200,
              "attributes": [
                { "name": "color", "value": "red" },
                { "name": "weight", "value": 8 },
                { "name": "wheel", "value": { "low": 26, "high": 28 } }
              ] },
            { "id": 2, "name": "Kids",
              "attributes": [
                { "name": "wheel", "value": { "low": 16 } },
                { "name": "weight", "value": true }
              ] }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let category = parse_category(SAMPLE).unwrap();

        assert_eq!(category.name, "Bikes");
        assert_eq!(category.characteristics.len(), 3);
        assert_eq!(category.characteristics[1].kind, CharacteristicType::Number);
        assert_eq!(category.characteristics[1].unit, "kg");
        assert_eq!(category.characteristics[0].unit, "");

        let road = category.get_product(1).unwrap();
        assert_eq!(road.price, 1200.0);
        assert_eq!(road.attributes[0].value, AttributeData::Text("red".to_string()));
        assert_eq!(road.attributes[1].value, AttributeData::Number(8.0));
        assert_eq!(
            road.attributes[2].value,
            AttributeData::Range(RangeValue::new(26.0, 28.0))
        );

        let kids = category.get_product(2).unwrap();
        assert_eq!(
            kids.attributes[0].value,
            AttributeData::Range(RangeValue::open_ended(16.0))
        );
        // Unknown shapes are kept rather than rejected
        assert!(matches!(kids.attributes[1].value, AttributeData::Unrecognized(_)));
        assert_eq!(kids.attributes[1].value.kind(), None);
    }

    #[test]
    fn test_missing_characteristics_is_empty() {
        let category = parse_category(r#"{ "name": "Misc", "products": [] }"#).unwrap();
        assert!(category.characteristics.is_empty());
        assert!(category.products.is_empty());
    }

    #[test]
    fn test_duplicate_characteristic() {
        let json = r#"{ "name": "Bikes", "characteristics": [
            { "name": "color", "type": "text" },
            { "name": "color", "type": "number" }
        ] }"#;
        let err = parse_category(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCharacteristic { ref name, .. } if name == "color"));
    }

    #[test]
    fn test_duplicate_product() {
        let json = r#"{ "name": "Bikes", "products": [
            { "id": 7, "name": "A" },
            { "id": 7, "name": "B" }
        ] }"#;
        let err = parse_category(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct { id: 7, .. }));
    }

    #[test]
    fn test_unknown_type_is_json_error() {
        let json = r#"{ "name": "Bikes", "characteristics": [{ "name": "x", "type": "date" }] }"#;
        assert!(matches!(parse_category(json), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_case_sensitive_names_are_distinct() {
        let json = r#"{ "name": "Bikes", "characteristics": [
            { "name": "Color", "type": "text" },
            { "name": "color", "type": "text" }
        ] }"#;
        assert!(parse_category(json).is_ok());
    }

    #[test]
    fn test_load_sample_file() {
        // Sample category shipped with the workspace
        let path = Path::new("../../data/bikes.json");

        if path.exists() {
            let category = load_category(path).unwrap();
            let (characteristics, products, _) = category.counts();

            assert_eq!(characteristics, 4);
            assert_eq!(products, 5);
            assert_eq!(category.orphaned_attributes().get("colour"), Some(&1));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_category(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
