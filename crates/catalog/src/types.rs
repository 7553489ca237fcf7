//! Core domain types for a storefront category.
//!
//! A category defines its filterable characteristics; each product carries
//! attribute values keyed by characteristic name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a product within a category
pub type ProductId = u64;

// =============================================================================
// Characteristic Types
// =============================================================================

/// How a characteristic's attribute values are shaped and matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacteristicType {
    /// Discrete facet values, e.g. a color name
    Text,
    /// A single numeric scalar
    Number,
    /// A `low..high` numeric pair
    Range,
}

/// A named, typed filterable attribute defined at the category level.
///
/// `name` is matched case-sensitively against product attribute names.
/// Renaming a characteristic orphans every attribute that used the old name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CharacteristicType,
    /// Display-only, never used in matching
    #[serde(default)]
    pub unit: String,
}

impl CharacteristicDefinition {
    pub fn new(name: impl Into<String>, kind: CharacteristicType) -> Self {
        Self {
            name: name.into(),
            kind,
            unit: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

// =============================================================================
// Attribute Values
// =============================================================================

/// A `low..high` pair held by a `range` attribute.
///
/// `high` may be missing; matching then substitutes the highest `high`
/// observed for the characteristic across the category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub low: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl RangeValue {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high: Some(high),
        }
    }

    pub fn open_ended(low: f64) -> Self {
        Self { low, high: None }
    }
}

/// The concrete data of one attribute value.
///
/// Variant order matters for untagged deserialization: strings become
/// `Text`, numbers `Number`, `{low, high}` objects `Range`. Anything else is
/// kept as `Unrecognized` so that it can silently fail to match instead of
/// rejecting the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeData {
    Text(String),
    Number(f64),
    Range(RangeValue),
    Unrecognized(serde_json::Value),
}

impl AttributeData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeData::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeValue> {
        match self {
            AttributeData::Range(r) => Some(r),
            _ => None,
        }
    }

    /// The characteristic type this data is shaped for, if any
    pub fn kind(&self) -> Option<CharacteristicType> {
        match self {
            AttributeData::Text(_) => Some(CharacteristicType::Text),
            AttributeData::Number(_) => Some(CharacteristicType::Number),
            AttributeData::Range(_) => Some(CharacteristicType::Range),
            AttributeData::Unrecognized(_) => None,
        }
    }
}

/// A product's value for one characteristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub name: String,
    pub value: AttributeData,
}

impl AttributeValue {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AttributeData::Text(value.into()),
        }
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: AttributeData::Number(value),
        }
    }

    pub fn range(name: impl Into<String>, value: RangeValue) -> Self {
        Self {
            name: name.into(),
            value: AttributeData::Range(value),
        }
    }
}

// =============================================================================
// Products and Categories
// =============================================================================

/// A product listed in a category.
///
/// Only `id` and `attributes` take part in filtering; the rest is for the
/// rendering side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: 0.0,
            image: None,
            attributes: Vec::new(),
        }
    }

    /// Builder helper used heavily by tests and fixtures
    pub fn with_attribute(mut self, attribute: AttributeValue) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// All attribute data this product holds under `name`
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AttributeData> {
        self.attributes
            .iter()
            .filter(move |a| a.name == name)
            .map(|a| &a.value)
    }

    /// Every text value this product carries, regardless of characteristic
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().filter_map(|a| a.value.as_text())
    }
}

/// A storefront category: its characteristic definitions and product list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// May be absent in the source document, which means "nothing to filter on"
    #[serde(default)]
    pub characteristics: Vec<CharacteristicDefinition>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_characteristic(mut self, characteristic: CharacteristicDefinition) -> Self {
        self.characteristics.push(characteristic);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Look up a characteristic definition by its exact name
    pub fn characteristic(&self, name: &str) -> Option<&CharacteristicDefinition> {
        self.characteristics.iter().find(|c| c.name == name)
    }

    /// Get a product by id
    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Attribute names used by products that no characteristic defines.
    ///
    /// Returned with the number of products referencing each name.
    pub fn orphaned_attributes(&self) -> HashMap<&str, usize> {
        let mut orphans: HashMap<&str, usize> = HashMap::new();
        for product in &self.products {
            for attribute in &product.attributes {
                if self.characteristic(&attribute.name).is_none() {
                    *orphans.entry(attribute.name.as_str()).or_insert(0) += 1;
                }
            }
        }
        orphans
    }

    /// Get counts for debugging/validation: (characteristics, products, attribute values)
    pub fn counts(&self) -> (usize, usize, usize) {
        let attributes = self.products.iter().map(|p| p.attributes.len()).sum();
        (self.characteristics.len(), self.products.len(), attributes)
    }
}
