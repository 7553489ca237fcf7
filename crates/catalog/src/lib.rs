//! # Catalog Crate
//!
//! Storefront category data: characteristic definitions, products and the
//! attribute values that tie them together.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Category, CharacteristicDefinition, Product, AttributeValue)
//! - **loader**: Parse and validate category JSON documents
//! - **stats**: Observed value bounds per characteristic
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{load_category, CategoryStats};
//! use std::path::Path;
//!
//! let category = load_category(Path::new("data/bikes.json"))?;
//! let stats = CategoryStats::compute(&category);
//!
//! println!("max weight: {:?}", stats.max_number("weight"));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod loader;
pub mod stats;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use loader::{load_category, parse_category};
pub use stats::{CategoryStats, CharacteristicStats};
pub use types::{
    // Type aliases
    ProductId,
    // Core types
    AttributeData,
    AttributeValue,
    Category,
    CharacteristicDefinition,
    CharacteristicType,
    Product,
    RangeValue,
};
