//! Error types for the catalog crate.
//!
//! Loading a category can fail on I/O, on malformed JSON, or on a document
//! that parses but breaks the category's identity rules.

use thiserror::Error;

use crate::types::ProductId;

/// Errors that can occur while loading and validating a category
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading the category file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The category document is not valid JSON or has the wrong shape
    #[error("Malformed category document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two characteristic definitions share a name
    ///
    /// Names are how product attributes find their characteristic, so they
    /// must be unique within a category.
    #[error("Duplicate characteristic '{name}' in category '{category}'")]
    DuplicateCharacteristic { category: String, name: String },

    /// Two products share an id
    #[error("Duplicate product id {id} in category '{category}'")]
    DuplicateProduct { category: String, id: ProductId },

    /// Any other validation failure
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
