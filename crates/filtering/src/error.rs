//! Error types for building filter selections.
//!
//! Filtering itself never fails. These errors only come from turning user
//! input into a `FilterSelection` or checking one against a category.

use catalog::CharacteristicType;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    /// A `name=value` selection string could not be understood
    #[error("Invalid selection '{input}': {reason}")]
    InvalidSelection { input: String, reason: String },

    /// The selection names a characteristic the category does not define
    #[error("Unknown characteristic '{0}'")]
    UnknownCharacteristic(String),

    /// A facet pick on a numeric characteristic, or a bound on a text one
    #[error("Characteristic '{name}' is {found:?}, expected {expected}")]
    WrongCharacteristicType {
        name: String,
        expected: &'static str,
        found: CharacteristicType,
    },
}

pub type Result<T> = std::result::Result<T, FilterError>;
