//! Matcher implementations, one per characteristic type.

pub mod number;
pub mod range;
pub mod text;

// Re-export for convenience
pub use number::NumberMatcher;
pub use range::RangeMatcher;
pub use text::TextMatcher;

use crate::traits::CharacteristicMatcher;
use catalog::{CategoryStats, CharacteristicDefinition, CharacteristicType};

/// Build the matcher for one characteristic definition
pub fn for_characteristic(
    characteristic: &CharacteristicDefinition,
    stats: &CategoryStats,
) -> Box<dyn CharacteristicMatcher> {
    let name = characteristic.name.clone();
    match characteristic.kind {
        CharacteristicType::Text => Box::new(TextMatcher::new(name)),
        CharacteristicType::Number => {
            let max_observed = stats.max_number(&name);
            Box::new(NumberMatcher::new(name, max_observed))
        }
        CharacteristicType::Range => {
            let max_high = stats.max_high(&name);
            Box::new(RangeMatcher::new(name, max_high))
        }
    }
}
