//! Characteristic filtering for storefront category pages.
//!
//! This crate provides:
//! - FilterSelection, the shopper's current facet picks and numeric bounds
//! - CharacteristicMatcher trait and one matcher per characteristic type
//! - CharacteristicFilterEngine for intersecting the matchers' results
//! - Facet summaries for rendering the filter sidebar
//!
//! ## Architecture
//! A filter pass runs in stages:
//! 1. Each characteristic's matcher picks the products it admits
//!    (everything, when the selection does not constrain it)
//! 2. The per-characteristic subsets are intersected
//! 3. An empty intersection, or a category without characteristics, shows
//!    the full product list instead
//!
//! ## Example Usage
//! ```ignore
//! use filtering::{BoundKind, CharacteristicFilterEngine, FilterSelection};
//!
//! let engine = CharacteristicFilterEngine::new(&category);
//!
//! let mut selection = FilterSelection::new();
//! selection.toggle_facet("color", "red");
//! selection.set_bound("weight", BoundKind::High, Some(10.0));
//!
//! for product in engine.filter(&selection) {
//!     println!("{}", product.name);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod facets;
pub mod matchers;
pub mod selection;
pub mod traits;

// Re-export main types
pub use engine::{CharacteristicFilterEngine, FallbackReason, FilterOutcome};
pub use error::{FilterError, Result};
pub use facets::{FacetDetail, FacetSummary, FacetValue, summarize};
pub use selection::{BoundEntry, BoundKind, FilterSelection, ResolvedBounds, TextSelectionScope};
pub use traits::CharacteristicMatcher;
