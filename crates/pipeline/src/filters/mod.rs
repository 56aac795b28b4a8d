//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod dedupe;
pub mod exclude_favorites;

// Re-export for convenience
pub use dedupe::DedupeFilter;
pub use exclude_favorites::ExcludeFavoritesFilter;
