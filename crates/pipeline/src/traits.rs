//! Core traits for the candidate pipeline.
//!
//! Two extension points:
//! - [`Filter`] removes raw candidates before any detail fetch or scoring
//! - [`Reranker`] reorders or drops scored candidates after sorting

use crate::scored::ScoredCandidate;
use anyhow::Result;
use models::{MovieRecord, UserProfile};
use rand::RngCore;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec<MovieRecord> and return a filtered Vec
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `profile` - The requesting user's profile
    fn apply(&self, candidates: Vec<MovieRecord>, profile: &UserProfile)
        -> Result<Vec<MovieRecord>>;
}

/// Post-scoring stage over a score-descending list.
///
/// Randomness comes only from `rng`, so a seeded generator makes every
/// stage reproducible.
pub trait Reranker: Send + Sync {
    fn name(&self) -> &str;

    fn rerank(
        &self,
        candidates: Vec<ScoredCandidate>,
        rng: &mut dyn RngCore,
    ) -> Vec<ScoredCandidate>;
}
