//! Scoring pipeline for movie recommendations.
//!
//! This crate provides:
//! - Feature extraction: feature tokens and initial profile weights
//! - Similarity scoring: five signals and their weighted combination
//! - Feedback learning: like/dislike weight nudges
//! - Filter trait and FilterPipeline for candidate filtering
//! - Reranker trait and RerankPipeline for diversity and exploration
//!
//! Everything here is pure: records and profiles go in, scores and weights
//! come out. No function performs I/O.
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (duplicates, favorites)
//! 2. SimilarityScorer scores the remaining candidates in parallel
//! 3. Collaborative signal and optional trending boost adjust the scores
//! 4. Candidates are sorted by score
//! 5. Rerankers enforce genre diversity and inject exploration
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::filters::*;
//! use pipeline::rerankers::*;
//! use pipeline::*;
//!
//! let filters = FilterPipeline::new()
//!     .add_filter(DedupeFilter)
//!     .add_filter(ExcludeFavoritesFilter);
//! let candidates = filters.apply(popular, &profile)?;
//!
//! let scorer = SimilarityScorer::new(ScoringWeights::default(), 2026);
//! let mut scored = scorer.score_candidates(&weights, &favorites, detailed);
//! apply_collaborative_signal(&mut scored, &PopularitySignal, 0.15);
//! sort_by_score(&mut scored);
//!
//! let reranking = RerankPipeline::new()
//!     .add_stage(DiversityFilter::new(3))
//!     .add_stage(ExplorationReranker::new(0.15));
//! let recommendations = reranking.apply(scored, &mut rng);
//! ```

pub mod collaborative;
pub mod features;
pub mod feedback;
pub mod filter_pipeline;
pub mod filters;
pub mod math;
pub mod rerank_pipeline;
pub mod rerankers;
pub mod scored;
pub mod similarity;
pub mod traits;

// Re-export main types
pub use collaborative::{
    apply_collaborative_signal, collaborative_blend, CollaborativeSignal, PopularitySignal,
    TrendingBoost,
};
pub use features::{build_initial_profile, extract_tokens, FeatureKind, FeatureToken, LearnedWeights};
pub use feedback::{FeedbackLearner, FeedbackSteps};
pub use filter_pipeline::FilterPipeline;
pub use rerank_pipeline::RerankPipeline;
pub use scored::{sort_by_score, ScoredCandidate};
pub use similarity::{
    actor_similarity, content_similarity, genre_similarity, rating_score, recency_score,
    ScoringWeights, SignalBreakdown, SimilarityScorer,
};
pub use traits::{Filter, Reranker};
