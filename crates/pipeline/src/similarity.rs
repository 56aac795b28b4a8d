//! Similarity signals between a profile and a candidate movie.
//!
//! Every signal is a pure function returning a value in a small fixed
//! range. Bad input degrades to the signal's neutral value; nothing here
//! can fail.

use crate::features::{extract_tokens, LearnedWeights};
use crate::math::{clamp, cosine, mean, population_std};
use crate::scored::ScoredCandidate;
use models::{MovieRecord, WeightMap};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Genre weight sum that saturates genre similarity
pub const GENRE_SATURATION: f64 = 2.0;

/// Actor weight sum that saturates actor similarity
pub const ACTOR_SATURATION: f64 = 1.5;

/// Billed actors considered by actor similarity
pub const TOP_CAST_FOR_SIMILARITY: usize = 5;

/// Billed actors shown with a recommendation
pub const DISPLAY_ACTORS: usize = 3;

/// Assumed release year when the date is missing entirely
pub const DEFAULT_RELEASE_YEAR: i32 = 2000;

/// Recency score for a date whose year cannot be parsed
pub const NEUTRAL_RECENCY: f64 = 0.5;

/// Years over which recency decays from 1.0 to 0.0
pub const RECENCY_HORIZON_YEARS: f64 = 30.0;

// ============================================================================
// Individual signals
// ============================================================================

/// `min(sum of profile weights for the movie's genres / 2.0, 1.0)`.
pub fn genre_similarity(genre_weights: &WeightMap, movie_genres: &[String]) -> f64 {
    let total: f64 = movie_genres
        .iter()
        .map(|g| genre_weights.get(g).copied().unwrap_or(0.0))
        .sum();
    clamp(total / GENRE_SATURATION, 0.0, 1.0)
}

/// `min(sum of profile weights for the top-5 actors / 1.5, 1.0)`.
///
/// A profile without any actor weights scores exactly 0.0.
pub fn actor_similarity(actor_weights: &WeightMap, movie_actors: &[String]) -> f64 {
    if actor_weights.is_empty() {
        return 0.0;
    }
    let total: f64 = movie_actors
        .iter()
        .take(TOP_CAST_FOR_SIMILARITY)
        .map(|a| actor_weights.get(a).copied().unwrap_or(0.0))
        .sum();
    clamp(total / ACTOR_SATURATION, 0.0, 1.0)
}

/// Mean cosine similarity between the candidate and each favorite.
///
/// ## Algorithm
/// 1. Extract feature tokens for the candidate and every favorite
/// 2. Index the union of all tokens into one vocabulary
/// 3. Encode each token list as a binary membership vector
/// 4. Average `cosine(candidate, favorite)` over the favorites
///
/// Returns 0.0 when there are no favorites or the result is not finite.
pub fn content_similarity(favorites: &[MovieRecord], candidate: &MovieRecord) -> f64 {
    if favorites.is_empty() {
        return 0.0;
    }

    let candidate_tokens: Vec<String> = extract_tokens(candidate)
        .iter()
        .map(|t| t.to_string())
        .collect();
    let favorite_tokens: Vec<Vec<String>> = favorites
        .iter()
        .map(|m| extract_tokens(m).iter().map(|t| t.to_string()).collect())
        .collect();

    let mut vocabulary: HashMap<&str, usize> = HashMap::new();
    for token in candidate_tokens.iter().chain(favorite_tokens.iter().flatten()) {
        let next = vocabulary.len();
        vocabulary.entry(token.as_str()).or_insert(next);
    }

    let encode = |tokens: &[String]| {
        let mut vector = vec![0.0; vocabulary.len()];
        for token in tokens {
            if let Some(&slot) = vocabulary.get(token.as_str()) {
                vector[slot] = 1.0;
            }
        }
        vector
    };

    let candidate_vector = encode(&candidate_tokens);
    let similarities: Vec<f64> = favorite_tokens
        .iter()
        .map(|tokens| cosine(&candidate_vector, &encode(tokens)))
        .collect();

    let score = mean(&similarities);
    if score.is_finite() { score } else { 0.0 }
}

/// `vote_average / 10`.
pub fn rating_score(vote_average: f64) -> f64 {
    clamp(vote_average / 10.0, 0.0, 1.0)
}

/// Linear decay over 30 years from the release year.
///
/// A missing date counts as year 2000. A present date whose first four
/// characters are not a year scores the neutral 0.5. Future releases
/// score 1.0.
pub fn recency_score(release_date: Option<&str>, current_year: i32) -> f64 {
    let release_year = match release_date {
        None => DEFAULT_RELEASE_YEAR,
        Some(date) if date.is_empty() => DEFAULT_RELEASE_YEAR,
        Some(date) => match date.get(..4).and_then(|y| y.parse::<i32>().ok()) {
            Some(year) => year,
            None => return NEUTRAL_RECENCY,
        },
    };

    let age = f64::from(current_year - release_year);
    clamp(1.0 - age / RECENCY_HORIZON_YEARS, 0.0, 1.0)
}

// ============================================================================
// Combination
// ============================================================================

/// Combination weights of the five signals. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub genre: f64,
    pub actor: f64,
    pub content: f64,
    pub rating: f64,
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            genre: 0.35,
            actor: 0.20,
            content: 0.25,
            rating: 0.10,
            recency: 0.10,
        }
    }
}

/// The five raw signals for one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub genre: f64,
    pub actor: f64,
    pub content: f64,
    pub rating: f64,
    pub recency: f64,
}

impl SignalBreakdown {
    /// Weighted sum. No normalization is applied.
    pub fn combine(&self, weights: &ScoringWeights) -> f64 {
        weights.genre * self.genre
            + weights.actor * self.actor
            + weights.content * self.content
            + weights.rating * self.rating
            + weights.recency * self.recency
    }

    /// `mean(genre, actor, content) * (1 + std(genre, actor, content))`
    pub fn confidence(&self) -> f64 {
        let signals = [self.genre, self.actor, self.content];
        mean(&signals) * (1.0 + population_std(&signals))
    }
}

/// Scores candidates against one profile.
///
/// The current year is injected so scoring stays a pure function.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    weights: ScoringWeights,
    current_year: i32,
}

impl SimilarityScorer {
    pub fn new(weights: ScoringWeights, current_year: i32) -> Self {
        Self {
            weights,
            current_year,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// All five signals for one candidate.
    pub fn breakdown(
        &self,
        profile: &LearnedWeights,
        favorites: &[MovieRecord],
        candidate: &MovieRecord,
    ) -> SignalBreakdown {
        SignalBreakdown {
            genre: genre_similarity(&profile.genre_weights, &candidate.genres),
            actor: actor_similarity(
                &profile.actor_weights,
                &candidate.top_cast(TOP_CAST_FOR_SIMILARITY),
            ),
            content: content_similarity(favorites, candidate),
            rating: rating_score(candidate.vote_average),
            recency: recency_score(candidate.release_date.as_deref(), self.current_year),
        }
    }

    /// Score a single candidate.
    pub fn score(
        &self,
        profile: &LearnedWeights,
        favorites: &[MovieRecord],
        candidate: MovieRecord,
    ) -> ScoredCandidate {
        let breakdown = self.breakdown(profile, favorites, &candidate);
        ScoredCandidate::new(candidate, breakdown.combine(&self.weights), breakdown)
    }

    /// Score all candidates in parallel, preserving input order.
    pub fn score_candidates(
        &self,
        profile: &LearnedWeights,
        favorites: &[MovieRecord],
        candidates: Vec<MovieRecord>,
    ) -> Vec<ScoredCandidate> {
        candidates
            .into_par_iter()
            .map(|candidate| self.score(profile, favorites, candidate))
            .collect()
    }
}
