//! Population-level signals blended into the similarity score.
//!
//! There is no interaction matrix behind these yet. The only signal is a
//! movie's catalog popularity, kept behind [`CollaborativeSignal`] so a real
//! collaborative-filtering source can take its place without touching the
//! scorer.

use crate::math::clamp;
use crate::scored::ScoredCandidate;
use models::MovieRecord;
use serde::{Deserialize, Serialize};

/// Popularity at which the popularity signal saturates
pub const POPULARITY_SATURATION: f64 = 100.0;

/// A per-movie signal in [0, 1] derived from the whole user population.
pub trait CollaborativeSignal: Send + Sync {
    fn name(&self) -> &str;

    fn signal(&self, movie: &MovieRecord) -> f64;
}

/// `min(popularity / 100, 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct PopularitySignal;

impl CollaborativeSignal for PopularitySignal {
    fn name(&self) -> &str {
        "PopularitySignal"
    }

    fn signal(&self, movie: &MovieRecord) -> f64 {
        clamp(movie.popularity / POPULARITY_SATURATION, 0.0, 1.0)
    }
}

/// `(1 - weight) * score + weight * signal`
pub fn collaborative_blend(score: f64, signal: f64, weight: f64) -> f64 {
    (1.0 - weight) * score + weight * signal
}

/// Blend `signal` into every candidate's score.
pub fn apply_collaborative_signal(
    candidates: &mut [ScoredCandidate],
    signal: &dyn CollaborativeSignal,
    weight: f64,
) {
    for candidate in candidates.iter_mut() {
        candidate.score = collaborative_blend(candidate.score, signal.signal(&candidate.movie), weight);
    }
}

/// Flat bonus for movies that are trending right now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingBoost {
    /// Popularity strictly above this counts as trending
    pub popularity_threshold: f64,
    pub boost: f64,
    pub max_score: f64,
}

impl Default for TrendingBoost {
    fn default() -> Self {
        Self {
            popularity_threshold: 80.0,
            boost: 0.05,
            max_score: 1.0,
        }
    }
}

impl TrendingBoost {
    pub fn apply(&self, candidates: &mut [ScoredCandidate]) {
        for candidate in candidates.iter_mut() {
            if candidate.movie.popularity > self.popularity_threshold {
                candidate.score = (candidate.score + self.boost).min(self.max_score);
            }
        }
    }
}
