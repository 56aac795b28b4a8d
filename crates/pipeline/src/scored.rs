//! The per-request unit flowing from the scorer into the re-rankers.

use crate::similarity::{SignalBreakdown, DISPLAY_ACTORS};
use models::MovieRecord;
use serde::Serialize;

/// A candidate movie with its score and display fields.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub movie: MovieRecord,
    pub score: f64,
    pub genres: Vec<String>,
    /// Top-3 billed actors
    pub actors: Vec<String>,
    pub breakdown: SignalBreakdown,
    pub confidence: f64,
}

impl ScoredCandidate {
    pub fn new(movie: MovieRecord, score: f64, breakdown: SignalBreakdown) -> Self {
        Self {
            genres: movie.genres.clone(),
            actors: movie.top_cast(DISPLAY_ACTORS),
            confidence: breakdown.confidence(),
            movie,
            score,
            breakdown,
        }
    }
}

/// Sort by score, highest first. Ties keep their input order.
pub fn sort_by_score(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}
