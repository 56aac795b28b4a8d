//! Genre diversity over the head of the ranking.

use crate::scored::ScoredCandidate;
use crate::traits::Reranker;
use rand::RngCore;
use std::collections::HashSet;

/// Drops candidates that add no new genre once the head is filled.
///
/// ## Algorithm
/// Walk the list in score order. Keep a candidate if fewer than
/// `threshold` candidates have been kept so far, or if it has a genre
/// none of the kept candidates had. Only kept candidates contribute to
/// the seen genres.
pub struct DiversityFilter {
    threshold: usize,
}

impl DiversityFilter {
    pub const DEFAULT_THRESHOLD: usize = 3;

    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Default for DiversityFilter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl Reranker for DiversityFilter {
    fn name(&self) -> &str {
        "DiversityFilter"
    }

    fn rerank(
        &self,
        candidates: Vec<ScoredCandidate>,
        _rng: &mut dyn RngCore,
    ) -> Vec<ScoredCandidate> {
        let mut seen_genres: HashSet<String> = HashSet::new();
        let mut kept = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let adds_genre = candidate.genres.iter().any(|g| !seen_genres.contains(g));
            if adds_genre || kept.len() < self.threshold {
                seen_genres.extend(candidate.genres.iter().cloned());
                kept.push(candidate);
            }
        }

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::SignalBreakdown;
    use models::MovieRecord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidate(id: u64, genres: &[&str]) -> ScoredCandidate {
        let mut movie = MovieRecord::new(id, "m");
        movie.genres = genres.iter().map(|g| g.to_string()).collect();
        ScoredCandidate::new(movie, 1.0 / id as f64, SignalBreakdown::default())
    }

    fn ids(candidates: &[ScoredCandidate]) -> Vec<u64> {
        candidates.iter().map(|c| c.movie.id).collect()
    }

    #[test]
    fn test_head_is_always_kept() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = vec![
            candidate(1, &["Action"]),
            candidate(2, &["Action"]),
            candidate(3, &["Action"]),
            candidate(4, &["Action"]),
            candidate(5, &["Action", "Comedy"]),
            candidate(6, &["Comedy"]),
        ];

        let kept = DiversityFilter::default().rerank(input, &mut rng);
        assert_eq!(ids(&kept), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_candidates_without_genres_only_fill_head() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = vec![candidate(1, &[]), candidate(2, &[]), candidate(3, &[]), candidate(4, &[])];

        let kept = DiversityFilter::new(2).rerank(input, &mut rng);
        assert_eq!(ids(&kept), vec![1, 2]);
    }

    #[test]
    fn test_short_input_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = vec![candidate(1, &["Drama"]), candidate(2, &["Drama"])];

        let kept = DiversityFilter::default().rerank(input, &mut rng);
        assert_eq!(ids(&kept), vec![1, 2]);
    }
}
