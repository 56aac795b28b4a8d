//! Exploration/exploitation balance.

use crate::scored::ScoredCandidate;
use crate::traits::Reranker;
use rand::RngCore;
use rand::seq::SliceRandom;

/// Serves the top of the ranking as-is and mixes the rest up.
///
/// ## Algorithm
/// For `n >= 5` candidates:
/// 1. `num_exploit = floor(n * (1 - rate))` head items stay in place
/// 2. The tail is sampled without replacement (`n - num_exploit` items)
/// 3. Head and sample are concatenated
/// 4. Everything from index `num_exploit / 2` on is shuffled in place
///
/// Fewer than 5 candidates pass through untouched.
pub struct ExplorationReranker {
    rate: f64,
}

impl ExplorationReranker {
    pub const DEFAULT_RATE: f64 = 0.15;
    pub const MIN_CANDIDATES: usize = 5;

    /// `rate` is clamped into [0, 1].
    pub fn new(rate: f64) -> Self {
        Self {
            rate: crate::math::clamp(rate, 0.0, 1.0),
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for ExplorationReranker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE)
    }
}

impl Reranker for ExplorationReranker {
    fn name(&self) -> &str {
        "ExplorationReranker"
    }

    fn rerank(
        &self,
        mut candidates: Vec<ScoredCandidate>,
        rng: &mut dyn RngCore,
    ) -> Vec<ScoredCandidate> {
        let n = candidates.len();
        if n < Self::MIN_CANDIDATES {
            return candidates;
        }

        let num_exploit = ((n as f64) * (1.0 - self.rate)).floor() as usize;
        let num_explore = n - num_exploit;

        let mut pool = candidates.split_off(num_exploit);
        pool.shuffle(rng);
        pool.truncate(num_explore);
        candidates.append(&mut pool);

        candidates[num_exploit / 2..].shuffle(rng);
        candidates
    }
}
