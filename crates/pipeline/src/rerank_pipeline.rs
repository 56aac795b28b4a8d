//! Chains re-ranking stages, mirroring [`FilterPipeline`](crate::FilterPipeline).

use crate::scored::ScoredCandidate;
use crate::traits::Reranker;
use rand::RngCore;

/// Ordered list of re-ranking stages sharing one randomness source.
///
/// ## Usage
/// ```ignore
/// let reranking = RerankPipeline::new()
///     .add_stage(DiversityFilter::new(3))
///     .add_stage(ExplorationReranker::new(0.15));
///
/// let final_list = reranking.apply(sorted, &mut rng);
/// ```
pub struct RerankPipeline {
    stages: Vec<Box<dyn Reranker>>,
}

impl RerankPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn add_stage(mut self, stage: impl Reranker + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage in order over a score-descending list.
    pub fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        rng: &mut dyn RngCore,
    ) -> Vec<ScoredCandidate> {
        let mut current = candidates;
        for stage in &self.stages {
            let before = current.len();
            current = stage.rerank(current, rng);
            tracing::debug!("Rerank {}: {} -> {} candidates", stage.name(), before, current.len());
        }
        current
    }
}

impl Default for RerankPipeline {
    fn default() -> Self {
        Self::new()
    }
}
