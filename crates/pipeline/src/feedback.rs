//! Weight learning from explicit like/dislike feedback.
//!
//! Each event nudges the weights of the movie's genres and top-billed actors
//! by a fixed step, then clamps. There is no decay: repeated feedback keeps
//! moving the same direction until the clamp stops it.

use crate::features::LearnedWeights;
use crate::math::clamp;
use models::{FeedbackAction, MovieRecord, WeightMap};
use serde::{Deserialize, Serialize};

/// Lower bound of any weight after feedback
pub const WEIGHT_FLOOR: f64 = 0.1;

/// Upper bound of any weight after feedback
pub const WEIGHT_CEILING: f64 = 2.0;

/// Weight assumed for a genre or actor the profile has never seen
pub const BASELINE_WEIGHT: f64 = 1.0;

/// Billed actors affected by one feedback event
pub const TOP_CAST_FOR_FEEDBACK: usize = 3;

/// Step sizes per event and dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSteps {
    pub like_genre: f64,
    pub like_actor: f64,
    pub dislike_genre: f64,
    pub dislike_actor: f64,
}

impl Default for FeedbackSteps {
    fn default() -> Self {
        Self {
            like_genre: 0.05,
            like_actor: 0.04,
            dislike_genre: 0.03,
            dislike_actor: 0.02,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackLearner {
    steps: FeedbackSteps,
}

impl FeedbackLearner {
    pub fn new(steps: FeedbackSteps) -> Self {
        Self { steps }
    }

    /// Apply one feedback event and return the updated weights.
    ///
    /// Actions other than like/dislike return the weights unchanged.
    pub fn apply(
        &self,
        mut weights: LearnedWeights,
        movie: &MovieRecord,
        action: &FeedbackAction,
    ) -> LearnedWeights {
        let (genre_delta, actor_delta) = match action {
            FeedbackAction::Like => (self.steps.like_genre, self.steps.like_actor),
            FeedbackAction::Dislike => (-self.steps.dislike_genre, -self.steps.dislike_actor),
            FeedbackAction::Other(action) => {
                tracing::debug!("Ignoring feedback action {:?}", action);
                return weights;
            }
        };

        for genre in &movie.genres {
            nudge(&mut weights.genre_weights, genre, genre_delta);
        }
        for actor in movie.top_cast(TOP_CAST_FOR_FEEDBACK) {
            nudge(&mut weights.actor_weights, &actor, actor_delta);
        }

        weights
    }
}

fn nudge(weights: &mut WeightMap, key: &str, delta: f64) {
    let current = weights.get(key).copied().unwrap_or(BASELINE_WEIGHT);
    weights.insert(key.to_string(), clamp(current + delta, WEIGHT_FLOOR, WEIGHT_CEILING));
}
