//! Tunables of the recommendation engine.
//!
//! Every field has a default, so an empty or partial TOML file is valid:
//!
//! ```toml
//! default_limit = 10
//! exploration_seed = 42
//!
//! [scoring]
//! genre = 0.4
//! content = 0.2
//!
//! [trending_boost]
//! popularity_threshold = 90.0
//! ```

use pipeline::{FeedbackSteps, ScoringWeights, TrendingBoost};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Minimum vote average of recommendation candidates
    pub candidate_min_rating: f64,
    /// Minimum vote average when browsing popular movies
    pub browse_min_rating: f64,
    pub default_limit: usize,
    pub max_limit: usize,
    pub diversity_threshold: usize,
    pub exploration_rate: f64,
    /// Weight of the collaborative signal in the final blend
    pub collaborative_weight: f64,
    /// Disabled unless present
    pub trending_boost: Option<TrendingBoost>,
    /// Fixed seed for exploration; fresh entropy per request when absent
    pub exploration_seed: Option<u64>,
    pub scoring: ScoringWeights,
    pub feedback: FeedbackSteps,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            candidate_min_rating: 6.0,
            browse_min_rating: 6.5,
            default_limit: 20,
            max_limit: 50,
            diversity_threshold: 3,
            exploration_rate: 0.15,
            collaborative_weight: 0.15,
            trending_boost: None,
            exploration_seed: None,
            scoring: ScoringWeights::default(),
            feedback: FeedbackSteps::default(),
        }
    }
}

impl RecommenderConfig {
    /// Load and validate a TOML config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring;
        let steps = &self.feedback;
        let unit_values = [
            ("exploration_rate", self.exploration_rate),
            ("collaborative_weight", self.collaborative_weight),
            ("scoring.genre", weights.genre),
            ("scoring.actor", weights.actor),
            ("scoring.content", weights.content),
            ("scoring.rating", weights.rating),
            ("scoring.recency", weights.recency),
            ("feedback.like_genre", steps.like_genre),
            ("feedback.like_actor", steps.like_actor),
            ("feedback.dislike_genre", steps.dislike_genre),
            ("feedback.dislike_actor", steps.dislike_actor),
        ];
        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.max_limit == 0 || self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "limits must satisfy 1 <= default_limit ({}) <= max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        let sum = weights.genre + weights.actor + weights.content + weights.rating + weights.recency;
        if (sum - 1.0).abs() > 1e-6 {
            tracing::warn!("Scoring weights sum to {:.3}, scores will not stay near [0, 1]", sum);
        }
        Ok(())
    }

    /// Resolve a requested page size: default when absent, clamped to [1, max_limit].
    ///
    /// A zero `max_limit` from an unvalidated config is treated as 1.
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        assert!(RecommenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_limit = 10\nexploration_seed = 7\n\n[scoring]\ngenre = 0.4\ncontent = 0.2\n\n[trending_boost]\npopularity_threshold = 90.0"
        )
        .unwrap();

        let config = RecommenderConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 50);
        assert_eq!(config.exploration_seed, Some(7));
        assert_eq!(config.scoring.genre, 0.4);
        assert_eq!(config.scoring.actor, 0.20);

        let boost = config.trending_boost.unwrap();
        assert_eq!(boost.popularity_threshold, 90.0);
        assert_eq!(boost.boost, 0.05);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "exploration_rate = 1.5").unwrap();

        let result = RecommenderConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_out_of_range_weights_and_steps_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feedback]\nlike_genre = -0.05").unwrap();
        let result = RecommenderConfig::load_from_file(file.path());
        match result {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("feedback.like_genre")),
            other => panic!("expected invalid config, got {:?}", other),
        }

        let mut config = RecommenderConfig::default();
        config.scoring.recency = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.scoring.recency = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_and_bad_toml() {
        let missing = RecommenderConfig::load_from_file(Path::new("/nonexistent/cinematch.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_limit = \"many\"").unwrap();
        let bad = RecommenderConfig::load_from_file(file.path());
        assert!(matches!(bad, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_resolve_limit() {
        let config = RecommenderConfig::default();
        assert_eq!(config.resolve_limit(None), 20);
        assert_eq!(config.resolve_limit(Some(0)), 1);
        assert_eq!(config.resolve_limit(Some(500)), 50);
        assert_eq!(config.resolve_limit(Some(7)), 7);

        let unvalidated = RecommenderConfig {
            default_limit: 0,
            max_limit: 0,
            ..RecommenderConfig::default()
        };
        assert_eq!(unvalidated.resolve_limit(None), 1);
        assert_eq!(unvalidated.resolve_limit(Some(30)), 1);
    }
}
