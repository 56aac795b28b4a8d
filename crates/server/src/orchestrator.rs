//! # Recommendation Orchestrator
//!
//! This module coordinates the three request flows over the catalog gateway,
//! the profile store and the scoring pipeline.
//!
//! ## Recommendation flow
//! 1. Load the profile (missing profile fails the request)
//! 2. Fetch one popular page as candidates (failure fails the request)
//! 3. Apply filters (duplicates, favorites)
//! 4. Fetch candidate and favorite details in parallel (per-movie failures skipped)
//! 5. Score, blend and sort on the blocking pool
//! 6. Re-rank for diversity and exploration
//! 7. Return the top N
//!
//! ## Onboarding flow
//! Fetch favorite details, build initial weights, store the profile.
//!
//! ## Feedback flow
//! Load profile, fetch the movie, nudge weights, write back, log the interaction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::{Datelike, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use models::{
    FeedbackAction, GenreInfo, Interaction, MovieId, MovieRecord, MovieReference, UserProfile,
};
use pipeline::filters::{DedupeFilter, ExcludeFavoritesFilter};
use pipeline::rerankers::{DiversityFilter, ExplorationReranker};
use pipeline::{
    apply_collaborative_signal, build_initial_profile, sort_by_score, FeedbackLearner,
    FilterPipeline, LearnedWeights, PopularitySignal, RerankPipeline, ScoredCandidate,
    SimilarityScorer,
};
use sources::{fetch_details_batch, CatalogGateway, ProfileStore};

use crate::config::RecommenderConfig;
use crate::error::{Result, ServiceError};

/// Onboarding input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileCreateRequest {
    pub user_id: String,
    pub email: Option<String>,
    /// Titles may be left empty; they are filled from the catalog
    pub favorite_movies: Vec<MovieReference>,
    pub preferred_genres: Vec<String>,
    pub preferred_actors: Vec<String>,
}

/// One page of recommendations
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationPage {
    pub user_id: String,
    pub recommendations: Vec<ScoredCandidate>,
    pub total: usize,
    pub page: u32,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    catalog: Arc<dyn CatalogGateway>,
    store: Arc<dyn ProfileStore>,
    config: Arc<RecommenderConfig>,
    filter_pipeline: Arc<FilterPipeline>,
    rerank_pipeline: Arc<RerankPipeline>,
    learner: FeedbackLearner,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator with all components initialized
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        store: Arc<dyn ProfileStore>,
        config: RecommenderConfig,
    ) -> Self {
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(DedupeFilter)
                .add_filter(ExcludeFavoritesFilter),
        );
        let rerank_pipeline = Arc::new(
            RerankPipeline::new()
                .add_stage(DiversityFilter::new(config.diversity_threshold))
                .add_stage(ExplorationReranker::new(config.exploration_rate)),
        );
        let learner = FeedbackLearner::new(config.feedback);

        info!(
            "Orchestrator ready (catalog: {}, store: {})",
            catalog.name(),
            store.name()
        );

        Self {
            catalog,
            store,
            config: Arc::new(config),
            filter_pipeline,
            rerank_pipeline,
            learner,
        }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Build and store a profile from onboarding data.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn create_profile(&self, request: ProfileCreateRequest) -> Result<UserProfile> {
        if request.user_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput("user id must not be empty".to_string()));
        }

        let favorite_ids: Vec<MovieId> = request.favorite_movies.iter().map(|m| m.id).collect();
        let favorites = fetch_details_batch(self.catalog.clone(), &favorite_ids).await;
        if favorites.len() < favorite_ids.len() {
            warn!(
                "Building profile from {} of {} favorites",
                favorites.len(),
                favorite_ids.len()
            );
        }

        let weights = build_initial_profile(
            &favorites,
            &request.preferred_genres,
            &request.preferred_actors,
        );

        let favorite_movies = request
            .favorite_movies
            .into_iter()
            .map(|reference| fill_title(reference, &favorites))
            .collect();

        let now = Utc::now();
        let profile = UserProfile {
            user_id: request.user_id.clone(),
            email: request.email,
            favorite_movies,
            preferred_genres: request.preferred_genres,
            preferred_actors: request.preferred_actors,
            genre_weights: weights.genre_weights,
            actor_weights: weights.actor_weights,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.store.put_profile(&request.user_id, &profile).await?;
        info!(
            "Created profile with {} genre and {} actor weights",
            profile.genre_weights.len(),
            profile.actor_weights.len()
        );
        Ok(profile)
    }

    /// Load a profile or fail with `ProfileNotFound`.
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::ProfileNotFound(user_id.to_string()))
    }

    pub async fn interactions(&self, user_id: &str) -> Result<Vec<Interaction>> {
        Ok(self.store.interactions(user_id).await?)
    }

    // ========================================================================
    // Recommendations
    // ========================================================================

    /// Main entry point: Get recommendations for a user
    ///
    /// # Arguments
    /// * `user_id` - The user to generate recommendations for
    /// * `limit` - Page size; config default when `None`, clamped to `[1, max_limit]`
    /// * `page` - Popular-listing page to draw candidates from (1-based)
    #[instrument(skip(self))]
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        limit: Option<usize>,
        page: u32,
    ) -> Result<RecommendationPage> {
        let start_time = Instant::now();
        let limit = self.config.resolve_limit(limit);
        let page = page.max(1);

        let profile = self.get_profile(user_id).await?;

        let popular = self
            .catalog
            .get_popular(page, self.config.candidate_min_rating)
            .await?;
        let fetched = popular.len();

        let candidates = self
            .filter_pipeline
            .apply(popular, &profile)
            .context("Failed to apply candidate filters")?;
        info!(
            "Candidates: {} fetched, {} after filters",
            fetched,
            candidates.len()
        );

        let (mut detailed, favorites) = self.fetch_details(&candidates, &profile).await;
        keep_listing_popularity(&mut detailed, &candidates);
        debug!(
            "Fetched details for {} candidates and {} favorites",
            detailed.len(),
            favorites.len()
        );

        let weights = LearnedWeights {
            genre_weights: profile.genre_weights,
            actor_weights: profile.actor_weights,
        };
        let mut recommendations = self.score_and_rank(weights, favorites, detailed).await?;
        recommendations.truncate(limit);

        info!(
            "Returning {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );

        Ok(RecommendationPage {
            user_id: user_id.to_string(),
            total: recommendations.len(),
            recommendations,
            page,
        })
    }

    /// Fetch candidate and favorite details in parallel
    async fn fetch_details(
        &self,
        candidates: &[MovieRecord],
        profile: &UserProfile,
    ) -> (Vec<MovieRecord>, Vec<MovieRecord>) {
        let candidate_ids: Vec<MovieId> = candidates.iter().map(|m| m.id).collect();
        let favorite_ids = profile.favorite_ids();

        tokio::join!(
            fetch_details_batch(self.catalog.clone(), &candidate_ids),
            fetch_details_batch(self.catalog.clone(), &favorite_ids)
        )
    }

    /// Score, blend, sort and re-rank on the blocking pool.
    async fn score_and_rank(
        &self,
        weights: LearnedWeights,
        favorites: Vec<MovieRecord>,
        candidates: Vec<MovieRecord>,
    ) -> Result<Vec<ScoredCandidate>> {
        let config = self.config.clone();
        let rerank_pipeline = self.rerank_pipeline.clone();
        let current_year = Utc::now().year();

        let ranked = tokio::task::spawn_blocking(move || {
            let scorer = SimilarityScorer::new(config.scoring, current_year);
            let mut scored = scorer.score_candidates(&weights, &favorites, candidates);

            apply_collaborative_signal(&mut scored, &PopularitySignal, config.collaborative_weight);
            if let Some(boost) = &config.trending_boost {
                boost.apply(&mut scored);
            }
            sort_by_score(&mut scored);

            let mut rng = match config.exploration_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            rerank_pipeline.apply(scored, &mut rng)
        })
        .await
        .context("Scoring task panicked")?;

        Ok(ranked)
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    /// Apply like/dislike feedback and return the updated weights.
    #[instrument(skip(self))]
    pub async fn record_feedback(
        &self,
        user_id: &str,
        movie_id: MovieId,
        action: FeedbackAction,
    ) -> Result<LearnedWeights> {
        let mut profile = self.get_profile(user_id).await?;
        let movie = self.catalog.get_details(movie_id).await?;

        let weights = self.learner.apply(
            LearnedWeights {
                genre_weights: std::mem::take(&mut profile.genre_weights),
                actor_weights: std::mem::take(&mut profile.actor_weights),
            },
            &movie,
            &action,
        );

        profile.genre_weights = weights.genre_weights.clone();
        profile.actor_weights = weights.actor_weights.clone();
        profile.updated_at = Some(Utc::now());
        self.store.put_profile(user_id, &profile).await?;

        let interaction = Interaction::now(user_id, movie_id, action);
        if let Err(e) = self.store.record_interaction(&interaction).await {
            warn!(error = %e, "Failed to record interaction");
        }

        info!("Applied {} feedback on \"{}\"", interaction.action, movie.title);
        Ok(weights)
    }

    // ========================================================================
    // Catalog browsing
    // ========================================================================

    /// Popular movies at or above `min_rating` (config default when `None`).
    pub async fn popular(&self, page: u32, min_rating: Option<f64>) -> Result<Vec<MovieRecord>> {
        let min_rating = min_rating.unwrap_or(self.config.browse_min_rating);
        Ok(self.catalog.get_popular(page.max(1), min_rating).await?)
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieRecord>> {
        if query.trim().is_empty() {
            return Err(ServiceError::InvalidInput("search query must not be empty".to_string()));
        }
        Ok(self.catalog.search(query.trim(), page.max(1)).await?)
    }

    pub async fn movie_details(&self, movie_id: MovieId) -> Result<MovieRecord> {
        Ok(self.catalog.get_details(movie_id).await?)
    }

    pub async fn genres(&self) -> Result<Vec<GenreInfo>> {
        Ok(self.catalog.list_genres().await?)
    }
}

/// The blend and trending boost rank by the listing's popularity, which
/// detail lookups may report differently.
fn keep_listing_popularity(detailed: &mut [MovieRecord], listing: &[MovieRecord]) {
    let popularity: HashMap<MovieId, f64> = listing.iter().map(|m| (m.id, m.popularity)).collect();
    for movie in detailed.iter_mut() {
        if let Some(&value) = popularity.get(&movie.id) {
            movie.popularity = value;
        }
    }
}

/// Use the catalog title when the caller left it empty.
fn fill_title(reference: MovieReference, fetched: &[MovieRecord]) -> MovieReference {
    if !reference.title.is_empty() {
        return reference;
    }
    match fetched.iter().find(|m| m.id == reference.id) {
        Some(movie) => movie.as_reference(),
        None => reference,
    }
}
