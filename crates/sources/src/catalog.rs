//! The Catalog Gateway seam.
//!
//! Everything the engine knows about movies comes through this trait:
//! popular listings (recommendation candidates), details (scoring input),
//! search and the genre list. Implementations own any caching or retry
//! policy; the engine itself does neither.

use async_trait::async_trait;
use models::{GenreInfo, MovieId, MovieRecord};
use thiserror::Error;
use tmdb_client::TmdbClientError;

/// Errors surfaced by a catalog gateway
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found in catalog: {0}")]
    NotFound(String),

    #[error("Catalog request failed: {0}")]
    Upstream(String),
}

impl From<TmdbClientError> for CatalogError {
    fn from(err: TmdbClientError) -> Self {
        match err {
            TmdbClientError::NotFound(what) => CatalogError::NotFound(what),
            other => CatalogError::Upstream(other.to_string()),
        }
    }
}

/// Read-only access to the movie catalog.
///
/// ## Design Note
/// - `Send + Sync` so one gateway can be shared (`Arc<dyn CatalogGateway>`)
///   across concurrent per-movie fetch tasks
/// - Listing methods return records with empty credits/keywords; only
///   `get_details` is guaranteed to populate them
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// One page of popular movies with `vote_average >= min_rating`.
    async fn get_popular(&self, page: u32, min_rating: f64)
    -> Result<Vec<MovieRecord>, CatalogError>;

    /// Full record for one movie: genres, billed cast, crew, keywords.
    async fn get_details(&self, movie_id: MovieId) -> Result<MovieRecord, CatalogError>;

    /// Unfiltered title search.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieRecord>, CatalogError>;

    /// All genres known to the catalog.
    async fn list_genres(&self) -> Result<Vec<GenreInfo>, CatalogError>;

    /// Gateway name for logging
    fn name(&self) -> &'static str;
}

/// Client-side rating filter shared by gateway implementations.
pub(crate) fn filter_min_rating(movies: Vec<MovieRecord>, min_rating: f64) -> Vec<MovieRecord> {
    movies
        .into_iter()
        .filter(|movie| movie.vote_average >= min_rating)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_not_found_maps_to_not_found() {
        let err: CatalogError = TmdbClientError::NotFound("movie/1".to_string()).into();
        assert!(matches!(err, CatalogError::NotFound(_)));

        let err: CatalogError = TmdbClientError::Status {
            endpoint: "movie/popular".to_string(),
            status: 503,
        }
        .into();
        assert!(matches!(err, CatalogError::Upstream(_)));
    }

    #[test]
    fn test_filter_min_rating_is_inclusive() {
        let mut a = MovieRecord::new(1, "A");
        a.vote_average = 6.5;
        let mut b = MovieRecord::new(2, "B");
        b.vote_average = 6.4;

        let kept = filter_min_rating(vec![a, b], 6.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }
}
