//! Catalog gateway over an in-memory [`MovieIndex`].
//!
//! Used for offline runs against a snapshot file and as the catalog in
//! tests. Listing results are stripped down to what TMDB listings carry
//! (no genres, credits or keywords) so callers exercise the same
//! "list, then fetch details" path they would against the live API.

use crate::catalog::{filter_min_rating, CatalogError, CatalogGateway};
use async_trait::async_trait;
use models::{GenreInfo, MovieId, MovieIndex, MovieRecord};
use std::sync::Arc;

/// Snapshot-backed gateway
#[derive(Clone)]
pub struct InMemoryCatalog {
    index: Arc<MovieIndex>,
}

impl InMemoryCatalog {
    pub fn new(index: Arc<MovieIndex>) -> Self {
        Self { index }
    }

    /// Build a catalog from a list of fully populated movies.
    pub fn from_movies(movies: Vec<MovieRecord>, genres: Vec<GenreInfo>) -> Self {
        Self::new(Arc::new(MovieIndex::from_movies(movies, genres)))
    }

    pub fn index(&self) -> &MovieIndex {
        &self.index
    }
}

/// Reduce a full record to the fields a listing endpoint returns.
fn listing_view(movie: &MovieRecord) -> MovieRecord {
    MovieRecord {
        genres: Vec::new(),
        cast: Vec::new(),
        crew: Vec::new(),
        keywords: Vec::new(),
        imdb_id: None,
        ..movie.clone()
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
    async fn get_popular(
        &self,
        page: u32,
        min_rating: f64,
    ) -> Result<Vec<MovieRecord>, CatalogError> {
        let movies = self
            .index
            .popular_page(page)
            .into_iter()
            .map(listing_view)
            .collect();
        Ok(filter_min_rating(movies, min_rating))
    }

    async fn get_details(&self, movie_id: MovieId) -> Result<MovieRecord, CatalogError> {
        self.index
            .get_movie(movie_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("movie/{}", movie_id)))
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieRecord>, CatalogError> {
        Ok(self
            .index
            .search(query, page)
            .into_iter()
            .map(listing_view)
            .collect())
    }

    async fn list_genres(&self) -> Result<Vec<GenreInfo>, CatalogError> {
        Ok(self.index.genres().to_vec())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
