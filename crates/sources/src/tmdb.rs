//! Catalog gateway backed by the live TMDB API.

use crate::catalog::{filter_min_rating, CatalogError, CatalogGateway};
use async_trait::async_trait;
use models::{GenreInfo, MovieId, MovieRecord};
use tmdb_client::TmdbClient;
use tracing::{debug, instrument};

/// TMDB-backed gateway. Cheap to clone; the HTTP client is shared.
#[derive(Clone)]
pub struct TmdbCatalog {
    client: TmdbClient,
}

impl TmdbCatalog {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogGateway for TmdbCatalog {
    #[instrument(skip(self))]
    async fn get_popular(
        &self,
        page: u32,
        min_rating: f64,
    ) -> Result<Vec<MovieRecord>, CatalogError> {
        let movies = self.client.popular_movies(page).await?;
        let fetched = movies.len();
        let movies = filter_min_rating(movies, min_rating);
        debug!(
            "Popular page {}: {} fetched, {} at or above rating {}",
            page,
            fetched,
            movies.len(),
            min_rating
        );
        Ok(movies)
    }

    async fn get_details(&self, movie_id: MovieId) -> Result<MovieRecord, CatalogError> {
        Ok(self.client.movie_details(movie_id).await?)
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieRecord>, CatalogError> {
        Ok(self.client.search_movies(query, page).await?)
    }

    async fn list_genres(&self) -> Result<Vec<GenreInfo>, CatalogError> {
        Ok(self.client.genres().await?)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
