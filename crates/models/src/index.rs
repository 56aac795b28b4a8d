//! MovieIndex: an in-memory catalog built from a snapshot.
//!
//! The index keeps:
//! - movies by id for O(1) detail lookups
//! - a popularity ordering (most popular first) for paged listings
//! - the genre list as published by the catalog
//!
//! It backs the offline catalog gateway used by tests and the CLI's
//! snapshot mode.

use crate::error::{DataLoadError, Result};
use crate::parser::{self, CatalogSnapshot};
use crate::types::{GenreInfo, MovieId, MovieRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Number of movies per listing page, matching the TMDB page size
pub const PAGE_SIZE: usize = 20;

/// In-memory movie catalog with O(1) lookups by id.
#[derive(Debug, Default)]
pub struct MovieIndex {
    movies: HashMap<MovieId, MovieRecord>,
    /// Movie ids sorted by popularity, most popular first
    by_popularity: Vec<MovieId>,
    genres: Vec<GenreInfo>,
}

impl MovieIndex {
    /// Creates a new, empty MovieIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a snapshot file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog snapshot from {:?}", path);
        let snapshot = parser::parse_snapshot_file(path)?;
        let index = Self::from_snapshot(snapshot)?;
        info!(
            "Catalog snapshot loaded: {} movies, {} genres",
            index.movies.len(),
            index.genres.len()
        );
        Ok(index)
    }

    /// Build an index from an already parsed snapshot.
    ///
    /// Fails on duplicate ids, vote averages outside [0, 10] and negative
    /// popularity.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let mut index = MovieIndex::new();
        index.genres = snapshot.genres;

        for movie in snapshot.movies {
            validate_movie(&movie)?;
            if index.movies.contains_key(&movie.id) {
                return Err(DataLoadError::DuplicateMovie(movie.id));
            }
            index.insert_unsorted(movie);
        }
        index.rebuild_popularity_order();

        Ok(index)
    }

    /// Build an index from trusted movies, replacing duplicates by id.
    ///
    /// The popularity ordering is computed once after all inserts.
    pub fn from_movies(movies: impl IntoIterator<Item = MovieRecord>, genres: Vec<GenreInfo>) -> Self {
        let mut index = MovieIndex::new();
        for movie in movies {
            index.insert_unsorted(movie);
        }
        index.genres = genres;
        index.rebuild_popularity_order();
        index
    }

    /// Insert or replace a movie, keeping the popularity ordering current.
    ///
    /// The stored cast is sorted by billing order.
    pub fn insert_movie(&mut self, movie: MovieRecord) {
        self.insert_unsorted(movie);
        self.rebuild_popularity_order();
    }

    fn insert_unsorted(&mut self, mut movie: MovieRecord) {
        movie.sort_cast_by_billing();
        self.movies.insert(movie.id, movie);
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.get(&id)
    }

    /// The genre list
    pub fn genres(&self) -> &[GenreInfo] {
        &self.genres
    }

    /// Number of movies in the index
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// One page (1-based) of movies in popularity order.
    ///
    /// Pages past the end are empty; page 0 is treated as page 1.
    pub fn popular_page(&self, page: u32) -> Vec<&MovieRecord> {
        let page = page.max(1) as usize;
        self.by_popularity
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .filter_map(|id| self.movies.get(id))
            .collect()
    }

    /// Case-insensitive title search.
    ///
    /// Exact title matches come first, then substring matches; within each
    /// group movies keep popularity order. Results are paged like
    /// `popular_page`.
    pub fn search(&self, query: &str, page: u32) -> Vec<&MovieRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut exact = Vec::new();
        let mut partial = Vec::new();
        for movie in self.by_popularity.iter().filter_map(|id| self.movies.get(id)) {
            let title = movie.title.to_lowercase();
            if title == query {
                exact.push(movie);
            } else if title.contains(&query) {
                partial.push(movie);
            }
        }

        let page = page.max(1) as usize;
        exact
            .into_iter()
            .chain(partial)
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    fn rebuild_popularity_order(&mut self) {
        let mut ids: Vec<(MovieId, f64)> = self
            .movies
            .values()
            .map(|m| (m.id, m.popularity))
            .collect();
        // Ties broken by id so the order is deterministic
        ids.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        self.by_popularity = ids.into_iter().map(|(id, _)| id).collect();
    }
}

fn validate_movie(movie: &MovieRecord) -> Result<()> {
    if !(0.0..=10.0).contains(&movie.vote_average) {
        return Err(DataLoadError::InvalidValue {
            field: format!("movies[{}].vote_average", movie.id),
            value: movie.vote_average.to_string(),
        });
    }
    if !(movie.popularity >= 0.0) {
        return Err(DataLoadError::InvalidValue {
            field: format!("movies[{}].popularity", movie.id),
            value: movie.popularity.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CastMember;

    fn movie(id: MovieId, title: &str, popularity: f64) -> MovieRecord {
        let mut movie = MovieRecord::new(id, title);
        movie.popularity = popularity;
        movie.vote_average = 7.0;
        movie
    }

    #[test]
    fn test_popular_page_orders_by_popularity() {
        let mut index = MovieIndex::new();
        index.insert_movie(movie(1, "Low", 5.0));
        index.insert_movie(movie(2, "High", 90.0));
        index.insert_movie(movie(3, "Mid", 40.0));

        let ids: Vec<MovieId> = index.popular_page(1).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(index.popular_page(2).is_empty());
    }

    #[test]
    fn test_popular_pages_split_at_page_size() {
        let mut index = MovieIndex::new();
        for id in 0..(PAGE_SIZE as u64 + 5) {
            index.insert_movie(movie(id, "Movie", 100.0 - id as f64));
        }

        assert_eq!(index.popular_page(1).len(), PAGE_SIZE);
        assert_eq!(index.popular_page(2).len(), 5);
        assert_eq!(index.popular_page(0).len(), PAGE_SIZE);
    }

    #[test]
    fn test_search_puts_exact_matches_first() {
        let mut index = MovieIndex::new();
        index.insert_movie(movie(1, "Heat Wave", 80.0));
        index.insert_movie(movie(2, "Heat", 10.0));
        index.insert_movie(movie(3, "Inception", 50.0));

        let ids: Vec<MovieId> = index.search("heat", 1).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(index.search("   ", 1).is_empty());
    }

    #[test]
    fn test_insert_sorts_cast() {
        let mut index = MovieIndex::new();
        let mut m = movie(1, "Heat", 1.0);
        m.cast = vec![
            CastMember { name: "B".to_string(), order: 1 },
            CastMember { name: "A".to_string(), order: 0 },
        ];
        index.insert_movie(m);

        assert_eq!(index.get_movie(1).unwrap().top_cast(1), vec!["A"]);
    }

    #[test]
    fn test_bulk_load_orders_by_popularity() {
        // Popularity deliberately unrelated to insertion order
        let movies: Vec<MovieRecord> = (0..5_000u64)
            .map(|id| movie(id, "Movie", ((id * 7919) % 5_000) as f64))
            .collect();
        let snapshot = CatalogSnapshot {
            genres: vec![],
            movies: movies.clone(),
        };

        let loaded = MovieIndex::from_snapshot(snapshot).unwrap();
        let built = MovieIndex::from_movies(movies, vec![]);
        assert_eq!(loaded.len(), 5_000);

        for index in [&loaded, &built] {
            let first: Vec<f64> = index.popular_page(1).iter().map(|m| m.popularity).collect();
            assert_eq!(first[0], 4_999.0);
            assert!(first.windows(2).all(|w| w[0] >= w[1]));
            assert_eq!(index.popular_page(250).len(), PAGE_SIZE);
            assert!(index.popular_page(251).is_empty());
        }
    }

    #[test]
    fn test_from_snapshot_rejects_duplicates() {
        let snapshot = CatalogSnapshot {
            genres: vec![],
            movies: vec![movie(1, "A", 1.0), movie(1, "B", 2.0)],
        };
        assert!(matches!(
            MovieIndex::from_snapshot(snapshot),
            Err(DataLoadError::DuplicateMovie(1))
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_out_of_range_vote() {
        let mut bad = movie(1, "A", 1.0);
        bad.vote_average = 11.0;
        let snapshot = CatalogSnapshot {
            genres: vec![],
            movies: vec![bad],
        };
        assert!(matches!(
            MovieIndex::from_snapshot(snapshot),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }
}
