//! Filter to remove movies the user already named as favorites.
//!
//! The recommendation flow runs it after `DedupeFilter`. Both only drop
//! movies, so their relative order does not change the result.

use crate::traits::Filter;
use anyhow::Result;
use models::{MovieId, MovieRecord, UserProfile};
use std::collections::HashSet;

/// Removes candidates listed in the profile's favorites.
pub struct ExcludeFavoritesFilter;

impl Filter for ExcludeFavoritesFilter {
    fn name(&self) -> &str {
        "ExcludeFavoritesFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        profile: &UserProfile,
    ) -> Result<Vec<MovieRecord>> {
        let favorites: HashSet<MovieId> = profile.favorite_ids().into_iter().collect();
        Ok(candidates
            .into_iter()
            .filter(|candidate| !favorites.contains(&candidate.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_favorites_filter() {
        let mut profile = UserProfile::new("alice");
        profile.favorite_movies.push(MovieRecord::new(100, "Fav A").as_reference());
        profile.favorite_movies.push(MovieRecord::new(200, "Fav B").as_reference());

        let candidates = vec![
            MovieRecord::new(100, "Fav A"),
            MovieRecord::new(101, "New 1"),
            MovieRecord::new(200, "Fav B"),
            MovieRecord::new(300, "New 2"),
        ];

        let filtered = ExcludeFavoritesFilter.apply(candidates, &profile).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 101);
        assert_eq!(filtered[1].id, 300);
    }

    #[test]
    fn test_no_favorites_keeps_everything() {
        let profile = UserProfile::new("bob");
        let filtered = ExcludeFavoritesFilter
            .apply(vec![MovieRecord::new(1, "Any")], &profile)
            .unwrap();
        assert_eq!(filtered.len(), 1);
    }
}
