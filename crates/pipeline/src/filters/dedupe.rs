//! Filter to drop repeated candidates.
//!
//! Catalog listings can shift between pages while they are being read, so
//! the same movie may show up twice in one candidate set.

use crate::traits::Filter;
use anyhow::Result;
use models::{MovieId, MovieRecord, UserProfile};
use std::collections::HashSet;

/// Keeps the first occurrence of each movie id.
pub struct DedupeFilter;

impl Filter for DedupeFilter {
    fn name(&self) -> &str {
        "DedupeFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        _profile: &UserProfile,
    ) -> Result<Vec<MovieRecord>> {
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(candidates.len());
        Ok(candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let candidates = vec![
            MovieRecord::new(5, "first"),
            MovieRecord::new(6, "other"),
            MovieRecord::new(5, "second"),
        ];

        let filtered = DedupeFilter
            .apply(candidates, &UserProfile::new("alice"))
            .unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "first");
    }
}
