//! Concurrent detail fetching with per-item failure isolation.
//!
//! A failing fetch removes only that movie from the result. The batch
//! itself never fails: the caller gets every record that could be
//! fetched, in the order the ids were given.

use crate::catalog::CatalogGateway;
use models::{MovieId, MovieRecord};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Fetch full details for every id concurrently, skipping failures.
pub async fn fetch_details_batch(
    catalog: Arc<dyn CatalogGateway>,
    movie_ids: &[MovieId],
) -> Vec<MovieRecord> {
    let mut tasks = Vec::with_capacity(movie_ids.len());

    for &movie_id in movie_ids {
        let catalog = catalog.clone();
        let task = tokio::spawn(async move { catalog.get_details(movie_id).await });
        tasks.push((movie_id, task));
    }

    let mut results = Vec::with_capacity(tasks.len());
    let mut failures = 0usize;

    for (movie_id, task) in tasks {
        match task.await {
            Ok(Ok(movie)) => results.push(movie),
            Ok(Err(e)) => {
                warn!(movie_id, error = %e, "Skipping movie: detail fetch failed");
                failures += 1;
            }
            Err(e) => {
                error!(movie_id, error = %e, "Detail fetch task join error");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        warn!(
            success_count = results.len(),
            error_count = failures,
            catalog = catalog.name(),
            "Partial detail fetch failure"
        );
    } else {
        debug!("Fetched details for {} movies", results.len());
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;

    #[tokio::test]
    async fn test_batch_skips_missing_and_keeps_order() {
        let catalog: Arc<dyn CatalogGateway> = Arc::new(InMemoryCatalog::from_movies(
            vec![
                MovieRecord::new(1, "One"),
                MovieRecord::new(2, "Two"),
                MovieRecord::new(3, "Three"),
            ],
            vec![],
        ));

        let movies = fetch_details_batch(catalog, &[3, 99, 1]).await;
        let ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();

        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_batch_with_no_ids() {
        let catalog: Arc<dyn CatalogGateway> =
            Arc::new(InMemoryCatalog::from_movies(vec![], vec![]));
        assert!(fetch_details_batch(catalog, &[]).await.is_empty());
    }
}
