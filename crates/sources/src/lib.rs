//! # Sources Crate
//!
//! The two external collaborators of the recommendation engine, each behind
//! a trait so the engine never names a concrete backend.
//!
//! ## Components
//!
//! ### Catalog Gateway
//! Read access to the movie catalog:
//! - [`TmdbCatalog`]: the live TMDB API through `tmdb-client`
//! - [`InMemoryCatalog`]: a loaded snapshot, for offline runs and tests
//! - [`fetch_details_batch`]: concurrent detail fetches where one failing
//!   movie never fails the batch
//!
//! ### Profile Store
//! Persistence of profile documents and the interaction log:
//! - [`InMemoryProfileStore`]: process-local
//! - [`JsonFileProfileStore`]: one JSON document per user plus a JSONL log
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{fetch_details_batch, CatalogGateway, InMemoryCatalog};
//! use models::MovieIndex;
//! use std::sync::Arc;
//!
//! let index = Arc::new(MovieIndex::load_from_file("data/catalog.json")?);
//! let catalog: Arc<dyn CatalogGateway> = Arc::new(InMemoryCatalog::new(index));
//!
//! let popular = catalog.get_popular(1, 6.0).await?;
//! let ids: Vec<_> = popular.iter().map(|m| m.id).collect();
//! let detailed = fetch_details_batch(catalog.clone(), &ids).await;
//! ```

pub mod catalog;
pub mod fetch;
pub mod file_store;
pub mod memory;
pub mod store;
pub mod tmdb;

pub use catalog::{CatalogError, CatalogGateway};
pub use fetch::fetch_details_batch;
pub use file_store::JsonFileProfileStore;
pub use memory::InMemoryCatalog;
pub use store::{InMemoryProfileStore, ProfileStore, StoreError};
pub use tmdb::TmdbCatalog;

#[cfg(test)]
mod tests {
    use super::*;
    use models::{FeedbackAction, Interaction, MovieRecord, UserProfile};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_backends_usable_as_trait_objects() {
        let catalog: Arc<dyn CatalogGateway> = Arc::new(InMemoryCatalog::from_movies(
            vec![MovieRecord::new(1, "Alien")],
            vec![],
        ));
        let store: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());

        let movie = catalog.get_details(1).await.unwrap();
        store
            .put_profile("alice", &UserProfile::new("alice"))
            .await
            .unwrap();
        store
            .record_interaction(&Interaction::now("alice", movie.id, FeedbackAction::Like))
            .await
            .unwrap();

        assert_eq!(catalog.name(), "in-memory");
        assert_eq!(store.interactions("alice").await.unwrap().len(), 1);
    }
}
