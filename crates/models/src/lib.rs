//! # Models Crate
//!
//! Shared domain types for the CineMatch recommendation engine, plus the
//! loader for offline catalog snapshots.
//!
//! ## Main Components
//!
//! - **types**: MovieRecord, UserProfile, Interaction, FeedbackAction
//! - **parser**: Parse snapshot JSON files
//! - **index**: MovieIndex, an in-memory catalog for lookups and listings
//! - **error**: Error types for snapshot loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use models::MovieIndex;
//! use std::path::Path;
//!
//! let index = MovieIndex::load_from_file(Path::new("data/catalog.json"))?;
//! let heat = index.get_movie(949).unwrap();
//! println!("{} stars {:?}", heat.title, heat.top_cast(3));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{MovieIndex, PAGE_SIZE};
pub use parser::CatalogSnapshot;
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    WeightMap,
    // Core types
    CastMember,
    CrewMember,
    GenreInfo,
    MovieRecord,
    MovieReference,
    UserProfile,
    Interaction,
    FeedbackAction,
};
