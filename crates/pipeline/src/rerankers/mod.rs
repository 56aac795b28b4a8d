//! Re-ranking stages applied after scoring and sorting.

pub mod diversity;
pub mod exploration;

pub use diversity::DiversityFilter;
pub use exploration::ExplorationReranker;
