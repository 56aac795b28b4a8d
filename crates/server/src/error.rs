//! Request-level errors of the recommendation service.

use sources::{CatalogError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] anyhow::Error),
}

impl ServiceError {
    /// Whether the error means "no such thing" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::ProfileNotFound(_) | ServiceError::Catalog(CatalogError::NotFound(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
