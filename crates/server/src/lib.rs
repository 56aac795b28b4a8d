//! Server crate for the CineMatch recommendation engine.
//!
//! This crate contains the orchestrator that coordinates the catalog
//! gateway, the profile store and the scoring pipeline, together with
//! the engine configuration and the request-level error type.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{ConfigError, RecommenderConfig};
pub use error::ServiceError;
pub use orchestrator::{ProfileCreateRequest, RecommendationOrchestrator, RecommendationPage};
