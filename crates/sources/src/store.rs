//! The Profile Store seam.
//!
//! Profiles and interaction history live in an external key-value
//! document store addressed by user id. The engine reads a profile,
//! computes new weights and writes the whole document back; concurrent
//! writers for the same user resolve as last-write-wins in the store.

use async_trait::async_trait;
use models::{Interaction, UserProfile};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by a profile store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for profiles and the append-only interaction log.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` when the user has no profile.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Create or overwrite the user's profile document.
    async fn put_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError>;

    /// Append one interaction to the history.
    async fn record_interaction(&self, interaction: &Interaction) -> Result<(), StoreError>;

    /// The user's interactions, oldest first.
    async fn interactions(&self, user_id: &str) -> Result<Vec<Interaction>, StoreError>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
    interactions: RwLock<Vec<Interaction>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn put_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError> {
        if user_id.is_empty() {
            return Err(StoreError::InvalidUserId(user_id.to_string()));
        }
        self.profiles
            .write()
            .await
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }

    async fn record_interaction(&self, interaction: &Interaction) -> Result<(), StoreError> {
        self.interactions.write().await.push(interaction.clone());
        Ok(())
    }

    async fn interactions(&self, user_id: &str) -> Result<Vec<Interaction>, StoreError> {
        Ok(self
            .interactions
            .read()
            .await
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::FeedbackAction;

    #[tokio::test]
    async fn test_profile_roundtrip_and_miss() {
        let store = InMemoryProfileStore::new();
        assert!(store.get_profile("nobody").await.unwrap().is_none());

        let mut profile = UserProfile::new("alice");
        profile.genre_weights.insert("Drama".to_string(), 1.5);
        store.put_profile("alice", &profile).await.unwrap();

        let loaded = store.get_profile("alice").await.unwrap().unwrap();
        assert_eq!(loaded.genre_weights["Drama"], 1.5);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = InMemoryProfileStore::new();
        let mut profile = UserProfile::new("alice");
        store.put_profile("alice", &profile).await.unwrap();

        profile.actor_weights.insert("Al Pacino".to_string(), 1.2);
        store.put_profile("alice", &profile).await.unwrap();

        let loaded = store.get_profile("alice").await.unwrap().unwrap();
        assert_eq!(loaded.actor_weights.len(), 1);
    }

    #[tokio::test]
    async fn test_interactions_filtered_by_user() {
        let store = InMemoryProfileStore::new();
        store
            .record_interaction(&Interaction::now("alice", 1, FeedbackAction::Like))
            .await
            .unwrap();
        store
            .record_interaction(&Interaction::now("bob", 2, FeedbackAction::Dislike))
            .await
            .unwrap();

        let history = store.interactions("alice").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].movie_id, 1);
    }
}
