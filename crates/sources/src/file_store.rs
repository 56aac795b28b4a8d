//! Profile store backed by JSON documents on disk.
//!
//! Layout under the root directory:
//! - `profiles/<user_id>.json`: one pretty-printed document per user
//! - `interactions.jsonl`: the interaction log, one JSON object per line
//!
//! Each profile write goes to its own temporary file in `profiles/` and is
//! renamed into place, so a reader never sees a half-written document and
//! overlapping writers for one user end as last-write-wins.

use crate::store::{ProfileStore, StoreError};
use async_trait::async_trait;
use models::{Interaction, UserProfile};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const PROFILES_DIR: &str = "profiles";
const INTERACTIONS_FILE: &str = "interactions.jsonl";

/// Directory-backed document store
pub struct JsonFileProfileStore {
    root: PathBuf,
    /// Serializes appends to the interaction log within this process
    log_lock: Mutex<()>,
}

impl JsonFileProfileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(PROFILES_DIR)).await?;
        debug!("Opened profile store at {:?}", root);
        Ok(Self {
            root,
            log_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profile_path(&self, user_id: &str) -> Result<PathBuf, StoreError> {
        validate_user_id(user_id)?;
        Ok(self.root.join(PROFILES_DIR).join(format!("{}.json", user_id)))
    }
}

/// Write `bytes` to a fresh temporary file in `dir` and rename it over `path`.
///
/// The temporary file is removed if any step fails.
fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// User ids become file names, so only a conservative alphabet is allowed.
fn validate_user_id(user_id: &str) -> Result<(), StoreError> {
    let valid = !user_id.is_empty()
        && !user_id.starts_with('.')
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidUserId(user_id.to_string()))
    }
}

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let path = self.profile_path(user_id)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError> {
        let path = self.profile_path(user_id)?;
        let dir = self.root.join(PROFILES_DIR);
        let bytes = serde_json::to_vec_pretty(profile)?;

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &bytes))
            .await
            .map_err(std::io::Error::other)??;
        debug!("Wrote profile {:?}", path);
        Ok(())
    }

    async fn record_interaction(&self, interaction: &Interaction) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(interaction)?;
        line.push(b'\n');

        let _guard = self.log_lock.lock().await;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join(INTERACTIONS_FILE))
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    async fn interactions(&self, user_id: &str) -> Result<Vec<Interaction>, StoreError> {
        let content = match fs::read_to_string(self.root.join(INTERACTIONS_FILE)).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut history = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Interaction>(line) {
                Ok(interaction) if interaction.user_id == user_id => history.push(interaction),
                Ok(_) => {}
                // A torn last line must not hide the rest of the history
                Err(e) => warn!(line = line_no + 1, error = %e, "Skipping corrupt interaction entry"),
            }
        }
        Ok(history)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::FeedbackAction;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_profile_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();

        let mut profile = UserProfile::new("alice");
        profile.genre_weights.insert("Sci-Fi".to_string(), 1.7);
        store.put_profile("alice", &profile).await.unwrap();

        // A second store over the same directory sees the document
        let reopened = JsonFileProfileStore::open(dir.path()).await.unwrap();
        let loaded = reopened.get_profile("alice").await.unwrap().unwrap();
        assert_eq!(loaded, profile);
        assert!(dir.path().join("profiles/alice.json").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_for_one_user_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileProfileStore::open(dir.path()).await.unwrap());

        for round in 0..10 {
            let mut handles = Vec::new();
            for writer in 0..16 {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    let mut profile = UserProfile::new("alice");
                    profile
                        .genre_weights
                        .insert("Drama".to_string(), 1.0 + writer as f64 / 100.0);
                    store.put_profile("alice", &profile).await
                }));
            }
            for handle in handles {
                let result = handle.await.unwrap();
                assert!(result.is_ok(), "round {}: {:?}", round, result);
            }

            let stored = store.get_profile("alice").await.unwrap().unwrap();
            let weight = stored.genre_weights["Drama"];
            assert!((1.0..1.16).contains(&weight));
        }

        // Only the final document is left behind
        let entries: Vec<_> = std::fs::read_dir(dir.path().join(PROFILES_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["alice.json".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();
        assert!(store.get_profile("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_path_like_user_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();

        for bad in ["", "../etc", "a/b", ".hidden", "spaced id"] {
            let result = store.get_profile(bad).await;
            assert!(
                matches!(result, Err(StoreError::InvalidUserId(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_interaction_log_appends_and_skips_corrupt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();

        store
            .record_interaction(&Interaction::now("alice", 10, FeedbackAction::Like))
            .await
            .unwrap();
        store
            .record_interaction(&Interaction::now("bob", 11, FeedbackAction::Dislike))
            .await
            .unwrap();

        // Simulate a torn write at the end of the log
        let log = dir.path().join(INTERACTIONS_FILE);
        let mut content = std::fs::read_to_string(&log).unwrap();
        content.push_str("{\"user_id\": \"alice\", \"movie\n");
        std::fs::write(&log, content).unwrap();

        store
            .record_interaction(&Interaction::now("alice", 12, FeedbackAction::Dislike))
            .await
            .unwrap();

        let history = store.interactions("alice").await.unwrap();
        let ids: Vec<u64> = history.iter().map(|i| i.movie_id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(history[1].action, FeedbackAction::Dislike);
    }
}
