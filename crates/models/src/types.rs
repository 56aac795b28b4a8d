//! Core domain types for the CineMatch recommendation engine.
//!
//! This module defines the data structures shared by every crate:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - MovieRecord: a snapshot of one movie as returned by the catalog
//! - UserProfile: the learned genre/actor weights plus onboarding choices
//! - Interaction and FeedbackAction for the like/dislike history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (the auth provider's uid)
pub type UserId = String;

/// Unique identifier for a movie (TMDB id, stable across fetches)
pub type MovieId = u64;

/// Entity name (genre or actor) to preference weight.
///
/// Keys are the entity names themselves, so a map can never hold the
/// same genre or actor twice.
pub type WeightMap = HashMap<String, f64>;

// =============================================================================
// Movie-related Types
// =============================================================================

/// One billed cast member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    /// Billing position, 0 is top billed
    #[serde(default)]
    pub order: u32,
}

/// One crew member and the job they did on the movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

/// A genre as listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenreInfo {
    pub id: u32,
    pub name: String,
}

/// Represents a movie as returned by the catalog.
///
/// Listing endpoints (popular, search) return records with empty genres,
/// cast, crew and keywords; `get_details` returns them fully populated.
/// The cast is always stored in billing order, so "top N billed" is a
/// prefix of `cast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Average vote from 0.0 to 10.0
    #[serde(default)]
    pub vote_average: f64,
    /// Unbounded, non-negative
    #[serde(default)]
    pub popularity: f64,
    /// ISO date string ("2010-07-15"); may be absent or malformed
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// IMDb identifier ("tt0113277"); only detail lookups carry it
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl MovieRecord {
    /// Create a bare record with only an id and title.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: Vec::new(),
            cast: Vec::new(),
            crew: Vec::new(),
            keywords: Vec::new(),
            vote_average: 0.0,
            popularity: 0.0,
            release_date: None,
            overview: None,
            poster_path: None,
            imdb_id: None,
        }
    }

    /// Names of the first `n` billed cast members
    pub fn top_cast(&self, n: usize) -> Vec<String> {
        self.cast.iter().take(n).map(|c| c.name.clone()).collect()
    }

    /// The first crew member whose job is exactly "Director"
    pub fn director(&self) -> Option<&str> {
        self.crew
            .iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name.as_str())
    }

    /// Sort the cast by billing order. Stable, so ties keep catalog order.
    pub fn sort_cast_by_billing(&mut self) {
        self.cast.sort_by_key(|member| member.order);
    }

    /// Lightweight reference used in profile favorites
    pub fn as_reference(&self) -> MovieReference {
        MovieReference {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// A movie id with its title, as stored in a profile's favorites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieReference {
    pub id: MovieId,
    pub title: String,
}

// =============================================================================
// User Profile
// =============================================================================

/// A user's taste profile.
///
/// Created once at onboarding, mutated only by feedback, never deleted by
/// the engine. Weight maps hold an entry only for genres/actors that were
/// ever mentioned: absence means "no opinion", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub favorite_movies: Vec<MovieReference>,
    #[serde(default)]
    pub preferred_genres: Vec<String>,
    #[serde(default)]
    pub preferred_actors: Vec<String>,
    #[serde(default)]
    pub genre_weights: WeightMap,
    #[serde(default)]
    pub actor_weights: WeightMap,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Create an empty profile for a user.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            favorite_movies: Vec::new(),
            preferred_genres: Vec::new(),
            preferred_actors: Vec::new(),
            genre_weights: WeightMap::new(),
            actor_weights: WeightMap::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Ids of the user's favorite movies, in onboarding order
    pub fn favorite_ids(&self) -> Vec<MovieId> {
        self.favorite_movies.iter().map(|m| m.id).collect()
    }
}

// =============================================================================
// Feedback and Interaction History
// =============================================================================

/// Explicit feedback on a movie.
///
/// Anything other than "like" or "dislike" is kept verbatim as `Other`;
/// the learner treats it as a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackAction {
    Like,
    Dislike,
    Other(String),
}

impl From<&str> for FeedbackAction {
    fn from(s: &str) -> Self {
        match s {
            "like" => FeedbackAction::Like,
            "dislike" => FeedbackAction::Dislike,
            other => FeedbackAction::Other(other.to_string()),
        }
    }
}

impl From<String> for FeedbackAction {
    fn from(s: String) -> Self {
        FeedbackAction::from(s.as_str())
    }
}

impl From<FeedbackAction> for String {
    fn from(action: FeedbackAction) -> Self {
        action.to_string()
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackAction::Like => write!(f, "like"),
            FeedbackAction::Dislike => write!(f, "dislike"),
            FeedbackAction::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// One entry of the append-only interaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub action: FeedbackAction,
    pub timestamp: DateTime<Utc>,
}

impl Interaction {
    /// Record an interaction happening now.
    pub fn now(user_id: impl Into<UserId>, movie_id: MovieId, action: FeedbackAction) -> Self {
        Self {
            user_id: user_id.into(),
            movie_id,
            action,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(name: &str, order: u32) -> CastMember {
        CastMember {
            name: name.to_string(),
            order,
        }
    }

    #[test]
    fn test_top_cast_takes_prefix() {
        let mut movie = MovieRecord::new(1, "Heat");
        movie.cast = vec![cast("Al Pacino", 0), cast("Robert De Niro", 1), cast("Val Kilmer", 2)];

        assert_eq!(movie.top_cast(2), vec!["Al Pacino", "Robert De Niro"]);
        assert_eq!(movie.top_cast(10).len(), 3);
    }

    #[test]
    fn test_sort_cast_by_billing() {
        let mut movie = MovieRecord::new(1, "Heat");
        movie.cast = vec![cast("Val Kilmer", 2), cast("Al Pacino", 0), cast("Robert De Niro", 1)];
        movie.sort_cast_by_billing();

        assert_eq!(movie.top_cast(3), vec!["Al Pacino", "Robert De Niro", "Val Kilmer"]);
    }

    #[test]
    fn test_director_is_first_exact_match() {
        let mut movie = MovieRecord::new(1, "Heat");
        movie.crew = vec![
            CrewMember { name: "Art Linson".to_string(), job: "Producer".to_string() },
            CrewMember { name: "Someone".to_string(), job: "Assistant Director".to_string() },
            CrewMember { name: "Michael Mann".to_string(), job: "Director".to_string() },
            CrewMember { name: "Other".to_string(), job: "Director".to_string() },
        ];

        assert_eq!(movie.director(), Some("Michael Mann"));
    }

    #[test]
    fn test_feedback_action_parsing() {
        assert_eq!(FeedbackAction::from("like"), FeedbackAction::Like);
        assert_eq!(FeedbackAction::from("dislike"), FeedbackAction::Dislike);
        assert_eq!(
            FeedbackAction::from("superlike"),
            FeedbackAction::Other("superlike".to_string())
        );
    }

    #[test]
    fn test_feedback_action_serializes_as_plain_string() {
        let json = serde_json::to_string(&FeedbackAction::Dislike).unwrap();
        assert_eq!(json, "\"dislike\"");

        let parsed: FeedbackAction = serde_json::from_str("\"meh\"").unwrap();
        assert_eq!(parsed, FeedbackAction::Other("meh".to_string()));
    }

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"user_id": "abc"}"#).unwrap();
        assert_eq!(profile.user_id, "abc");
        assert!(profile.genre_weights.is_empty());
        assert!(profile.favorite_movies.is_empty());
    }
}
