//! Feature extraction from movie metadata.
//!
//! Two jobs:
//! - turn a movie record into typed feature tokens for set-overlap similarity
//! - aggregate a user's favorites and onboarding picks into initial weight maps

use models::{MovieRecord, WeightMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cast members per movie that produce tokens and favorite boosts
pub const TOP_CAST_FOR_FEATURES: usize = 5;

/// Keywords per movie that produce tokens
pub const MAX_KEYWORD_TOKENS: usize = 10;

/// Added to a genre for every favorite movie carrying it
pub const FAVORITE_GENRE_BOOST: f64 = 0.2;

/// Added to an actor for every favorite movie they are top-billed in
pub const FAVORITE_ACTOR_BOOST: f64 = 0.15;

/// Added to every genre the user picked during onboarding
pub const SELECTED_GENRE_BOOST: f64 = 0.5;

/// Added to every actor the user picked during onboarding
pub const SELECTED_ACTOR_BOOST: f64 = 0.3;

/// Every freshly built weight starts from this baseline...
pub const INITIAL_BASELINE: f64 = 1.0;

/// ...and never exceeds this ceiling.
pub const INITIAL_CEILING: f64 = 2.0;

// ============================================================================
// Feature tokens
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Genre,
    Actor,
    Director,
    Keyword,
}

impl FeatureKind {
    fn prefix(self) -> &'static str {
        match self {
            FeatureKind::Genre => "genre",
            FeatureKind::Actor => "actor",
            FeatureKind::Director => "director",
            FeatureKind::Keyword => "keyword",
        }
    }
}

/// A tagged label derived from a movie record.
///
/// Two tokens are the same feature when both kind and value match, so an
/// actor and a director with the same name stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureToken {
    pub kind: FeatureKind,
    pub value: String,
}

impl FeatureToken {
    pub fn new(kind: FeatureKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for FeatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.value)
    }
}

/// Extract feature tokens from a movie.
///
/// ## Algorithm
/// In source order:
/// 1. One genre token per genre
/// 2. One actor token per top-5 billed cast member
/// 3. One director token for the first crew member whose job is exactly
///    "Director" (none if absent)
/// 4. One keyword token per each of the first 10 keywords
///
/// Repeated entries in the record produce repeated tokens.
pub fn extract_tokens(movie: &MovieRecord) -> Vec<FeatureToken> {
    let mut tokens = Vec::with_capacity(
        movie.genres.len()
            + TOP_CAST_FOR_FEATURES
            + 1
            + movie.keywords.len().min(MAX_KEYWORD_TOKENS),
    );

    tokens.extend(
        movie
            .genres
            .iter()
            .map(|g| FeatureToken::new(FeatureKind::Genre, g.as_str())),
    );
    tokens.extend(
        movie
            .top_cast(TOP_CAST_FOR_FEATURES)
            .into_iter()
            .map(|a| FeatureToken::new(FeatureKind::Actor, a)),
    );
    if let Some(director) = movie.director() {
        tokens.push(FeatureToken::new(FeatureKind::Director, director));
    }
    tokens.extend(
        movie
            .keywords
            .iter()
            .take(MAX_KEYWORD_TOKENS)
            .map(|k| FeatureToken::new(FeatureKind::Keyword, k.as_str())),
    );

    tokens
}

// ============================================================================
// Initial profile
// ============================================================================

/// The genre and actor weight maps of a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnedWeights {
    pub genre_weights: WeightMap,
    pub actor_weights: WeightMap,
}

/// Build initial weights from favorites and onboarding picks.
///
/// `favorites` holds the favorite movies whose details could be fetched;
/// unfetchable favorites are dropped by the caller before this point.
///
/// ## Algorithm
/// 1. Each favorite adds 0.2 to each of its genres and 0.15 to each of its
///    top-5 billed actors
/// 2. Each selected genre gets +0.5, each selected actor +0.3
/// 3. Every accumulated weight becomes `min(weight + 1.0, 2.0)`
///
/// Genres and actors never mentioned get no entry.
pub fn build_initial_profile(
    favorites: &[MovieRecord],
    selected_genres: &[String],
    selected_actors: &[String],
) -> LearnedWeights {
    let mut genre_weights = WeightMap::new();
    let mut actor_weights = WeightMap::new();

    for movie in favorites {
        for genre in &movie.genres {
            *genre_weights.entry(genre.clone()).or_insert(0.0) += FAVORITE_GENRE_BOOST;
        }
        for actor in movie.top_cast(TOP_CAST_FOR_FEATURES) {
            *actor_weights.entry(actor).or_insert(0.0) += FAVORITE_ACTOR_BOOST;
        }
    }

    for genre in selected_genres {
        *genre_weights.entry(genre.clone()).or_insert(0.0) += SELECTED_GENRE_BOOST;
    }
    for actor in selected_actors {
        *actor_weights.entry(actor.clone()).or_insert(0.0) += SELECTED_ACTOR_BOOST;
    }

    let finish = |weights: &mut WeightMap| {
        for weight in weights.values_mut() {
            *weight = (*weight + INITIAL_BASELINE).min(INITIAL_CEILING);
        }
    };
    finish(&mut genre_weights);
    finish(&mut actor_weights);

    tracing::debug!(
        "Built initial profile from {} favorites: {} genres, {} actors",
        favorites.len(),
        genre_weights.len(),
        actor_weights.len()
    );

    LearnedWeights {
        genre_weights,
        actor_weights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{CastMember, CrewMember};

    fn movie_with_credits() -> MovieRecord {
        let mut movie = MovieRecord::new(603, "The Matrix");
        movie.genres = vec!["Action".to_string(), "Science Fiction".to_string()];
        movie.cast = ["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss", "Hugo Weaving", "Gloria Foster", "Joe Pantoliano"]
            .iter()
            .enumerate()
            .map(|(i, name)| CastMember {
                name: name.to_string(),
                order: i as u32,
            })
            .collect();
        movie.crew = vec![
            CrewMember { name: "Bill Pope".to_string(), job: "Director of Photography".to_string() },
            CrewMember { name: "Lana Wachowski".to_string(), job: "Director".to_string() },
            CrewMember { name: "Lilly Wachowski".to_string(), job: "Director".to_string() },
        ];
        movie.keywords = (0..12).map(|i| format!("kw{}", i)).collect();
        movie
    }

    #[test]
    fn test_extract_tokens_counts_and_order() {
        let tokens = extract_tokens(&movie_with_credits());
        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        // 2 genres + 5 actors + 1 director + 10 keywords
        assert_eq!(tokens.len(), 18);
        assert_eq!(rendered[0], "genre_Action");
        assert_eq!(rendered[2], "actor_Keanu Reeves");
        assert_eq!(rendered[7], "director_Lana Wachowski");
        assert_eq!(rendered[17], "keyword_kw9");
        assert!(!rendered.contains(&"actor_Joe Pantoliano".to_string()));
    }

    #[test]
    fn test_extract_tokens_without_director_or_keywords() {
        let mut movie = MovieRecord::new(1, "Bare");
        movie.genres = vec!["Drama".to_string(), "Drama".to_string()];

        let tokens = extract_tokens(&movie);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], tokens[1]);
    }

    #[test]
    fn test_build_initial_profile_weights() {
        let matrix = movie_with_credits();
        let mut john_wick = MovieRecord::new(245891, "John Wick");
        john_wick.genres = vec!["Action".to_string(), "Thriller".to_string()];
        john_wick.cast = vec![CastMember { name: "Keanu Reeves".to_string(), order: 0 }];

        let weights = build_initial_profile(
            &[matrix, john_wick],
            &["Thriller".to_string(), "Comedy".to_string()],
            &["Keanu Reeves".to_string()],
        );

        // Action: 0.2 + 0.2 + 1.0
        assert!((weights.genre_weights["Action"] - 1.4).abs() < 1e-9);
        // Thriller: 0.2 + 0.5 + 1.0
        assert!((weights.genre_weights["Thriller"] - 1.7).abs() < 1e-9);
        // Comedy: only selected
        assert!((weights.genre_weights["Comedy"] - 1.5).abs() < 1e-9);
        // Keanu: 0.15 * 2 + 0.3 + 1.0
        assert!((weights.actor_weights["Keanu Reeves"] - 1.6).abs() < 1e-9);
        // Sixth-billed actor never counted
        assert!(!weights.actor_weights.contains_key("Joe Pantoliano"));
        assert!(!weights.genre_weights.contains_key("Horror"));
    }

    #[test]
    fn test_build_initial_profile_caps_at_ceiling() {
        let mut movie = MovieRecord::new(1, "Comedy");
        movie.genres = vec!["Comedy".to_string()];
        let favorites = vec![movie; 10];

        let weights = build_initial_profile(&favorites, &["Comedy".to_string()], &[]);
        assert_eq!(weights.genre_weights["Comedy"], INITIAL_CEILING);
    }

    #[test]
    fn test_build_initial_profile_empty() {
        let weights = build_initial_profile(&[], &[], &[]);
        assert!(weights.genre_weights.is_empty());
        assert!(weights.actor_weights.is_empty());
    }
}
