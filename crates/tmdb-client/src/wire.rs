//! TMDB v3 response shapes and their conversion into [`MovieRecord`].
//!
//! Only the fields the engine uses are modelled; serde ignores the rest.

use models::{CastMember, CrewMember, GenreInfo, MovieRecord};
use serde::Deserialize;

/// Envelope of every paged listing (`movie/popular`, `search/movie`)
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A movie as it appears in listings
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// `movie/{id}` with `append_to_response=credits,keywords,external_ids`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub credits: TmdbCredits,
    #[serde(default)]
    pub keywords: TmdbKeywords,
    #[serde(default)]
    pub external_ids: Option<TmdbExternalIds>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbKeywords {
    #[serde(default)]
    pub keywords: Vec<TmdbKeyword>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbKeyword {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// `genre/movie/list`
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// TMDB sends `""` for unknown release dates.
fn non_empty(date: Option<String>) -> Option<String> {
    date.filter(|d| !d.trim().is_empty())
}

impl From<TmdbMovie> for MovieRecord {
    fn from(movie: TmdbMovie) -> Self {
        let mut record = MovieRecord::new(movie.id, movie.title);
        record.vote_average = movie.vote_average;
        record.popularity = movie.popularity;
        record.release_date = non_empty(movie.release_date);
        record.overview = movie.overview;
        record.poster_path = movie.poster_path;
        record
    }
}

impl From<TmdbMovieDetails> for MovieRecord {
    fn from(details: TmdbMovieDetails) -> Self {
        let mut record = MovieRecord::new(details.id, details.title);
        record.genres = details.genres.into_iter().map(|g| g.name).collect();
        record.cast = details
            .credits
            .cast
            .into_iter()
            .map(|c| CastMember {
                name: c.name,
                order: c.order,
            })
            .collect();
        record.crew = details
            .credits
            .crew
            .into_iter()
            .map(|c| CrewMember {
                name: c.name,
                job: c.job,
            })
            .collect();
        record.keywords = details
            .keywords
            .keywords
            .into_iter()
            .map(|k| k.name)
            .collect();
        record.vote_average = details.vote_average;
        record.popularity = details.popularity;
        record.release_date = non_empty(details.release_date);
        record.overview = details.overview;
        record.poster_path = details.poster_path;
        record.imdb_id = details
            .external_ids
            .and_then(|ids| ids.imdb_id)
            .filter(|id| !id.is_empty());
        record.sort_cast_by_billing();
        record
    }
}

impl From<TmdbGenre> for GenreInfo {
    fn from(genre: TmdbGenre) -> Self {
        GenreInfo {
            id: genre.id,
            name: genre.name,
        }
    }
}
