//! HTTP client for The Movie Database (TMDB) v3 API.
//!
//! This crate provides a Rust client for the external movie catalog. It
//! handles:
//! - Authentication via the `api_key` query parameter
//! - Decoding TMDB responses into wire types (see [`wire`])
//! - Converting wire types into [`models::MovieRecord`]
//! - Mapping HTTP failures into [`TmdbClientError`]
//!
//! No caching or retries happen here; callers decide what a failure means.

use std::time::Duration;

use models::{GenreInfo, MovieId, MovieRecord};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, info};

pub mod wire;

use wire::{GenreListResponse, PagedResponse, TmdbMovie, TmdbMovieDetails};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to TMDB
#[derive(Error, Debug)]
pub enum TmdbClientError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("TMDB returned status {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

/// Client for the TMDB API.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a client with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TmdbClientError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client against a custom API root (e.g. a local proxy).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TmdbClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TmdbClientError::ClientBuild(e.to_string()))?;

        info!("TMDB client configured for {}", base_url);
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Popular movies, one page at a time (TMDB pages hold 20 movies).
    pub async fn popular_movies(&self, page: u32) -> Result<Vec<MovieRecord>, TmdbClientError> {
        let response: PagedResponse<TmdbMovie> = self
            .get_json("movie/popular", &[("page", page.max(1).to_string())])
            .await?;
        Ok(response.results.into_iter().map(MovieRecord::from).collect())
    }

    /// Search movies by title.
    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<MovieRecord>, TmdbClientError> {
        let response: PagedResponse<TmdbMovie> = self
            .get_json(
                "search/movie",
                &[("query", query.to_string()), ("page", page.max(1).to_string())],
            )
            .await?;
        Ok(response.results.into_iter().map(MovieRecord::from).collect())
    }

    /// Full details for one movie, with credits and keywords populated.
    pub async fn movie_details(&self, movie_id: MovieId) -> Result<MovieRecord, TmdbClientError> {
        let details: TmdbMovieDetails = self
            .get_json(
                &format!("movie/{}", movie_id),
                &[(
                    "append_to_response",
                    "credits,keywords,external_ids".to_string(),
                )],
            )
            .await?;
        Ok(details.into())
    }

    /// Every movie genre TMDB knows about.
    pub async fn genres(&self) -> Result<Vec<GenreInfo>, TmdbClientError> {
        let response: GenreListResponse = self.get_json("genre/movie/list", &[]).await?;
        Ok(response.genres.into_iter().map(GenreInfo::from).collect())
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbClientError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("api_key", self.api_key.as_str()));

        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                error!("TMDB request to {} failed: {}", endpoint, e);
                TmdbClientError::Request {
                    endpoint: endpoint.to_string(),
                    source: e,
                }
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(TmdbClientError::NotFound(endpoint.to_string())),
            status => {
                error!("TMDB returned {} for {}", status, endpoint);
                return Err(TmdbClientError::Status {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                });
            }
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TmdbClientError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            TmdbClient::with_base_url("key", "http://localhost:9999/3/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/3");
    }

    #[test]
    fn test_default_base_url() {
        let client = TmdbClient::new("key").unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is not expected to speak HTTP
        let client = TmdbClient::with_base_url(
            "key",
            "http://127.0.0.1:9",
            Duration::from_millis(500),
        )
        .unwrap();

        let result = client.genres().await;
        assert!(matches!(result, Err(TmdbClientError::Request { .. })));
    }
}
