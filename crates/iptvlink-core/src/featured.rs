//! Featured movie list from TMDB trending
//!
//! The client app matches these titles fuzzily against the portal catalog,
//! so only the titles end up in `featured.json`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ClientConfig, JsonClient};
use crate::error::Result;
use crate::types::TrendingMovie;
use crate::url::{TMDB_BASE_URL, build_trending_url};

/// Trending results considered before filtering
const TOP_RESULTS: usize = 20;

/// Lowest vote average that makes the list
const MIN_VOTE_AVERAGE: f64 = 6.0;

/// Default output file name
pub const DEFAULT_FEATURED_FILE: &str = "featured.json";

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    results: Vec<TrendingResult>,
}

#[derive(Debug, Deserialize)]
struct TrendingResult {
    title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    adult: bool,
    poster_path: Option<String>,
}

/// Keep well-rated, non-adult movies among the top results
fn select_featured(results: Vec<TrendingResult>) -> Vec<TrendingMovie> {
    results
        .into_iter()
        .take(TOP_RESULTS)
        .filter(|item| item.vote_average >= MIN_VOTE_AVERAGE && !item.adult)
        .map(|item| TrendingMovie {
            year: item
                .release_date
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(4)
                .collect(),
            title: item.title,
            vote_average: item.vote_average,
            poster_path: item.poster_path,
        })
        .collect()
}

/// Contents of `featured.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedDocument {
    /// UTC timestamp, e.g. `2026-10-18T09:30:00.123456Z`
    pub last_updated: String,
    pub movies: Vec<Option<String>>,
}

impl FeaturedDocument {
    /// Build the document stamped with the current time
    pub fn new(movies: &[TrendingMovie]) -> Self {
        Self::at(movies, Utc::now())
    }

    /// Build the document stamped with `now`
    pub fn at(movies: &[TrendingMovie], now: DateTime<Utc>) -> Self {
        Self {
            last_updated: now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            movies: movies.iter().map(|m| m.title.clone()).collect(),
        }
    }

    /// Write the document as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Client for the TMDB trending endpoint
pub struct TmdbClient {
    client: JsonClient,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a client against the public TMDB API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(TMDB_BASE_URL, api_key, ClientConfig::default())
    }

    /// Create a client against a custom API root
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            client: JsonClient::with_config(config, Default::default(), None)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch this week's trending movies, filtered for the featured list
    pub async fn fetch_trending(&self) -> Result<Vec<TrendingMovie>> {
        let url = build_trending_url(&self.base_url, &self.api_key);
        let response: TrendingResponse = self.client.get_json(&url, &[]).await?;
        Ok(select_featured(response.results))
    }
}
