//! OMDb rating fetcher
//!
//! Looks up IMDb and Rotten Tomatoes ratings for a list of titles, one
//! request at a time with a short courtesy delay between calls.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::client::{ClientConfig, JsonClient};
use crate::error::{Result, ToolError};
use crate::types::Rating;
use crate::url::{OMDB_BASE_URL, build_omdb_url};

/// Placeholder used by OMDb and by us for unknown ratings
const NOT_AVAILABLE: &str = "N/A";

/// Source name of the Rotten Tomatoes entry in `Ratings`
const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRatingSource>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbRatingSource {
    #[serde(rename = "Source", default)]
    source: String,
    #[serde(rename = "Value", default)]
    value: String,
}

impl OmdbResponse {
    fn into_rating(self) -> Option<Rating> {
        if self.response.as_deref() != Some("True") {
            return None;
        }

        let rt = self
            .ratings
            .into_iter()
            .find(|r| r.source == ROTTEN_TOMATOES)
            .map(|r| r.value)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Some(Rating {
            imdb: self.imdb_rating.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            rt,
            year: self.year.unwrap_or_default(),
            poster: self.poster.unwrap_or_default(),
        })
    }
}

/// Ratings collected for a title list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingsReport {
    /// Found ratings keyed by the title as listed
    pub ratings: BTreeMap<String, Rating>,
    /// Titles looked up
    pub attempted: usize,
}

impl RatingsReport {
    /// Summary such as `"42/50"`
    pub fn success_rate(&self) -> String {
        format!("{}/{}", self.ratings.len(), self.attempted)
    }

    /// Write the ratings map as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.ratings)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Read a line-delimited title list, skipping blank lines
///
/// # Errors
/// `NotFound` if the file does not exist, `Io` for other read failures
pub fn read_titles(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ToolError::NotFound(path.display().to_string()),
        _ => ToolError::Io(e),
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Client for the OMDb title lookup API
pub struct OmdbClient {
    client: JsonClient,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a client against the public OMDb endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(OMDB_BASE_URL, api_key, ClientConfig::default())
    }

    /// Create a client against a custom endpoint
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

    /// Look up one title
    ///
    /// # Returns
    /// `Ok(None)` when OMDb does not know the title
    pub async fn fetch_rating(&self, title: &str) -> Result<Option<Rating>> {
        let url = build_omdb_url(&self.base_url, &self.api_key, title);
        let response: OmdbResponse = self.client.get_json(&url, &[]).await?;
        Ok(response.into_rating())
    }

    /// Look up every title in order
    ///
    /// Failed lookups are logged and skipped. `on_progress` is called once
    /// per title after its lookup finishes.
    pub async fn fetch_all<F>(&self, titles: &[String], mut on_progress: F) -> RatingsReport
    where
        F: FnMut(&str),
    {
        let mut report = RatingsReport {
            attempted: titles.len(),
            ..Default::default()
        };

        for title in titles {
            match self.fetch_rating(title).await {
                Ok(Some(rating)) => {
                    report.ratings.insert(title.clone(), rating);
                }
                Ok(None) => tracing::debug!(title = %title, "title not found"),
                Err(e) => tracing::warn!(title = %title, error = %e, "error fetching rating"),
            }
            on_progress(title);
        }

        report
    }
}
