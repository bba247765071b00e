//! Core data types
//!
//! Contains the loosely typed catalog record and the value types produced
//! by the remote API clients.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One media item from a cached search index
///
/// The cache is written by the client app and carries no schema, so the
/// record keeps the raw JSON object and exposes lenient accessors instead
/// of typed fields. Known fields: `id`, `name`, `description`, `actors`,
/// `genres_str`, `screenshot_uri`, `category_id`, `duration`, `added`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord {
    fields: Map<String, Value>,
}

impl CatalogRecord {
    /// Wrap an existing JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw field value, if present
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All fields of the record
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// String form of a field
    ///
    /// Missing fields and `null` give an empty string, strings are returned
    /// verbatim and every other value uses its compact JSON text.
    pub fn text(&self, field: &str) -> String {
        value_text(self.fields.get(field))
    }

    /// Whether a field is missing or holds an empty/zero/false value
    pub fn is_blank(&self, field: &str) -> bool {
        match self.fields.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Bool(b)) => !b,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            Some(Value::Array(a)) => a.is_empty(),
            Some(Value::Object(o)) => o.is_empty(),
        }
    }

    /// Record identifier as text
    pub fn id(&self) -> String {
        self.text("id")
    }

    /// Category identifier as text
    pub fn category(&self) -> String {
        self.text("category_id")
    }
}

impl From<Map<String, Value>> for CatalogRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// String form of an optional JSON value, see [`CatalogRecord::text`]
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Rating summary for one movie title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// IMDb rating (e.g., "8.8"), "N/A" when unknown
    pub imdb: String,

    /// Rotten Tomatoes score (e.g., "87%"), "N/A" when unknown
    pub rt: String,

    /// Release year as reported by the API
    pub year: String,

    /// Poster URL, empty when unknown
    pub poster: String,
}

/// A movie from the TMDB weekly trending list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingMovie {
    pub title: Option<String>,

    /// First four characters of the release date
    pub year: String,

    pub vote_average: f64,

    pub poster_path: Option<String>,
}

/// A VOD category from the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id; portals send either a string or a number
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub alias: Option<String>,
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(other) => Some(value_text(Some(&other))),
    })
}
