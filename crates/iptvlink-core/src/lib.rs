//! IPTV Link developer tooling core library
//!
//! Small, single-purpose building blocks used while debugging the IPTV Link
//! client app and massaging its data.
//!
//! # Overview
//!
//! - Cached search index inspection: loading, per-category statistics,
//!   device-to-device comparison and splitting into chunk files
//! - Description sanitization (cut at the first URL, cap at 600 characters)
//! - Rate-limited HTTP clients for OMDb ratings, TMDB trending movies and
//!   the stalker-portal category listing
//! - Xcode asset-catalog generation for demo poster artwork
//!
//! # Example
//!
//! ```no_run
//! use iptvlink_core::{ReportProfile, analyze, filter_category, load_records, Result};
//!
//! fn main() -> Result<()> {
//!     let records = load_records("search_index.json")?;
//!     let bollywood = filter_category(&records, "6");
//!     let report = analyze(&bollywood, "Category 6", ReportProfile::Full);
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod assets;
mod client;
pub mod compare;
mod error;
pub mod featured;
pub mod portal;
pub mod ratings;
mod record;
pub mod sanitize;
pub mod split;
pub mod stats;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, JsonClient, RateLimiter};

// Re-export error types
pub use error::{Result, ToolError};

// Re-export record loading
pub use record::{filter_category, json_type_name, load_records, load_values};

// Re-export data types
pub use types::{CatalogRecord, Category, Rating, TrendingMovie, value_text};

// Re-export the most used tool entry points
pub use assets::{AssetSummary, ImageConverter, PosterAssetJob, SipsConverter};
pub use compare::{CollectionDiff, compare_collections, contains_null_bytes};
pub use featured::{FeaturedDocument, TmdbClient};
pub use portal::{PortalClient, PortalIdentity, format_category_table};
pub use ratings::{OmdbClient, RatingsReport, read_titles};
pub use sanitize::{SampleCheck, SanitizationReport, sanitize_description};
pub use split::{partition, write_chunks};
pub use stats::{CategoryReport, ReportProfile, analyze, find_long_descriptions, find_long_words};
