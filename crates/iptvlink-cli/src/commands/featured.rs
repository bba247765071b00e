use std::path::Path;

use anyhow::{Context, Result};
use iptvlink_core::{FeaturedDocument, TmdbClient};

use crate::config::{self, TMDB_KEY};

pub async fn run(output: &Path, api_key: Option<String>) -> Result<()> {
    let api_key = config::resolve_api_key(api_key, &TMDB_KEY)?;

    println!("Fetching trending movies from TMDB...");
    let client = TmdbClient::new(api_key)?;
    let trending = match client.fetch_trending().await {
        Ok(movies) => movies,
        Err(e) => {
            tracing::error!(error = %e, "error fetching TMDB trending list");
            Vec::new()
        }
    };

    if trending.is_empty() {
        println!("No movies found. Check API Key.");
        return Ok(());
    }

    FeaturedDocument::new(&trending)
        .write_json(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Generated {} with {} movies.", output.display(), trending.len());

    Ok(())
}
