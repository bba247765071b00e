use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use iptvlink_core::{OmdbClient, read_titles};

use crate::config::{self, OMDB_KEY};

pub async fn run(input: &Path, output: &Path, api_key: Option<String>) -> Result<()> {
    let api_key = config::resolve_api_key(api_key, &OMDB_KEY)?;
    let titles = read_titles(input).with_context(|| format!("failed to read {}", input.display()))?;

    println!("\nFetching ratings for {} movies...", titles.len());

    let progress = ProgressBar::new(titles.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let client = OmdbClient::new(api_key)?;
    let report = client
        .fetch_all(&titles, |title| {
            progress.set_message(title.to_string());
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    report
        .write_json(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("\nDone! Ratings saved to {}", output.display());
    println!("Success Rate: {}", report.success_rate());

    Ok(())
}
