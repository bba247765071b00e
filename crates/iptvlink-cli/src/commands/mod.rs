//! Subcommand implementations
//!
//! Each subcommand is one run-to-completion tool. Report output goes to
//! stdout; progress and per-item failures go through `tracing`.

mod assets;
mod cache;
mod categories;
mod compare;
mod featured;
mod ratings;

use anyhow::Result;

use crate::cli::Commands;

pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Ratings {
            input,
            output,
            api_key,
        } => ratings::run(&input, &output, api_key).await,
        Commands::Featured { output, api_key } => featured::run(&output, api_key).await,
        Commands::Categories { portal_url, mac } => categories::run(&portal_url, mac).await,
        Commands::Assets {
            source_dir,
            assets_dir,
            first,
            last,
        } => assets::run(source_dir, assets_dir, first, last),
        Commands::Analyze {
            cache,
            categories,
            profile,
            label,
        } => cache::analyze(&cache.path, &categories, profile.into(), &label),
        Commands::Compare {
            left,
            right,
            category,
            limit,
        } => compare::run(&left, &right, &category, limit),
        Commands::Split {
            cache,
            output_dir,
            parts,
        } => cache::split(&cache.path, &output_dir, parts),
        Commands::LongDescriptions {
            cache,
            category,
            min_chars,
        } => cache::long_descriptions(&cache.path, &category, min_chars),
        Commands::LongWords {
            cache,
            category,
            min_len,
        } => cache::long_words(&cache.path, &category, min_len),
        Commands::VerifySanitization {
            cache,
            category,
            samples,
        } => cache::verify_sanitization(&cache.path, &category, &samples),
    }
}
