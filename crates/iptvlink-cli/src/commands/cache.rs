//! Tools that inspect a single cached search index

use std::path::Path;

use anyhow::{Context, Result};
use iptvlink_core::{
    ReportProfile, SampleCheck, SanitizationReport, analyze as analyze_category, filter_category,
    find_long_descriptions, find_long_words, load_records, load_values, write_chunks,
};

fn load(path: &Path) -> Result<Vec<iptvlink_core::CatalogRecord>> {
    tracing::info!(path = %path.display(), "reading search index");
    load_records(path).with_context(|| format!("failed to load {}", path.display()))
}

pub fn analyze(path: &Path, categories: &[String], profile: ReportProfile, label: &str) -> Result<()> {
    let records = load(path)?;

    println!("=== ANALYSIS START ===");
    for category in categories {
        let items = filter_category(&records, category);
        let report = analyze_category(&items, &format!("{} {}", label, category), profile);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    println!("=== ANALYSIS END ===");

    Ok(())
}

pub fn split(path: &Path, output_dir: &Path, parts: usize) -> Result<()> {
    tracing::info!(path = %path.display(), "reading search index");
    let values = load_values(path).with_context(|| format!("failed to load {}", path.display()))?;
    println!("Total items: {}", values.len());

    let written = write_chunks(&values, output_dir, parts)
        .with_context(|| format!("failed to write chunks to {}", output_dir.display()))?;
    for chunk in &written {
        println!("Wrote {} items to {}", chunk.items, chunk.path.display());
    }
    println!("Done.");

    Ok(())
}

pub fn long_descriptions(path: &Path, category: &str, min_chars: usize) -> Result<()> {
    let records = load(path)?;
    let items = filter_category(&records, category);

    println!("Searching for descriptions >= {} chars...", min_chars);
    for found in find_long_descriptions(&items, min_chars) {
        println!(
            "FOUND: '{}' (ID: {}) has {} characters.",
            found.name, found.id, found.length
        );
        println!("First 100 chars: {}...", found.preview);
    }

    Ok(())
}

pub fn long_words(path: &Path, category: &str, min_len: usize) -> Result<()> {
    let records = load(path)?;
    let items = filter_category(&records, category);

    println!("Searching for words >= {} chars...", min_len);
    for found in find_long_words(&items, min_len) {
        println!(
            "FOUND: '{}' (length {}) in item '{}' (ID: {})",
            found.word, found.length, found.name, found.id
        );
    }

    Ok(())
}

pub fn verify_sanitization(path: &Path, category: &str, samples: &[String]) -> Result<()> {
    let records = load(path)?;
    let items = filter_category(&records, category);

    let Some(report) = SanitizationReport::measure(&items) else {
        println!("No items in category {}", category);
        return Ok(());
    };

    println!("Items processed: {}", report.items);
    println!(
        "Average Description Length: {:.1} -> {:.1}",
        report.avg_before, report.avg_after
    );
    println!(
        "Maximum Description Length: {} -> {}",
        report.max_before, report.max_after
    );

    for id in samples {
        match SampleCheck::find(&items, id) {
            Some(sample) => {
                println!("\nExample '{}' (ID: {}):", sample.name, sample.id);
                println!("  Original Length: {}", sample.original_len());
                println!("  Sanitized Length: {}", sample.sanitized_len());
                println!("  Original: {}", sample.original);
                println!("  Sanitized: {}", sample.sanitized);
            }
            None => tracing::warn!(id = %id, category, "sample record not found"),
        }
    }

    Ok(())
}
