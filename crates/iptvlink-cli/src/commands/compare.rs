use std::fs;
use std::path::Path;

use anyhow::Result;
use iptvlink_core::{
    CatalogRecord, CollectionDiff, compare_collections, contains_null_bytes, filter_category, load_records,
};

/// Ids listed per side when key sets differ
const SAMPLE_IDS: usize = 5;

pub fn run(left_path: &Path, right_path: &Path, category: &str, limit: usize) -> Result<()> {
    let diff = compare(left_path, right_path, category, limit);

    for path in files_with_null_bytes(&[left_path, right_path]) {
        println!("\nWARNING: {} contains NULL bytes!", path.display());
    }

    match diff {
        Some(diff) if diff.is_identical() => {
            println!("\nCategory {} data is IDENTICAL between both caches.", category);
        }
        Some(_) => println!("\nCategory {} data DIFFERENCES detected.", category),
        None => {}
    }

    Ok(())
}

/// Load both caches and print the comparison
///
/// Returns `None` when either cache fails to load.
fn compare(left_path: &Path, right_path: &Path, category: &str, limit: usize) -> Option<CollectionDiff> {
    println!("Loading left cache...");
    let left = load_records(left_path);
    println!("Loading right cache...");
    let right = load_records(right_path);

    let (left, right) = match (left, right) {
        (Ok(left), Ok(right)) => (left, right),
        (left, right) => {
            println!("One or both loads failed.");
            report_load_error(left_path, &left);
            report_load_error(right_path, &right);
            return None;
        }
    };

    println!("Left Total Items: {}", left.len());
    println!("Right Total Items: {}", right.len());

    let left_items = filter_category(&left, category);
    let right_items = filter_category(&right, category);
    let diff = compare_collections(&left_items, &right_items, limit);

    println!("\n--- Category {} Comparison ---", category);
    println!("Left Count: {}", diff.left_count);
    println!("Right Count: {}", diff.right_count);
    println!("IDs only in left: {}", diff.only_left.len());
    println!("IDs only in right: {}", diff.only_right.len());

    if !diff.only_left.is_empty() {
        let sample: Vec<&String> = diff.only_left.iter().take(SAMPLE_IDS).collect();
        println!("Sample IDs missing on the right: {:?}", sample);
    }
    if !diff.only_right.is_empty() {
        let sample: Vec<&String> = diff.only_right.iter().take(SAMPLE_IDS).collect();
        println!("Sample extra IDs on the right: {:?}", sample);
    }

    if let Some(first) = &diff.first_difference {
        println!("\nFirst difference found in ID {}:", first.id);
        for mismatch in &first.fields {
            println!(
                "  Field '{}': Left='{}' | Right='{}'",
                mismatch.field,
                display_value(mismatch.left.as_ref()),
                display_value(mismatch.right.as_ref()),
            );
        }
    }

    println!(
        "\nTotal differences in first {} checked shared items: {}",
        diff.checked, diff.diff_count
    );

    Some(diff)
}

/// Cache files holding raw NUL bytes
fn files_with_null_bytes<'a>(paths: &[&'a Path]) -> Vec<&'a Path> {
    paths
        .iter()
        .copied()
        .filter(|path| match fs::read(path) {
            Ok(bytes) => contains_null_bytes(&bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not re-read cache");
                false
            }
        })
        .collect()
}

fn report_load_error(path: &Path, result: &iptvlink_core::Result<Vec<CatalogRecord>>) {
    if let Err(e) = result {
        println!("Error loading {}: {}", path.display(), e);
    }
}

fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None => "None".to_string(),
        Some(v) => iptvlink_core::value_text(Some(v)),
    }
}
