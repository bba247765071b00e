//! Descriptive statistics over cached catalog records
//!
//! Used to track down rendering slowdowns on device: overlong descriptions,
//! unbreakable words, non-ASCII titles and missing artwork.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::types::CatalogRecord;

/// Number of most common `added` dates reported
const TOP_DATES: usize = 5;

/// Characters of the `added` timestamp that form the date
const DATE_PREFIX_LEN: usize = 10;

/// Characters of a long description echoed in findings
const PREVIEW_CHARS: usize = 100;

/// Default threshold for [`find_long_descriptions`]
pub const LONG_DESCRIPTION_CHARS: usize = 1000;

/// Default threshold for [`find_long_words`]
pub const LONG_WORD_CHARS: usize = 50;

/// Which set of statistics to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportProfile {
    /// Lengths, word size, non-ASCII and missing images only
    Compact,
    /// Everything, including empty-field counts, durations and dates
    #[default]
    Full,
}

/// Statistics for the records of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryReport {
    Empty {
        label: String,
        error: String,
    },
    Stats(Box<CategoryStats>),
}

/// Computed statistics, serialized in reporting order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub label: String,
    pub count: usize,
    pub avg_desc_len: f64,
    pub avg_name_len: f64,
    pub avg_actors_len: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_desc: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_actors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_genres: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_images: Option<String>,
    pub max_word_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<f64>,
    pub non_ascii_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_images: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_dates: Option<Vec<(String, usize)>>,
}

/// Analyze the records of one category
///
/// # Arguments
/// * `items` - records already filtered to one category
/// * `label` - name shown in the report
/// * `profile` - which statistics to include
pub fn analyze(items: &[&CatalogRecord], label: &str, profile: ReportProfile) -> CategoryReport {
    if items.is_empty() {
        return CategoryReport::Empty {
            label: label.to_string(),
            error: "No items".to_string(),
        };
    }

    let count = items.len();
    let full = profile == ReportProfile::Full;

    let mut stats = CategoryStats {
        label: label.to_string(),
        count,
        avg_desc_len: round1(average_len(items, "description")),
        avg_name_len: round1(average_len(items, "name")),
        avg_actors_len: round1(average_len(items, "actors")),
        empty_desc: None,
        empty_actors: None,
        empty_genres: None,
        unique_images: None,
        max_word_len: max_word_len(items),
        avg_duration: None,
        max_duration: None,
        non_ascii_count: items.iter().filter(|r| has_non_ascii_text(r)).count(),
        null_images: None,
        top_dates: None,
    };

    if full {
        stats.empty_desc = Some(count_blank(items, "description"));
        stats.empty_actors = Some(count_blank(items, "actors"));
        stats.empty_genres = Some(count_blank(items, "genres_str"));
        stats.unique_images = Some(format!("{}/{}", unique_images(items), count));

        let (avg, max) = duration_stats(items);
        stats.avg_duration = Some(round1(avg));
        stats.max_duration = Some(max);
        stats.top_dates = Some(top_dates(items, TOP_DATES));
    } else {
        stats.null_images = Some(count_blank(items, "screenshot_uri"));
    }

    CategoryReport::Stats(Box::new(stats))
}

/// A description at or above the length threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongDescription {
    pub id: String,
    pub name: String,
    pub length: usize,
    pub preview: String,
}

/// Records whose description has at least `min_chars` characters
pub fn find_long_descriptions(items: &[&CatalogRecord], min_chars: usize) -> Vec<LongDescription> {
    items
        .iter()
        .filter_map(|record| {
            let description = record.text("description");
            let length = description.chars().count();
            (length >= min_chars).then(|| LongDescription {
                id: record.id(),
                name: record.text("name"),
                length,
                preview: description.chars().take(PREVIEW_CHARS).collect(),
            })
        })
        .collect()
}

/// A single word at or above the length threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongWord {
    pub word: String,
    pub length: usize,
    pub id: String,
    pub name: String,
}

/// Words of at least `min_len` characters in names and descriptions
pub fn find_long_words(items: &[&CatalogRecord], min_len: usize) -> Vec<LongWord> {
    let mut found = Vec::new();

    for record in items {
        for field in ["name", "description"] {
            let text = record.text(field);
            for word in text.split_whitespace() {
                let length = word.chars().count();
                if length >= min_len {
                    found.push(LongWord {
                        word: word.to_string(),
                        length,
                        id: record.id(),
                        name: record.text("name"),
                    });
                }
            }
        }
    }

    found
}

/// Whether any character lies outside ASCII
pub fn has_non_ascii(text: &str) -> bool {
    !text.is_ascii()
}

fn has_non_ascii_text(record: &CatalogRecord) -> bool {
    has_non_ascii(&record.text("name")) || has_non_ascii(&record.text("description"))
}

fn average_len(items: &[&CatalogRecord], field: &str) -> f64 {
    let total: usize = items.iter().map(|r| r.text(field).chars().count()).sum();
    total as f64 / items.len() as f64
}

fn count_blank(items: &[&CatalogRecord], field: &str) -> usize {
    items.iter().filter(|r| r.is_blank(field)).count()
}

fn unique_images(items: &[&CatalogRecord]) -> usize {
    items
        .iter()
        .filter(|r| !r.is_blank("screenshot_uri"))
        .map(|r| r.text("screenshot_uri"))
        .collect::<HashSet<_>>()
        .len()
}

fn max_word_len(items: &[&CatalogRecord]) -> usize {
    items
        .iter()
        .flat_map(|r| [r.text("name"), r.text("description")])
        .flat_map(|text| {
            text.split_whitespace()
                .map(|w| w.chars().count())
                .collect::<Vec<_>>()
        })
        .max()
        .unwrap_or(0)
}

/// Average and maximum duration
///
/// Blank durations count as zero and booleans as 1 or 0. A single unparseable value zeroes both
/// figures.
fn duration_stats(items: &[&CatalogRecord]) -> (f64, f64) {
    let durations: Option<Vec<f64>> = items
        .iter()
        .map(|r| {
            if let Some(Value::Bool(b)) = r.get("duration") {
                Some(if *b { 1.0 } else { 0.0 })
            } else if r.is_blank("duration") {
                Some(0.0)
            } else {
                r.text("duration").trim().parse::<f64>().ok()
            }
        })
        .collect();

    match durations {
        Some(values) if !values.is_empty() => {
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            let max = values.iter().copied().fold(f64::MIN, f64::max);
            (avg, max)
        }
        _ => (0.0, 0.0),
    }
}

/// Most common `added` date prefixes, ties kept in first-seen order
fn top_dates(items: &[&CatalogRecord], limit: usize) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for record in items {
        let date: String = record.text("added").chars().take(DATE_PREFIX_LEN).collect();
        let entry = counts.entry(date.clone()).or_insert_with(|| {
            order.push(date);
            0
        });
        *entry += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|date| {
            let count = counts[&date];
            (date, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn records(values: Value) -> Vec<CatalogRecord> {
        serde_json::from_value(values).unwrap()
    }

    fn sample() -> Vec<CatalogRecord> {
        records(json!([
            {
                "id": "1", "name": "Dil", "description": "Love story",
                "actors": "A, B", "genres_str": "Drama", "screenshot_uri": "a.jpg",
                "duration": "120", "added": "2026-01-05 10:00:00"
            },
            {
                "id": "2", "name": "Café", "description": "",
                "actors": "", "genres_str": "", "screenshot_uri": "a.jpg",
                "duration": 60, "added": "2026-01-05 11:00:00"
            },
            {
                "id": "3", "name": "Long", "description": "Supercalifragilistic word",
                "screenshot_uri": "", "added": "2026-01-06 09:00:00"
            }
        ]))
    }

    fn stats(report: CategoryReport) -> CategoryStats {
        match report {
            CategoryReport::Stats(stats) => *stats,
            CategoryReport::Empty { .. } => panic!("Expected stats"),
        }
    }

    #[test]
    fn test_analyze_empty_set() {
        let report = analyze(&[], "Category 6", ReportProfile::Full);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"label": "Category 6", "error": "No items"})
        );
    }

    #[test]
    fn test_analyze_full_profile() {
        let data = sample();
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let s = stats(analyze(&items, "Category 6", ReportProfile::Full));

        assert_eq!(s.count, 3);
        assert_eq!(s.avg_desc_len, 11.7);
        assert_eq!(s.avg_name_len, 3.7);
        assert_eq!(s.empty_desc, Some(1));
        assert_eq!(s.empty_actors, Some(2));
        assert_eq!(s.empty_genres, Some(2));
        assert_eq!(s.unique_images.as_deref(), Some("1/3"));
        assert_eq!(s.max_word_len, 20);
        assert_eq!(s.avg_duration, Some(60.0));
        assert_eq!(s.max_duration, Some(120.0));
        assert_eq!(s.non_ascii_count, 1);
        assert_eq!(s.null_images, None);
        assert_eq!(
            s.top_dates,
            Some(vec![("2026-01-05".to_string(), 2), ("2026-01-06".to_string(), 1)])
        );
    }

    #[test]
    fn test_analyze_compact_profile_fields() {
        let data = sample();
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let value = serde_json::to_value(analyze(&items, "ATV Cat 6", ReportProfile::Compact)).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = vec![
            "label",
            "count",
            "avg_desc_len",
            "avg_name_len",
            "avg_actors_len",
            "max_word_len",
            "non_ascii_count",
            "null_images",
        ];
        let mut keys_sorted = keys.clone();
        keys_sorted.sort();
        expected.sort();
        assert_eq!(keys_sorted, expected);
        assert_eq!(value["null_images"], json!(1));
    }

    #[test]
    fn test_duration_unparseable_zeroes_stats() {
        let data = records(json!([
            {"id": "1", "duration": "90"},
            {"id": "2", "duration": "1h 30m"}
        ]));
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let s = stats(analyze(&items, "x", ReportProfile::Full));
        assert_eq!(s.avg_duration, Some(0.0));
        assert_eq!(s.max_duration, Some(0.0));
    }

    #[test]
    fn test_duration_booleans_count_as_numbers() {
        let data = records(json!([
            {"id": "1", "duration": true},
            {"id": "2", "duration": false},
            {"id": "3", "duration": "2.5"}
        ]));
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let s = stats(analyze(&items, "x", ReportProfile::Full));
        assert_eq!(s.avg_duration, Some(1.2));
        assert_eq!(s.max_duration, Some(2.5));
    }

    #[test]
    fn test_top_dates_limit_and_tie_order() {
        let data = records(json!([
            {"added": "2026-01-07"}, {"added": "2026-01-01"}, {"added": "2026-01-02"},
            {"added": "2026-01-03"}, {"added": "2026-01-04"}, {"added": "2026-01-05"},
            {"added": "2026-01-05"}
        ]));
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let dates = top_dates(&items, 5);
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], ("2026-01-05".to_string(), 2));
        assert_eq!(dates[1].0, "2026-01-07");
        assert_eq!(dates[4].0, "2026-01-03");
    }

    #[test]
    fn test_find_long_descriptions() {
        let data = records(json!([
            {"id": "22365", "name": "Pushpavalli", "description": "p".repeat(1500)},
            {"id": "2", "name": "Short", "description": "tiny"}
        ]));
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let found = find_long_descriptions(&items, LONG_DESCRIPTION_CHARS);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "22365");
        assert_eq!(found[0].length, 1500);
        assert_eq!(found[0].preview.chars().count(), 100);
    }

    #[test]
    fn test_find_long_words_in_name_and_description() {
        let long = "x".repeat(60);
        let data = records(json!([
            {"id": "9", "name": long.clone(), "description": format!("see {}", long)}
        ]));
        let items: Vec<&CatalogRecord> = data.iter().collect();
        let found = find_long_words(&items, LONG_WORD_CHARS);

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|w| w.length == 60 && w.id == "9"));
    }

    #[test]
    fn test_has_non_ascii() {
        assert!(!has_non_ascii("Plain title"));
        assert!(has_non_ascii("Dilwale Dulhania – 1995"));
        assert!(has_non_ascii("दिल"));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(11.666), 11.7);
        assert_eq!(round1(3.0), 3.0);
    }
}
