//! Description sanitization
//!
//! Provider descriptions sometimes run to thousands of characters or end
//! in pasted links. The client app shows at most [`MAX_DESCRIPTION_CHARS`]
//! characters and drops everything from the first embedded URL.

use serde::Serialize;

use crate::types::CatalogRecord;

/// Longest description kept before the ellipsis is appended
pub const MAX_DESCRIPTION_CHARS: usize = 600;

/// Marker appended to truncated descriptions
pub const ELLIPSIS: &str = "...";

/// Record ids used by the sanitization check by default
pub const DEFAULT_SAMPLE_IDS: [&str; 2] = ["22365", "47548"];

/// Truncate a description at its first URL and cap its length
///
/// 1. Everything from the first `"http"` onward is dropped.
/// 2. Longer than [`MAX_DESCRIPTION_CHARS`] characters: keep that many and
///    append [`ELLIPSIS`].
/// 3. Surrounding whitespace is trimmed.
///
/// # Example
/// ```
/// use iptvlink_core::sanitize_description;
/// let out = sanitize_description(Some("A thriller. Watch at https://example.com"));
/// assert_eq!(out, "A thriller. Watch at");
/// assert_eq!(sanitize_description(None), "");
/// ```
pub fn sanitize_description(description: Option<&str>) -> String {
    let Some(text) = description.filter(|d| !d.is_empty()) else {
        return String::new();
    };

    let text = match text.find("http") {
        Some(idx) => &text[..idx],
        None => text,
    };

    let truncated = match text.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    };

    truncated.trim().to_string()
}

/// Before/after description length statistics for a set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizationReport {
    pub items: usize,
    pub avg_before: f64,
    pub avg_after: f64,
    pub max_before: usize,
    pub max_after: usize,
}

impl SanitizationReport {
    /// Measure description lengths before and after sanitizing
    ///
    /// Returns `None` for an empty record set.
    pub fn measure(records: &[&CatalogRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let (before, after): (Vec<usize>, Vec<usize>) = records
            .iter()
            .map(|record| {
                let original = record.text("description");
                let sanitized = sanitize_description(Some(&original));
                (original.chars().count(), sanitized.chars().count())
            })
            .unzip();

        let count = records.len() as f64;
        Some(Self {
            items: records.len(),
            avg_before: before.iter().sum::<usize>() as f64 / count,
            avg_after: after.iter().sum::<usize>() as f64 / count,
            max_before: before.iter().copied().max().unwrap_or(0),
            max_after: after.iter().copied().max().unwrap_or(0),
        })
    }
}

/// Sanitization result for one sample record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCheck {
    pub id: String,
    pub name: String,
    pub original: String,
    pub sanitized: String,
}

impl SampleCheck {
    /// Look up `id` and sanitize its description, `None` if absent
    pub fn find(records: &[&CatalogRecord], id: &str) -> Option<Self> {
        let record = records.iter().find(|record| record.id() == id)?;
        let original = record.text("description");
        Some(Self {
            id: id.to_string(),
            name: record.text("name"),
            sanitized: sanitize_description(Some(&original)),
            original,
        })
    }

    pub fn original_len(&self) -> usize {
        self.original.chars().count()
    }

    pub fn sanitized_len(&self) -> usize {
        self.sanitized.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CatalogRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_and_none() {
        assert_eq!(sanitize_description(None), "");
        assert_eq!(sanitize_description(Some("")), "");
    }

    #[test]
    fn test_short_text_trimmed() {
        assert_eq!(sanitize_description(Some("  A quiet drama.  ")), "A quiet drama.");
    }

    #[test]
    fn test_cuts_at_first_http() {
        let out = sanitize_description(Some("Love story. http://a.example more https://b.example"));
        assert_eq!(out, "Love story.");
    }

    #[test]
    fn test_http_at_start_gives_empty() {
        assert_eq!(sanitize_description(Some("https://spam.example")), "");
    }

    #[test]
    fn test_long_text_capped_with_ellipsis() {
        let input = "a".repeat(1200);
        let out = sanitize_description(Some(&input));
        assert_eq!(out.chars().count(), MAX_DESCRIPTION_CHARS + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_exactly_limit_is_unchanged() {
        let input = "b".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(sanitize_description(Some(&input)), input);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let input = "é".repeat(MAX_DESCRIPTION_CHARS + 10);
        let out = sanitize_description(Some(&input));
        assert_eq!(out.chars().count(), 603);
    }

    #[test]
    fn test_report_measures_lengths() {
        let long = record(json!({"id": "22365", "description": "x".repeat(1000)}));
        let url = record(json!({"id": "47548", "description": "Nice film http://x.example"}));
        let empty = record(json!({"id": "3"}));
        let records = vec![&long, &url, &empty];

        let report = SanitizationReport::measure(&records).unwrap();
        assert_eq!(report.items, 3);
        assert_eq!(report.max_before, 1000);
        assert_eq!(report.max_after, 603);
        assert!((report.avg_after - (603.0 + 9.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_empty_set() {
        assert!(SanitizationReport::measure(&[]).is_none());
    }

    #[test]
    fn test_sample_check_lookup() {
        let url = record(json!({"id": "47548", "name": "Hasratein", "description": "Song http://x"}));
        let records = vec![&url];

        let sample = SampleCheck::find(&records, "47548").unwrap();
        assert_eq!(sample.name, "Hasratein");
        assert_eq!(sample.sanitized, "Song");
        assert_eq!(sample.original_len(), 13);
        assert!(SampleCheck::find(&records, "22365").is_none());
    }

    proptest! {
        #[test]
        fn prop_short_text_without_url_is_trimmed_input(s in "[a-zA-Z0-9 .,]{0,600}") {
            prop_assume!(!s.contains("http"));
            prop_assert_eq!(sanitize_description(Some(&s)), s.trim());
        }

        #[test]
        fn prop_long_text_without_url_is_603_chars(s in "[a-z][a-z .]{600,1500}") {
            prop_assume!(!s.contains("http"));
            prop_assert_eq!(sanitize_description(Some(&s)).chars().count(), 603);
        }

        #[test]
        fn prop_nothing_after_http_survives(
            prefix in "[a-z ]{0,700}",
            suffix in "[A-Z]{1,50}",
        ) {
            let input = format!("{}http{}", prefix, suffix);
            let p = prefix.chars().count();
            let out = sanitize_description(Some(&input));
            prop_assert!(!out.contains("http"));
            prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert!(out.chars().count() <= p.min(MAX_DESCRIPTION_CHARS) + ELLIPSIS.len());
        }
    }
}
