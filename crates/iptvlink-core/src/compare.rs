//! Comparing two cached search indexes
//!
//! Diffs the same category as cached on two devices (e.g. simulator vs.
//! Apple TV) by record id, then field by field for shared ids.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::types::CatalogRecord;

/// Shared records compared field by field by default
pub const DEFAULT_COMPARE_LIMIT: usize = 500;

/// One field that differs between the two sides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMismatch {
    pub field: String,
    pub left: Option<Value>,
    pub right: Option<Value>,
}

/// All differing fields of one shared record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDifference {
    pub id: String,
    pub fields: Vec<FieldMismatch>,
}

/// Outcome of comparing two record collections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionDiff {
    pub left_count: usize,
    pub right_count: usize,
    pub only_left: BTreeSet<String>,
    pub only_right: BTreeSet<String>,
    /// Shared ids that were compared
    pub checked: usize,
    /// Shared ids whose records differ
    pub diff_count: usize,
    pub first_difference: Option<RecordDifference>,
}

impl CollectionDiff {
    /// Both sides hold the same ids and no checked record differs
    pub fn is_identical(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty() && self.diff_count == 0
    }
}

/// Compare two collections keyed by record id
///
/// # Arguments
/// * `left`, `right` - records to compare
/// * `limit` - maximum number of shared ids to compare, in id order
pub fn compare_collections(
    left: &[&CatalogRecord],
    right: &[&CatalogRecord],
    limit: usize,
) -> CollectionDiff {
    let left_lookup = index_by_id(left);
    let right_lookup = index_by_id(right);

    let left_ids: BTreeSet<String> = left_lookup.keys().cloned().collect();
    let right_ids: BTreeSet<String> = right_lookup.keys().cloned().collect();

    let only_left = left_ids.difference(&right_ids).cloned().collect();
    let only_right = right_ids.difference(&left_ids).cloned().collect();

    let mut checked = 0;
    let mut diff_count = 0;
    let mut first_difference = None;

    for id in left_ids.intersection(&right_ids).take(limit) {
        checked += 1;
        let (l, r) = (left_lookup[id], right_lookup[id]);
        if l == r {
            continue;
        }

        diff_count += 1;
        if first_difference.is_none() {
            first_difference = Some(RecordDifference {
                id: id.clone(),
                fields: field_mismatches(l, r),
            });
        }
    }

    CollectionDiff {
        left_count: left.len(),
        right_count: right.len(),
        only_left,
        only_right,
        checked,
        diff_count,
        first_difference,
    }
}

/// Whether raw file contents contain NUL bytes
pub fn contains_null_bytes(bytes: &[u8]) -> bool {
    bytes.contains(&0)
}

/// Later duplicates of an id replace earlier ones
fn index_by_id<'a>(records: &[&'a CatalogRecord]) -> BTreeMap<String, &'a CatalogRecord> {
    records.iter().map(|record| (record.id(), *record)).collect()
}

fn field_mismatches(left: &CatalogRecord, right: &CatalogRecord) -> Vec<FieldMismatch> {
    let keys: BTreeSet<&String> = left.fields().keys().chain(right.fields().keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let (l, r) = (left.get(key), right.get(key));
            (l != r).then(|| FieldMismatch {
                field: key.clone(),
                left: l.cloned(),
                right: r.cloned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<CatalogRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_identical_collections() {
        let data = records(json!([
            {"id": "1", "name": "A"},
            {"id": "2", "name": "B"}
        ]));
        let items: Vec<&CatalogRecord> = data.iter().collect();

        let diff = compare_collections(&items, &items, DEFAULT_COMPARE_LIMIT);
        assert_eq!(diff.diff_count, 0);
        assert!(diff.only_left.is_empty());
        assert!(diff.only_right.is_empty());
        assert_eq!(diff.checked, 2);
        assert!(diff.is_identical());
    }

    #[test]
    fn test_key_set_differences() {
        let sim = records(json!([{"id": "1"}, {"id": "2"}, {"id": 3}]));
        let atv = records(json!([{"id": "2"}, {"id": "4"}]));
        let (l, r): (Vec<_>, Vec<_>) = (sim.iter().collect(), atv.iter().collect());

        let diff = compare_collections(&l, &r, DEFAULT_COMPARE_LIMIT);
        assert_eq!(diff.left_count, 3);
        assert_eq!(diff.right_count, 2);
        assert_eq!(diff.only_left.iter().cloned().collect::<Vec<_>>(), vec!["1", "3"]);
        assert_eq!(diff.only_right.iter().cloned().collect::<Vec<_>>(), vec!["4"]);
        assert!(!diff.is_identical());
    }

    #[test]
    fn test_field_level_mismatch_reported_for_first_difference() {
        let sim = records(json!([
            {"id": "1", "name": "A", "description": "same"},
            {"id": "2", "name": "B", "actors": "X"}
        ]));
        let atv = records(json!([
            {"id": "1", "name": "A*", "description": "same", "added": "2026-02-08"},
            {"id": "2", "name": "B", "actors": "Y"}
        ]));
        let (l, r): (Vec<_>, Vec<_>) = (sim.iter().collect(), atv.iter().collect());

        let diff = compare_collections(&l, &r, DEFAULT_COMPARE_LIMIT);
        assert_eq!(diff.diff_count, 2);

        let first = diff.first_difference.unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(
            first.fields,
            vec![
                FieldMismatch {
                    field: "added".to_string(),
                    left: None,
                    right: Some(json!("2026-02-08")),
                },
                FieldMismatch {
                    field: "name".to_string(),
                    left: Some(json!("A")),
                    right: Some(json!("A*")),
                },
            ]
        );
    }

    #[test]
    fn test_limit_caps_checked_records() {
        let sim = records(json!([{"id": "1", "v": 1}, {"id": "2", "v": 1}, {"id": "3", "v": 1}]));
        let atv = records(json!([{"id": "1", "v": 2}, {"id": "2", "v": 2}, {"id": "3", "v": 2}]));
        let (l, r): (Vec<_>, Vec<_>) = (sim.iter().collect(), atv.iter().collect());

        let diff = compare_collections(&l, &r, 2);
        assert_eq!(diff.checked, 2);
        assert_eq!(diff.diff_count, 2);
    }

    #[test]
    fn test_contains_null_bytes() {
        assert!(contains_null_bytes(b"[{\"id\": \"1\0\"}]"));
        assert!(!contains_null_bytes(b"[]"));
    }
}
