//! Loading cached search indexes
//!
//! A search index is a JSON array of catalog records written by the client
//! app into its caches directory.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::types::CatalogRecord;

/// Load a search index as raw JSON values
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `Json` if the file is not valid JSON
/// - `InvalidRoot` if the root is not an array
pub fn load_values(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&data)?;

    match root {
        Value::Array(items) => {
            tracing::debug!(path = %path.display(), items = items.len(), "loaded search index");
            Ok(items)
        }
        other => Err(ToolError::InvalidRoot(json_type_name(&other).to_string())),
    }
}

/// Load a search index as catalog records
///
/// Array elements that are not objects are skipped with a warning.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<CatalogRecord>> {
    let values = load_values(path)?;
    let total = values.len();

    let records: Vec<CatalogRecord> = values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(CatalogRecord::new(map)),
            _ => None,
        })
        .collect();

    if records.len() != total {
        tracing::warn!(
            skipped = total - records.len(),
            "ignored non-object entries in search index"
        );
    }

    Ok(records)
}

/// Keep the records whose category id matches `category`
///
/// Ids are compared in text form, so numeric and string ids match alike.
pub fn filter_category<'a>(records: &'a [CatalogRecord], category: &str) -> Vec<&'a CatalogRecord> {
    records
        .iter()
        .filter(|record| record.category() == category)
        .collect()
}

/// Name of a JSON value's type, as shown in error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
