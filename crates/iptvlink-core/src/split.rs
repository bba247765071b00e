//! Splitting a search index into smaller files
//!
//! Writes a fixed number of contiguous chunks so a large cache can be
//! opened piece by piece. Record order is preserved.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, ToolError};

/// Default number of chunks
pub const DEFAULT_PARTS: usize = 10;

/// Default output directory for chunk files
pub const DEFAULT_OUTPUT_DIR: &str = "SplitCacheSimulator";

/// Divide `items` into exactly `parts` contiguous slices
///
/// Every slice holds `ceil(len / parts)` items except the tail, so trailing
/// slices may be shorter or empty.
///
/// # Errors
/// `InvalidArgument` if `parts` is zero
///
/// # Example
/// ```
/// use iptvlink_core::partition;
/// let chunks = partition(&[1, 2, 3, 4, 5], 3).unwrap();
/// assert_eq!(chunks, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn partition<T>(items: &[T], parts: usize) -> Result<Vec<&[T]>> {
    if parts == 0 {
        return Err(ToolError::InvalidArgument(
            "number of parts must be at least 1".to_string(),
        ));
    }

    let chunk_size = items.len().div_ceil(parts);

    Ok((0..parts)
        .map(|i| {
            let start = (i * chunk_size).min(items.len());
            let end = (start + chunk_size).min(items.len());
            &items[start..end]
        })
        .collect())
}

/// A chunk file written by [`write_chunks`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFile {
    pub path: PathBuf,
    pub items: usize,
}

/// Write `values` as `parts` pretty-printed `chunk_<n>.json` files
///
/// Creates `output_dir` if needed. Chunk numbers start at 1.
pub fn write_chunks(values: &[Value], output_dir: impl AsRef<Path>, parts: usize) -> Result<Vec<ChunkFile>> {
    let output_dir = output_dir.as_ref();
    let chunks = partition(values, parts)?;

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let path = output_dir.join(format!("chunk_{}.json", i + 1));
        let json = serde_json::to_string_pretty(chunk)?;
        fs::write(&path, json)?;

        tracing::info!(items = chunk.len(), path = %path.display(), "wrote chunk");
        written.push(ChunkFile {
            path,
            items: chunk.len(),
        });
    }

    Ok(written)
}
