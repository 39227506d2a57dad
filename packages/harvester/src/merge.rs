//! Merging partition files into a source dataset.
//!
//! Writing the dataset and deleting the partitions are separate steps. If
//! the process dies in between, the leftover partitions count as collected
//! on the next run and are merged again.

use crate::error::{HarvesterError, Result};
use crate::store::Store;
use crate::types::Dataset;

/// Union all existing partition files of `source` into `{source}.json`.
///
/// Partitions are read in `tokens` order, later ones overwriting earlier ones
/// on key collision. Missing partitions contribute nothing. Every partition
/// that was merged is deleted afterwards.
pub fn merge_partitions(store: &Store, source: &str, tokens: &[&str]) -> Result<Dataset> {
    let mut merged = Dataset::new();
    let mut merged_paths = Vec::new();

    for token in tokens {
        let path = store.partition_path(source, token);
        match store.read(&path) {
            Ok(Some(partition)) => {
                merged.extend(partition);
                merged_paths.push(path);
            }
            Ok(None) => {
                tracing::debug!(source, token, "No partition file, nothing to merge");
            }
            Err(HarvesterError::Dataset { path, source: e }) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping undecodable partition file");
            }
            Err(e) => return Err(e),
        }
    }

    store.write(&store.dataset_path(source), &merged)?;

    for path in &merged_paths {
        store.remove(path)?;
    }

    tracing::info!(
        source,
        laws = merged.len(),
        partitions = merged_paths.len(),
        "Merged partitions"
    );

    Ok(merged)
}
