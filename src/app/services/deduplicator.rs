//! Duplicate request detection
//!
//! Rows arriving from different sheets regularly resolve to the same STASH
//! request (same code, domain, time, usage, and package). Only one copy
//! can go into the suite, so the primary collection is indexed by content
//! identity and pruned: the first-encountered record per identity key is
//! retained, every later one moves to the duplicates collection. Duplicate
//! detection is normal, expected traffic, never an error.

use indexmap::IndexMap;
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::app::models::RequestCollections;

/// Result of a deduplication pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeduplicationOutcome {
    /// Records remaining in the primary collection
    pub retained: usize,
    /// Records moved to the duplicates collection
    pub duplicates: usize,
}

/// Build the identity index over the primary collection, in input order
fn build_identity_index(collections: &RequestCollections) -> IndexMap<String, Vec<String>> {
    let mut index: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, record) in &collections.atmosphere {
        index
            .entry(record.identity_key())
            .or_default()
            .push(key.clone());
    }
    index
}

/// Deduplicate the primary collection in place.
///
/// Every record beyond the first sharing an identity key is moved, in
/// input order, from the primary collection to the duplicates collection.
/// The retained-plus-duplicates total always equals the input count.
pub fn deduplicate(
    collections: &mut RequestCollections,
    progress_bar: Option<&ProgressBar>,
) -> DeduplicationOutcome {
    let input_count = collections.atmosphere.len();
    let index = build_identity_index(collections);

    if let Some(pb) = progress_bar {
        pb.set_length(index.len() as u64);
    }

    let mut duplicate_keys = Vec::new();
    for (identity, keys) in &index {
        if keys.len() > 1 {
            debug!(
                identity = %identity,
                count = keys.len(),
                retained = %keys[0],
                "duplicate request group"
            );
            duplicate_keys.extend(keys.iter().skip(1).cloned());
        }
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }
    }

    for key in duplicate_keys {
        // shift_remove keeps the remaining records in input order
        if let Some(record) = collections.atmosphere.shift_remove(&key) {
            collections.duplicates.insert(key, record);
        }
    }

    let outcome = DeduplicationOutcome {
        retained: collections.atmosphere.len(),
        duplicates: input_count - collections.atmosphere.len(),
    };
    info!(
        retained = outcome.retained,
        duplicates = outcome.duplicates,
        "deduplication complete"
    );
    outcome
}
