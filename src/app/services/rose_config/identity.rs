//! Content-addressed section re-indexing
//!
//! Sections in the recognised namelist families are indexed by a prefix of
//! the hash of their own content, so identical content always lands under
//! the same identifier and edited content is detectable as an index
//! mismatch. Free-text name options are excluded from the hash (a profile
//! rename must not change its identity).
//!
//! The pass snapshots the whole tree, computes every new identifier from
//! that snapshot, and only then applies the renames, so the outcome does
//! not depend on section iteration order.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::constants::{HASH_PREFIX_LEN, REINDEXED_FAMILIES, excluded_options};
use crate::{Error, Result};

use super::tree::{ConfigSection, ConfigTree, format_section_id, split_section_id};

/// A planned section rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub old_id: String,
    pub new_id: String,
}

/// Canonical `option=value` text of a section, used for content hashing.
///
/// Options are sorted by name and excluded options are omitted, so the
/// text is independent of option insertion order and of free-text names.
fn canonical_section_text(section: &ConfigSection, excluded: &[&str]) -> String {
    let mut names: Vec<&str> = section
        .options
        .keys()
        .map(String::as_str)
        .filter(|name| !excluded.contains(name))
        .collect();
    names.sort_unstable();

    let mut text = String::new();
    for name in names {
        text.push_str(name);
        text.push('=');
        if let Some(value) = section.option(name) {
            text.push_str(value);
        }
        text.push('\n');
    }
    text
}

/// Content hash index of a section: an 8-character lowercase hex prefix
pub fn content_index(section: &ConfigSection, excluded: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_section_text(section, excluded).as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_PREFIX_LEN].to_string()
}

/// The hash half of an existing index (`02205_4a1b2c3d` -> `4a1b2c3d`)
fn index_hash_part(index: &str) -> &str {
    index.rsplit_once('_').map_or(index, |(_, hash)| hash)
}

/// The combined-key half of an existing index (`02205_4a1b2c3d` -> `02205`)
fn index_combined_part(index: &str) -> &str {
    index.rsplit_once('_').map_or(index, |(combined, _)| combined)
}

/// Combined key for a section: its own numeric code identity when the
/// options carry one, otherwise the combined part of the old index
fn combined_key(section: &ConfigSection, old_index: &str) -> String {
    let numeric = |name: &str| {
        section
            .option(name)
            .and_then(|value| value.trim().parse::<u32>().ok())
    };
    match (numeric("isec"), numeric("item")) {
        (Some(section_num), Some(item_num)) => format!("{section_num:02}{item_num:03}"),
        _ => index_combined_part(old_index).to_string(),
    }
}

/// Plan the renames that re-indexing a tree would perform.
///
/// A section is renamed only when the hash half of its current index
/// disagrees with its recomputed content hash, which makes the operation a
/// fixed point: planning against a correctly-indexed tree yields nothing.
pub fn plan_reindex(tree: &ConfigTree) -> Vec<Rename> {
    let mut renames = Vec::new();

    for &family in REINDEXED_FAMILIES {
        let excluded = excluded_options(family);
        for id in tree.ids_in_family(family) {
            let Some(section) = tree.get(&id) else {
                continue;
            };
            let (_, Some(old_index)) = split_section_id(&id) else {
                continue;
            };

            let new_hash = content_index(section, excluded);
            if index_hash_part(old_index) == new_hash {
                continue;
            }

            let new_index = format!("{}_{}", combined_key(section, old_index), new_hash);
            renames.push(Rename {
                old_id: id.clone(),
                new_id: format_section_id(family, &new_index),
            });
        }
    }

    renames
}

/// Re-index a tree in place, returning the renames performed.
///
/// Two differing sections mapping onto one identifier is a fatal collision
/// rather than a silent overwrite.
pub fn apply_reindex(tree: &mut ConfigTree) -> Result<Vec<Rename>> {
    let renames = plan_reindex(tree);

    for (position, rename) in renames.iter().enumerate() {
        if let Some(collision) = renames[..position]
            .iter()
            .find(|other| other.new_id == rename.new_id)
        {
            return Err(Error::SectionCollision {
                old_id: rename.old_id.clone(),
                other_id: collision.old_id.clone(),
                new_id: rename.new_id.clone(),
            });
        }
    }

    for rename in &renames {
        debug!(old = %rename.old_id, new = %rename.new_id, "re-indexing section");
        tree.rename(&rename.old_id, &rename.new_id)?;
    }

    Ok(renames)
}
