//! Suite configuration tree manipulation
//!
//! The suite configuration is treated as an opaque, ordered tree of named
//! sections holding string-valued options; its on-disk serialization is a
//! caller concern. This module provides the operations the request
//! pipeline needs on that tree:
//!
//! - [`tree`] - the [`tree::ConfigTree`] container and section identifiers
//! - [`identity`] - content-addressed section re-indexing
//! - [`merge`] - donor-into-target merging and request section insertion
//! - [`stash_meaning`] - climate-meaning to STASH-meaning profile rewrites
//!
//! Re-identification is computed from a snapshot of the whole tree and
//! then applied, so the result is independent of section order; running it
//! on an already-correctly-indexed tree performs zero renames.

pub mod identity;
pub mod merge;
pub mod stash_meaning;
pub mod tree;

#[cfg(test)]
pub mod tests;

pub use identity::{Rename, apply_reindex, plan_reindex};
pub use merge::{add_request, merge_trees};
pub use tree::{ConfigSection, ConfigTree, SectionState};
