//! Tree merging and request section insertion
//!
//! Merging moves every donor section into the target under its own
//! identifier, replacing a same-identified target section wholesale (never
//! option by option) and preserving the donor's state and comments.
//! Callers re-identify both trees first so that differing content never
//! collides under one identifier.

use tracing::debug;

use crate::app::models::DiagnosticRecord;
use crate::constants::{STREQ_FAMILY, excluded_options};
use crate::{Error, Result};

use super::identity::content_index;
use super::tree::{ConfigSection, ConfigTree, format_section_id};

/// Merge every donor section into the target tree.
///
/// Returns a message per merged section, mirroring what the operation did.
pub fn merge_trees(target: &mut ConfigTree, donor: &ConfigTree) -> Vec<String> {
    let mut messages = Vec::new();
    for (id, section) in donor.iter() {
        let action = if target.contains(id) {
            "replaced"
        } else {
            "added"
        };
        messages.push(format!("{id} {action}"));
        debug!(section = %id, action, "merging section");
        target.insert(id.clone(), section.clone());
    }
    messages
}

/// Build a `namelist:streq` section for an assembled request.
///
/// The numeric fields are stored unpadded, matching the namelist
/// convention; the padded forms live only in the section index.
pub fn streq_section(record: &DiagnosticRecord) -> Result<ConfigSection> {
    let section_num: u32 = record.section.parse().map_err(|_| {
        Error::invalid_section(&record.stash, format!("non-numeric section '{}'", record.section))
    })?;
    let item_num: u32 = record.item.parse().map_err(|_| {
        Error::invalid_section(&record.stash, format!("non-numeric item '{}'", record.item))
    })?;

    Ok(ConfigSection::new()
        .with_option("dom_name", &record.dom_name)
        .with_option("isec", section_num.to_string())
        .with_option("item", item_num.to_string())
        .with_option("package", &record.package)
        .with_option("tim_name", &record.tim_name)
        .with_option("use_name", &record.use_name))
}

/// Insert a request into a tree as a content-addressed streq section.
///
/// The identifier combines the request's zero-padded code identity with
/// the section content hash: `namelist:streq(02205_4a1b2c3d)`. Returns the
/// identifier the section landed under.
pub fn add_request(tree: &mut ConfigTree, record: &DiagnosticRecord) -> Result<String> {
    let section = streq_section(record)?;
    let hash = content_index(&section, excluded_options(STREQ_FAMILY));
    let index = format!("{}{}_{}", record.section, record.item, hash);
    let id = format_section_id(STREQ_FAMILY, &index);
    tree.insert(id.clone(), section);
    Ok(id)
}
