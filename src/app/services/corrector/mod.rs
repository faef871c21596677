//! Dependency correction for assembled STASH requests
//!
//! Classification alone cannot capture everything the request metadata
//! implies: satellite-simulator diagnostics need radiation-timestep time
//! profiles, tiled and soil diagnostics need their own domains, limited-area
//! packages move onto regional domains, and a handful of individual codes
//! carry level sets the request never states. These situational rules are
//! keyed by the resolved numeric code identity and the human-readable STASH
//! name, and run once per record after assembly.
//!
//! The rules are held in a fixed, ordered table ([`rules::RULES`]) evaluated
//! in sequence; each rule mutates only the `dom_name`, `tim_name`, `package`
//! and `lbproc` fields, never the record identity. The whole pass is
//! idempotent: correcting an already-corrected record is a no-op.

pub mod rules;

#[cfg(test)]
pub mod tests;

use tracing::debug;

use crate::Result;
use crate::app::models::DiagnosticRecord;
use crate::app::services::assembler::code::StashCode;
use crate::app::services::stash_registry::StashRegistry;

/// Resolved context a correction rule may consult
#[derive(Debug, Clone)]
pub struct CorrectionContext {
    /// Numeric section of the request code
    pub section: u32,
    /// Numeric item of the request code
    pub item: u32,
    /// Human-readable STASH name; empty when the code has no registry entry
    pub stash_name: String,
}

impl CorrectionContext {
    /// Build the context for a code, resolving the STASH name through the
    /// registry. A missing entry is recovered with an empty name.
    pub fn resolve(code: &StashCode, registry: &StashRegistry) -> Self {
        let stash_name = match registry.name_for(code.section, code.item) {
            Some(name) => name.to_string(),
            None => {
                debug!(
                    section = code.section,
                    item = code.item,
                    "stash code does not translate"
                );
                String::new()
            }
        };
        Self {
            section: code.section,
            item: code.item,
            stash_name,
        }
    }
}

/// Apply the full correction rule table to a record, in order.
///
/// Returns an error only for structural problems (a limited-area package on
/// a domain with no regional counterpart); everything else is an in-place
/// adjustment.
pub fn correct(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    for &(name, rule) in rules::RULES {
        rule(record, context)?;
        tracing::trace!(rule = name, stash = %record.stash, "correction rule applied");
    }
    Ok(())
}
