//! Tests for request assembly

mod assembler_tests;

use crate::app::models::DiagnosticRow;
use crate::app::services::cmor_lookup::CmorStashLookup;
use crate::app::services::stash_registry::{StashEntry, StashRegistry};

/// A data-request row with sensible defaults for assembly tests
pub fn row(unique_key: &str, cmor: &str, stash_codes: &str) -> DiagnosticRow {
    DiagnosticRow {
        dimensions: "longitude-latitude-time".to_string(),
        cell_method: "time: mean".to_string(),
        frequency: "mon".to_string(),
        cmip_priority: "1".to_string(),
        mo_priority: "UM:1".to_string(),
        stash_codes: stash_codes.to_string(),
        cmor_name: cmor.to_string(),
        variable_name: cmor.to_string(),
        units: "K".to_string(),
        realm: "atmos".to_string(),
        unique_key: unique_key.to_string(),
    }
}

pub fn registry() -> StashRegistry {
    let mut registry = StashRegistry::new();
    registry.insert(StashEntry {
        section: 3,
        item: 236,
        name: "TEMPERATURE AT 1.5M".to_string(),
    });
    registry.insert(StashEntry {
        section: 0,
        item: 2,
        name: "U COMPNT OF WIND AFTER TIMESTEP".to_string(),
    });
    registry
}

pub fn lookup() -> CmorStashLookup {
    let mut lookup = CmorStashLookup::new();
    lookup.insert("tas", "m01s03i236");
    lookup.insert("ua", "m01s00i002,m01s30i201");
    lookup
}
