//! External cmor-to-STASH translation table
//!
//! The data request occasionally disagrees with the curated cmor mapping
//! file; the assembler consults this lookup both to route ocean/sea-ice
//! rows and to flag disagreements. Misses are normal and recovered with
//! the `"None"` sentinel by callers.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
struct MappingRow {
    cmor: String,
    stash: String,
}

/// cmor variable name to STASH code string lookup
#[derive(Debug, Default)]
pub struct CmorStashLookup {
    mappings: HashMap<String, String>,
}

impl CmorStashLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the lookup from a CSV file with `cmor,stash` columns
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                "failed to open cmor mapping file",
                Some(e),
            )
        })?;

        let mut lookup = Self::new();
        for result in reader.deserialize() {
            let row: MappingRow = result.map_err(|e| {
                Error::csv_parsing(
                    path.display().to_string(),
                    "malformed cmor mapping row",
                    Some(e),
                )
            })?;
            lookup.insert(row.cmor, row.stash);
        }
        info!(mappings = lookup.len(), "loaded cmor mappings");
        Ok(lookup)
    }

    pub fn insert(&mut self, cmor: impl Into<String>, stash: impl Into<String>) {
        self.mappings.insert(cmor.into(), stash.into());
    }

    /// STASH code string for a cmor name, if the mapping file knows it
    pub fn translate(&self, cmor: &str) -> Option<&str> {
        self.mappings.get(cmor).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
