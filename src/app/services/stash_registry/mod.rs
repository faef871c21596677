//! STASH name registry
//!
//! An in-memory lookup from `(section, item)` to the STASHmaster entry for
//! that code, loaded from a CSV export of the STASHmaster file. The
//! dependency corrector keys several rules off the human-readable name, so
//! the registry is threaded explicitly into every pass that needs it.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{Error, Result};

/// One STASHmaster entry
#[derive(Debug, Clone, Deserialize)]
pub struct StashEntry {
    pub section: u32,
    pub item: u32,
    pub name: String,
}

/// Registry of STASHmaster entries keyed by code identity
#[derive(Debug, Default)]
pub struct StashRegistry {
    entries: HashMap<(u32, u32), StashEntry>,
}

impl StashRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a CSV export with `section,item,name` columns
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                "failed to open STASHmaster export",
                Some(e),
            )
        })?;

        let mut registry = Self::new();
        for result in reader.deserialize() {
            let entry: StashEntry = result.map_err(|e| {
                Error::csv_parsing(
                    path.display().to_string(),
                    "malformed STASHmaster row",
                    Some(e),
                )
            })?;
            registry.insert(entry);
        }

        if registry.is_empty() {
            return Err(Error::stash_registry(format!(
                "no entries loaded from {}",
                path.display()
            )));
        }
        info!(entries = registry.len(), "loaded STASH registry");
        Ok(registry)
    }

    pub fn insert(&mut self, entry: StashEntry) {
        self.entries.insert((entry.section, entry.item), entry);
    }

    /// Human-readable name for a code, if the registry knows it
    pub fn name_for(&self, section: u32, item: u32) -> Option<&str> {
        self.entries
            .get(&(section, item))
            .map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
