//! The configuration tree and section identifiers
//!
//! Sections are identified by `family(index)` strings such as
//! `namelist:streq(02205_4a1b2c3d)`; un-indexed sections (`env`,
//! `command`) are identified by their bare family name. The tree preserves
//! insertion order and supports the lookup/insert/rename operations the
//! identity and merge passes need.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Whether a section is active in the suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionState {
    #[default]
    Enabled,
    UserIgnored,
    TriggerIgnored,
}

/// A named, keyed collection of string-valued options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSection {
    #[serde(default)]
    pub state: SectionState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default)]
    pub options: IndexMap<String, String>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style option setter for constructing sections in code
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.insert(name.into(), value.into());
    }
}

/// Split a section identifier into its family and optional index
pub fn split_section_id(id: &str) -> (&str, Option<&str>) {
    match id.split_once('(') {
        Some((family, rest)) => (family, Some(rest.trim_end_matches(')'))),
        None => (id, None),
    }
}

/// Format a `family(index)` section identifier
pub fn format_section_id(family: &str, index: &str) -> String {
    format!("{family}({index})")
}

/// An ordered mapping from section identifier to section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTree {
    sections: IndexMap<String, ConfigSection>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ConfigSection> {
        self.sections.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ConfigSection> {
        self.sections.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    /// Insert a section, replacing any existing section under the same
    /// identifier
    pub fn insert(&mut self, id: impl Into<String>, section: ConfigSection) {
        self.sections.insert(id.into(), section);
    }

    pub fn remove(&mut self, id: &str) -> Option<ConfigSection> {
        self.sections.shift_remove(id)
    }

    /// Move a section from one identifier to another, preserving its
    /// options, state, and comments exactly.
    ///
    /// Fails if the source is missing or the destination is occupied; the
    /// identity pass relies on renames never clobbering other sections.
    pub fn rename(&mut self, old_id: &str, new_id: &str) -> Result<()> {
        if old_id == new_id {
            return Ok(());
        }
        if self.contains(new_id) {
            return Err(Error::invalid_section(
                new_id,
                "rename destination already exists",
            ));
        }
        let section = self
            .remove(old_id)
            .ok_or_else(|| Error::invalid_section(old_id, "rename source does not exist"))?;
        self.insert(new_id, section);
        Ok(())
    }

    /// Section identifiers, in tree order
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Identifiers of all sections belonging to a family
    pub fn ids_in_family(&self, family: &str) -> Vec<String> {
        self.sections
            .keys()
            .filter(|id| split_section_id(id).0 == family)
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigSection)> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
