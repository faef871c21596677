//! Run configuration
//!
//! Collects the paths and presentation options a translation run needs.
//! Defaults resolve relative to the working directory, with the lookup
//! files expected alongside the request sheets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for a request translation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory of sheet CSV files (one per workbook sheet)
    pub input_dir: PathBuf,

    /// Directory the five output collections are written to
    pub output_dir: PathBuf,

    /// CSV export of the STASHmaster (`section,item,name`)
    pub stashmaster_path: PathBuf,

    /// CSV file of curated cmor-to-STASH mappings (`cmor,stash`)
    pub cmor_mappings_path: PathBuf,

    /// Suppress progress bars and the console summary
    pub quiet: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data_request"),
            output_dir: default_output_dir(),
            stashmaster_path: PathBuf::from("stashmaster.csv"),
            cmor_mappings_path: PathBuf::from("cmor_mappings.csv"),
            quiet: false,
        }
    }
}

/// Default output directory, under the user's data directory when one
/// exists
fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("stash-requester").join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet input directory
    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the STASHmaster export path
    pub fn with_stashmaster(mut self, path: impl Into<PathBuf>) -> Self {
        self.stashmaster_path = path.into();
        self
    }

    /// Set the cmor mapping file path
    pub fn with_cmor_mappings(mut self, path: impl Into<PathBuf>) -> Self {
        self.cmor_mappings_path = path.into();
        self
    }

    /// Suppress progress output
    pub fn with_quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Check that every input path exists before the run starts
    pub fn validate(&self) -> Result<()> {
        for (label, path) in [
            ("input directory", &self.input_dir),
            ("STASHmaster export", &self.stashmaster_path),
            ("cmor mapping file", &self.cmor_mappings_path),
        ] {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "{label} does not exist: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = RunConfig::new()
            .with_input_dir("/tmp/sheets")
            .with_output_dir("/tmp/out")
            .with_quiet();

        assert_eq!(config.input_dir, PathBuf::from("/tmp/sheets"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.quiet);
    }

    #[test]
    fn test_validate_missing_input() {
        let config = RunConfig::new().with_input_dir("/definitely/not/here");
        assert!(config.validate().is_err());
    }
}
