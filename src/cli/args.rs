//! Command-line argument definitions for the STASH requester
//!
//! This module defines the CLI interface using the clap derive API. The
//! `process` command runs the translation pipeline; the `populate` command
//! applies its output to a suite configuration tree.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::RunConfig;

/// CLI arguments for the STASH requester
///
/// Translates the CMIP data request (exported as per-sheet CSV files) into
/// UM STASH output profile requests, and populates suite configuration
/// trees with the result.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stash-requester",
    version,
    about = "Translate the CMIP data request into UM STASH output profile requests",
    long_about = "Translates the CMIP data request spreadsheet (exported as per-sheet CSV \
                  files) into UM STASH output profile requests: classifies dimensions into \
                  domain profiles, derives time and usage profiles, applies dependency \
                  corrections, removes exact duplicates, and can populate a suite \
                  configuration tree with the generated requests."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Translate request sheets into the five output collections
    Process(ProcessArgs),
    /// Populate a suite configuration tree with generated requests
    Populate(PopulateArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Directory of sheet CSV files, one per workbook sheet
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Directory of data request sheet CSV files"
    )]
    pub input_dir: PathBuf,

    /// Output directory for the five JSON collections
    ///
    /// Will be created if it doesn't exist. If not specified, defaults to
    /// a stash-requester directory under the user data directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for the request collections"
    )]
    pub output_dir: Option<PathBuf>,

    /// CSV export of the STASHmaster file (section,item,name)
    #[arg(
        short = 'm',
        long = "stashmaster",
        value_name = "PATH",
        help = "CSV export of the STASHmaster file"
    )]
    pub stashmaster: PathBuf,

    /// Curated cmor-to-STASH mapping file (cmor,stash)
    #[arg(
        short = 'c',
        long = "cmor-mappings",
        value_name = "PATH",
        help = "CSV file of curated cmor-to-STASH mappings"
    )]
    pub cmor_mappings: PathBuf,

    /// Suppress progress bars and the console summary
    #[arg(short = 'q', long = "quiet", help = "Suppress progress output")]
    pub quiet: bool,
}

impl ProcessArgs {
    /// Resolve the arguments into a validated run configuration
    pub fn to_config(&self) -> crate::Result<RunConfig> {
        let mut config = RunConfig::new()
            .with_input_dir(&self.input_dir)
            .with_stashmaster(&self.stashmaster)
            .with_cmor_mappings(&self.cmor_mappings);
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if self.quiet {
            config = config.with_quiet();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the populate command
#[derive(Debug, Clone, Parser)]
pub struct PopulateArgs {
    /// Target suite configuration tree snapshot (JSON)
    #[arg(
        long = "config",
        value_name = "PATH",
        help = "Target configuration tree snapshot"
    )]
    pub config_path: PathBuf,

    /// Donor tree of domain/time/usage profile definitions (JSON)
    #[arg(
        long = "profiles",
        value_name = "PATH",
        help = "Donor tree of profile definitions"
    )]
    pub profiles_path: PathBuf,

    /// Atmosphere request collection produced by the process command
    #[arg(
        long = "requests",
        value_name = "PATH",
        help = "Atmosphere request collection (JSON)"
    )]
    pub requests_path: PathBuf,

    /// CSV export of the STASHmaster file (section,item,name)
    #[arg(
        short = 'm',
        long = "stashmaster",
        value_name = "PATH",
        help = "CSV export of the STASHmaster file"
    )]
    pub stashmaster: PathBuf,

    /// Where to write the populated tree; defaults to the target path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output path for the populated tree"
    )]
    pub output_path: Option<PathBuf>,
}

impl PopulateArgs {
    /// Output path, defaulting to in-place update of the target tree
    pub fn resolved_output(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.config_path.clone())
    }
}
