//! Populate command: apply generated requests to a suite configuration
//!
//! Loads the target tree snapshot, converts its streq sections from
//! climate meaning to STASH meaning, merges in the donor profile tree,
//! inserts every atmosphere request as a content-addressed streq section,
//! re-identifies the whole tree, and writes the result. The original tree
//! is kept next to the output with a `.default` suffix.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::app::models::DiagnosticRecord;
use crate::app::services::rose_config::stash_meaning::convert_to_stash_meaning;
use crate::app::services::rose_config::{ConfigTree, add_request, apply_reindex, merge_trees};
use crate::app::services::stash_registry::StashRegistry;
use crate::cli::args::PopulateArgs;
use crate::{Error, Result};

fn read_tree(path: &Path) -> Result<ConfigTree> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open tree snapshot {}", path.display()), e))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

fn write_tree(path: &Path, tree: &ConfigTree) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), tree)?;
    Ok(())
}

fn read_requests(path: &Path) -> Result<IndexMap<String, DiagnosticRecord>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open requests {}", path.display()), e))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

pub fn run_populate(args: &PopulateArgs) -> Result<()> {
    let registry = StashRegistry::from_csv_path(&args.stashmaster)?;
    let mut tree = read_tree(&args.config_path)?;
    let profiles = read_tree(&args.profiles_path)?;
    let requests = read_requests(&args.requests_path)?;

    // keep the original alongside the output before mutating anything
    let default_path = args.config_path.with_extension("default.json");
    write_tree(&default_path, &tree)?;
    info!(backup = %default_path.display(), "kept original tree");

    convert_to_stash_meaning(&mut tree, &registry);

    let messages = merge_trees(&mut tree, &profiles);
    info!(sections = messages.len(), "merged profile definitions");

    for (key, record) in &requests {
        let id = add_request(&mut tree, record)?;
        tracing::debug!(request = %key, section = %id, "inserted request");
    }

    let renames = apply_reindex(&mut tree)?;
    info!(
        requests = requests.len(),
        renames = renames.len(),
        "populated configuration tree"
    );

    let output_path = args.resolved_output();
    write_tree(&output_path, &tree)?;
    info!(output = %output_path.display(), "wrote populated tree");

    Ok(())
}
