//! Process command: request sheets in, five collections out
//!
//! Orchestrates the whole translation pipeline:
//! 1. Load the STASH registry and cmor mappings
//! 2. Read every sheet, in file-name order
//! 3. Assemble requests sheet by sheet (classifier + corrector)
//! 4. Deduplicate the primary collection
//! 5. Write the five output collections and print the summary
//!
//! Every step before writing can abort the run; nothing is written until
//! all sheets have been processed, so a fatal error leaves no partial
//! output.

use tracing::info;

use crate::Result;
use crate::app::models::RequestCollections;
use crate::app::services::assembler::Assembler;
use crate::app::services::cmor_lookup::CmorStashLookup;
use crate::app::services::deduplicator;
use crate::app::services::report_writer;
use crate::app::services::row_reader;
use crate::app::services::stash_registry::StashRegistry;
use crate::cli::args::ProcessArgs;

use super::shared::{create_progress_bar, print_summary};

pub fn run_process(args: &ProcessArgs) -> Result<()> {
    let config = args.to_config()?;
    info!(input = %config.input_dir.display(), "starting request translation");

    let registry = StashRegistry::from_csv_path(&config.stashmaster_path)?;
    let cmor_lookup = CmorStashLookup::from_csv_path(&config.cmor_mappings_path)?;
    let sheets = row_reader::read_sheet_dir(&config.input_dir)?;

    let assembler = Assembler::new(&registry, &cmor_lookup);
    let mut collections = RequestCollections::new();
    for sheet in &sheets {
        assembler.assemble_sheet(sheet, &mut collections)?;
    }
    info!(
        assembled = collections.atmosphere.len(),
        undefined = collections.undefined.len(),
        not_wanted = collections.not_wanted.len(),
        ocean_seaice = collections.ocean_seaice.len(),
        "assembled request collections"
    );

    let progress = create_progress_bar(config.quiet, "deduplicating");
    let outcome = deduplicator::deduplicate(&mut collections, progress.as_ref());
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let paths = report_writer::write_collections(&config.output_dir, &collections)?;
    for path in &paths {
        info!(file = %path.display(), "wrote collection");
    }

    if !config.quiet {
        print_summary(&collections, &outcome);
    }

    Ok(())
}
