//! Command implementations for the STASH requester CLI
//!
//! Each command lives in its own module; this module dispatches on the
//! parsed arguments and re-exports the shared helpers.

pub mod populate;
pub mod process;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler:
/// - `process`: translate request sheets into the five output collections
/// - `populate`: apply generated requests to a suite configuration tree
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => {
            shared::setup_logging(process_args.quiet);
            process::run_process(&process_args)
        }
        Some(Commands::Populate(populate_args)) => {
            shared::setup_logging(false);
            populate::run_populate(&populate_args)
        }
        None => unreachable!("main shows help when no command is given"),
    }
}
