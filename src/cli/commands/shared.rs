//! Shared helpers for the CLI commands

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app::models::RequestCollections;
use crate::app::services::deduplicator::DeduplicationOutcome;

/// Initialise tracing with the standard env-filter setup.
///
/// `RUST_LOG` overrides the default level; quiet runs only surface
/// warnings.
pub fn setup_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// A progress bar for the deduplication pass, or none in quiet mode
pub fn create_progress_bar(quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(message);
    Some(bar)
}

/// Print the end-of-run summary of the five collections
pub fn print_summary(collections: &RequestCollections, outcome: &DeduplicationOutcome) {
    println!();
    println!("{}", "Request translation summary".bold());
    println!("{}", "===========================".bold());
    println!(
        "  {:<22} {}",
        "atmosphere requests:",
        collections.atmosphere.len().to_string().green()
    );
    println!(
        "  {:<22} {}",
        "duplicates removed:",
        outcome.duplicates.to_string().yellow()
    );
    println!(
        "  {:<22} {}",
        "undefined:",
        collections.undefined.len().to_string().yellow()
    );
    println!(
        "  {:<22} {}",
        "not wanted:",
        collections.not_wanted.len().to_string().yellow()
    );
    println!(
        "  {:<22} {}",
        "ocean/sea-ice:",
        collections.ocean_seaice.len().to_string().cyan()
    );

    let streams = collections.stream_counts();
    if !streams.is_empty() {
        println!();
        println!("{}", "Requests per output stream".bold());
        for (stream, count) in streams {
            println!("  {stream:<8} {count}");
        }
    }
}
