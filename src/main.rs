use clap::Parser;
use stash_requester::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("STASH Requester - CMIP Data Request Translator");
    println!("==============================================");
    println!();
    println!("Translate the CMIP data request spreadsheet into UM STASH output");
    println!("profile requests, and populate suite configurations with the result.");
    println!();
    println!("USAGE:");
    println!("    stash-requester <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Translate request sheets into output profile collections");
    println!("    populate    Populate a suite configuration tree with generated requests");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Translate a data request export:");
    println!("    stash-requester process --input ./sheets --stashmaster stashmaster.csv \\");
    println!("                            --cmor-mappings cmor_mappings.csv --output ./out");
    println!();
    println!("    # Populate a suite configuration with the generated requests:");
    println!("    stash-requester populate --config suite.json --profiles profiles.json \\");
    println!("                             --requests out/atmosphere_requests.json \\");
    println!("                             --stashmaster stashmaster.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    stash-requester <COMMAND> --help");
}
