use clap::Parser;
use sobek_reader::cli::{args::Args, commands};
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
        Ok(_stats) => {
            // Success - the summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("SOBEK Inspect - legacy SOBEK ASCII model file inspector");
    println!("========================================================");
    println!();
    println!("Shows how the reader library splits SOBEK model files into records,");
    println!("extracts labeled fields and tokenizes embedded TBLE tables.");
    println!();
    println!("USAGE:");
    println!("    sobek-inspect <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    records     List the records of one or more files");
    println!("    field       Extract one labeled field from every record");
    println!("    table       Tokenize the embedded table of every record");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # List cross-section definitions:");
    println!("    sobek-inspect records 'model/*.def' --tag crds");
    println!();
    println!("    # Show the bottom width of every cross section:");
    println!("    sobek-inspect field model/profile.def --tag crds --label bw");
    println!();
    println!("    # Read the live controller table after a type switch:");
    println!(
        "    sobek-inspect table model/control.def --tag cntl --columns time:timestamp,value --occurrence 1"
    );
    println!();
    println!("For detailed help on any command, use:");
    println!("    sobek-inspect <COMMAND> --help");
}
