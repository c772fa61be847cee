use clap::{CommandFactory, Parser};
use csvparse::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help
    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(_stats) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
