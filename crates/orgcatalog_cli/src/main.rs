//! `orgcatalog` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and hand them to command dispatch.
//! - Report failures on stderr with a non-zero exit code.

mod args;
mod commands;
mod seed;

use clap::Parser;

use crate::args::Cli;
use crate::commands::execute_command;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = execute_command(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
