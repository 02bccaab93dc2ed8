//! # Caja Entry Point
//!
//! The setup lives in lib.rs for testability; this only maps the outcome to
//! an exit code.

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let args = caja_cli::Args::parse();

    match caja_cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
