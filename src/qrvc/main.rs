//! # qrvc CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination. See the library
//! documentation for the layering.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
