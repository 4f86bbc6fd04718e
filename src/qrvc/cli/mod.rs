//! # CLI Layer
//!
//! This module is **one possible UI client** for qrvc. It is the only place
//! that:
//! - Parses arguments
//! - Prompts on the terminal
//! - Prints to stdout/stderr
//!
//! ## Flow
//!
//! 1. Parse flags with clap and resolve them into `AppSettings`. A bad flag
//!    ends the run before anything else is printed.
//! 2. `--bom` prints the bill of materials and stops.
//! 3. Otherwise print the intro, then load, edit (unless silent) and publish,
//!    printing each step's messages as it completes.
//! 4. Ctrl-C during editing prints a short notice and ends the run
//!    successfully without writing files. A failed step is reported here,
//!    then the farewell line follows and the process exits with status 1.
//!    A successful run ends with the farewell line only.
//!
//! Errors raised before the intro (bad flags) are left to `main`.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap, version string
//! - `print`: message output, silent handling
//! - `prompter`: `dialoguer` implementation of the editor's `Prompter`
//! - `styles`: terminal styling constants

mod print;
mod prompter;
pub mod setup;
mod styles;

use clap::Parser;
use print::PrintContext;
use prompter::TerminalPrompter;
use qrvc::api::{CmdMessage, QrvcApi};
use qrvc::config::AppSettings;
use qrvc::error::{QrvcError, Result};
use qrvc::store::fs::FileStore;
use setup::Cli;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_ENV: &str = "QRVC_LOG";

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = AppSettings::resolve(cli.raw_settings())?;
    let printer = PrintContext::new(settings.silent);
    let mut api = QrvcApi::new(FileStore::new(settings.files.clone()), settings);

    if cli.bom {
        let result = api.bom()?;
        if let Some(bom) = result.bom {
            println!("{}", bom);
        }
        return Ok(ExitCode::SUCCESS);
    }

    printer.print_intro();

    let mut prompter = TerminalPrompter::new();
    let outcome = api.run(&mut prompter, &mut |messages: &[CmdMessage]| {
        printer.print_messages(messages)
    });

    match outcome {
        Ok(_) => {
            printer.print_farewell();
            Ok(ExitCode::SUCCESS)
        }
        Err(QrvcError::Cancelled) => {
            prompter.restore();
            printer.print_cancelled();
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            printer.print_error(&err);
            printer.print_farewell();
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}
