//! # Yocto Setup CLI
//!
//! This is the binary entry point for the `yocto-setup` command-line tool.
//!
//! Its primary responsibilities are:
//! - Choosing the arguments: the real command line, or the tokens of
//!   `pyocto.cmd` when the tool is started without any.
//! - Parsing them with `clap` and executing the requested action.
//! - Reporting a failure as a single `-E-` line on stdout with exit code 1.
//!
//! The core logic lives in the `lib.rs` library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use std::env;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use yocto_setup::command_file::{resolve_args, COMMAND_FILE};
use yocto_setup::output::{Marker, OutputConfig};

fn main() -> ExitCode {
    let args = match resolve_args(env::args_os().collect(), Path::new(COMMAND_FILE)) {
        Ok(args) => args,
        Err(e) => {
            let output = OutputConfig::default();
            println!("{} Failed to read {}: {}", Marker::Error.render(&output), COMMAND_FILE, e);
            return ExitCode::FAILURE;
        }
    };

    let cli = cli::Cli::parse_from(args);
    let output = cli.output_config();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{} {:#}", Marker::Error.render(&output), e);
            ExitCode::FAILURE
        }
    }
}
