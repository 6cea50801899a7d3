//! # whisker CLI
//!
//! Command-line interface for the Whisker cat fact store.
//!
//! This binary provides human-friendly access to `whisker-core` functionality.
//! Run `whisker --help` for usage information.

mod cli;
pub mod ui;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
