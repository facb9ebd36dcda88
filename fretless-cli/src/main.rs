//! # Fretless - text fretboards for string instruments
//!
//! Entry point of the `fretless` binary.
//!
//! ## Logging
//! Logs go to stderr through `env_logger`. The default level is `warn`;
//! `--verbose` raises it to `debug`, which traces every step of the
//! fretboard sweep. `RUST_LOG` overrides both.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use fretless_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match fretless_cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::FAILURE
        }
    }
}
