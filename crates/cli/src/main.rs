//! Entry point for the dacpack command-line tool
//!
//! Converts PCM WAV files into `const uint16_t` C headers for firmware that
//! streams samples to a 12-bit SPI DAC.

mod args;
mod commands;
mod logging;
mod settings;

use args::Cli;
use clap::Parser;
use colored::Colorize;
use dacpack_core::DacPackError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(logging::level_for(cli.verbose, cli.quiet));

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn user_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<DacPackError>() {
        Some(err) => err.user_message(),
        None => format!("{error:#}"),
    }
}
