//! Subcommand implementations

mod convert;
mod info;

use crate::args::{Cli, Command};
use anyhow::Result;

/// Dispatch the parsed command line
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Convert(args) => convert::run(args, cli.config.as_deref()),
        Command::Info(args) => info::run(args),
    }
}
