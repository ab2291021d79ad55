//! CLI command implementations

mod extract;
mod info;
mod package;
mod prepare;
mod publish;
mod verify;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Prepare(args) => prepare::run_prepare(args, log_level),
        Command::Verify(args) => verify::run_verify(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Package(args) => package::run_package(args, log_level),
        Command::Extract(args) => extract::run_extract(args, log_level),
        Command::Publish(args) => publish::run_publish(args, log_level),
    }
}
