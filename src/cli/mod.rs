//! CLI module
//!
//! Command handlers and output utilities for the triyaj binary.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
