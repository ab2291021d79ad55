//! Verify command: essential-file check on a merged model directory.

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::VerifyArgs;
use crate::merge::{verify_essential_files, ESSENTIAL_FILES};

pub fn run_verify(args: VerifyArgs, level: LogLevel) -> Result<(), String> {
    verify_essential_files(&args.model_dir).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "OK: {} contains all essential files",
            args.model_dir.display()
        ),
    );
    for name in ESSENTIAL_FILES {
        log(level, LogLevel::Verbose, &format!("  - {name}"));
    }
    Ok(())
}
