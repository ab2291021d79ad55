//! Extract command: list archive members, then unpack.

use crate::archive::extract_archive;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::ExtractArgs;

pub fn run_extract(args: ExtractArgs, level: LogLevel) -> Result<(), String> {
    let entries = extract_archive(&args.archive, &args.dest).map_err(|e| e.to_string())?;

    log(level, LogLevel::Normal, "Archive contents:");
    for entry in &entries {
        log(level, LogLevel::Normal, &format!("- {}", entry.name));
    }
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Extracted {} member(s) into {}",
            entries.len(),
            args.dest.display()
        ),
    );
    Ok(())
}
