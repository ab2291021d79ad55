//! Package command: tar.gz a model directory.

use crate::archive::create_archive;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PackageArgs;

pub fn run_package(args: PackageArgs, level: LogLevel) -> Result<(), String> {
    create_archive(&args.model_dir, &args.output, &args.top_level)
        .map_err(|e| e.to_string())?;

    let size = std::fs::metadata(&args.output)
        .map(|m| m.len())
        .unwrap_or(0);
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Archive created: {} ({:.1} MB)",
            args.output.display(),
            size as f64 / (1024.0 * 1024.0)
        ),
    );
    Ok(())
}
