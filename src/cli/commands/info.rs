//! Info command: model directory listing with sizes.

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::InfoArgs;
use crate::merge::model_info;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let info = model_info(&args.model_dir).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "{}: {} file(s), {:.2} GB total",
            args.model_dir.display(),
            info.files.len(),
            info.total_size as f64 / GIB
        ),
    );
    for file in &info.files {
        log(
            level,
            LogLevel::Normal,
            &format!("  - {}: {:.1} MB", file.name, file.size as f64 / MIB),
        );
    }
    Ok(())
}
