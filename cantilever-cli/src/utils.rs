//! Logger setup

use std::path::{Path, PathBuf};

use ftlog::{appender::FileAppender, LevelFilter, LoggerGuard};

/// Per-substep events such as stiffness changes are logged at debug level,
/// so they only show up with `--verbose`.
pub fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Where a run logs to: `<dir>/logs/<file_name>`. A bare name gets a `.log`
/// extension so repeated runs with `-l run1` land next to each other.
pub fn log_path(dir: &Path, file_name: &str) -> Result<PathBuf, String> {
    let name = Path::new(file_name);
    if name.file_name().map(Path::new) != Some(name) {
        return Err(format!("Log name must be a plain file name: {file_name}"));
    }
    let mut path = dir.join("logs").join(name);
    if path.extension().is_none() {
        path.set_extension("log");
    }
    Ok(path)
}

/// Configures the logger to append to one file under `logs/` in the working
/// directory. Each viewer or headless session is short, so the file is not
/// rotated.
///
/// # Errors
///
/// - If the log name is not a plain file name.
/// - If the logs directory could not be created.
/// - If the logger could not be initialized.
pub fn configure_logger(
    file_name: &str,
    verbose: bool,
) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let log_path = log_path(&root_dir, file_name)?;
    if let Some(logs_dir) = log_path.parent() {
        std::fs::create_dir_all(logs_dir).map_err(|e| e.to_string())?;
    }

    let guard = ftlog::Builder::new()
        .max_log_level(log_level(verbose))
        .root(FileAppender::new(&log_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}
