//! Logger initialisation.
//!
//! The terminal belongs to the interface while the game runs, so log records are written to a file
//! instead of the standard error stream.

use std::{fs::File, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};
use env_logger::{Builder, Env, Target};

/// Installs the global logger, writing to the file at `path`.
///
/// The filter defaults to `info` and can be overridden through the `RUST_LOG` environment
/// variable. When no path is given no logger is installed, and every record is discarded.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global logger was already installed
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("failed to install the logger")
}
