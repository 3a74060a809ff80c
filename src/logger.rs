//! Logger initialization for applications embedding the crate.
//!
//! The library itself only emits through the `log` facade; nothing is
//! printed unless the host application installs a logger, either its own or
//! the one configured here.

use log::{LevelFilter, SetLoggerError};

/// Installs an `env_logger` logger.
///
/// `RUST_LOG` is read first, then `level` is applied to this crate's own
/// module so the detector can be made verbose without turning on every
/// dependency.
///
/// # Errors
///
/// Fails if a global logger is already installed.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("hintnet", level);
    builder.format_timestamp_millis();
    builder.try_init()
}
