//! Control surface of the engine's data updater.
//!
//! Scheduling, downloading and retrying all happen inside the engine; these
//! calls only configure and start or stop it.

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateFrequency {
    Daily,
    Weekly,
}

/// Engine API version from which the updater accepts a caller-supplied
/// User-Agent without losing the engine's own.
pub const UPDATER_USER_AGENT_MIN_API: &str = "1.13.0.0";

pub trait UpdaterControl {
    fn set_updater_user_agent(&self, user_agent: &str) -> Result<(), EngineError>;
    fn updater_user_agent(&self) -> String;
    fn set_updater_data_url(&self, url: &str) -> Result<(), EngineError>;
    fn set_updater_frequency(&self, frequency: UpdateFrequency) -> Result<(), EngineError>;
    /// Timeouts in milliseconds; `0` disables, `-1` keeps the engine default.
    fn set_updater_timeouts(&self, connection_ms: i32, transfer_ms: i32) -> Result<(), EngineError>;
    fn set_updater_log_path(&self, path: &str) -> Result<(), EngineError>;
    /// Updates the data file if needed, then returns.
    fn updater_run_once(&self) -> Result<(), EngineError>;
    /// Starts periodic background updates.
    fn updater_start(&self) -> Result<(), EngineError>;
    fn updater_stop(&self) -> Result<(), EngineError>;
}
