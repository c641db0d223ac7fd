//! Error types for the node service.
//!
//! Record operations report `corelib::StorageError`; the types here cover the
//! heartbeat lifecycle and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Misuse of the heartbeat lifecycle, or a task that died.
#[derive(Debug, Error)]
pub enum HeartbeatError {
    /// `heartbeats` was called while a heartbeat task is running.
    #[error("heartbeat task is already running")]
    AlreadyRunning,
    /// `stop` was called with no heartbeat task running.
    #[error("heartbeat task is not running")]
    NotRunning,
    /// A `stop` is still waiting for the previous task to exit.
    #[error("heartbeat task is stopping")]
    Stopping,
    /// `heartbeats` was called outside a tokio runtime.
    #[error("heartbeat task requires a tokio runtime")]
    NoRuntime,
    /// The task ended abnormally (panicked or was cancelled by the runtime).
    #[error("heartbeat task aborted: {0}")]
    Aborted(String),
}

/// Failure to build a node configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("heartbeat interval must be positive")]
    ZeroInterval,
}
