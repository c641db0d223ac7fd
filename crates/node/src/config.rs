//! Node configuration.
//!
//! `Settings` is the part that lives in a YAML file; `Config` adds the router
//! client handle, which is supplied by the embedding program and never
//! serialized.

use crate::error::ConfigError;
use corelib::{RouterClient, ServiceAddr};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Serializable node settings.
///
/// ```yaml
/// addr: 127.0.0.1:7001
/// router: 127.0.0.1:7000
/// heartbeat_ms: 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Address to listen at.
    pub addr: ServiceAddr,
    /// Address of the router service.
    pub router: ServiceAddr,
    /// Interval between two heartbeats, in milliseconds.
    #[serde(default = "default_heartbeat_ms")]
    pub heartbeat_ms: u64,
}

fn default_heartbeat_ms() -> u64 {
    1000
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    pub fn heartbeat(&self) -> Duration {
        Duration::from_millis(self.heartbeat_ms)
    }

    /// Attach a router client, producing the runtime configuration.
    pub fn into_config(self, client: Arc<dyn RouterClient>) -> Result<Config, ConfigError> {
        let heartbeat = self.heartbeat();
        Config::new(self.addr, self.router, heartbeat, client)
    }
}

/// Runtime configuration of a node. Immutable once the node is built.
///
/// Only [`Config::new`] builds one, so the heartbeat interval is always
/// positive.
#[derive(Clone)]
pub struct Config {
    addr: ServiceAddr,
    router: ServiceAddr,
    heartbeat: Duration,
    client: Arc<dyn RouterClient>,
}

impl Config {
    pub fn new(
        addr: impl Into<ServiceAddr>,
        router: impl Into<ServiceAddr>,
        heartbeat: Duration,
        client: Arc<dyn RouterClient>,
    ) -> Result<Self, ConfigError> {
        if heartbeat.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            addr: addr.into(),
            router: router.into(),
            heartbeat,
            client,
        })
    }

    /// Address to listen at.
    pub fn addr(&self) -> &ServiceAddr {
        &self.addr
    }

    /// Address of the router service.
    pub fn router(&self) -> &ServiceAddr {
        &self.router
    }

    /// Interval between two heartbeats.
    pub fn heartbeat(&self) -> Duration {
        self.heartbeat
    }

    pub fn client(&self) -> &Arc<dyn RouterClient> {
        &self.client
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("router", &self.router)
            .field("heartbeat", &self.heartbeat)
            .finish_non_exhaustive()
    }
}
