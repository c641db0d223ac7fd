//! Core networking abstractions shared across the workspace.
//!
//! Defines endpoint addresses and the transport-agnostic contract a node
//! needs from the router. Concrete transports live outside this workspace.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a network endpoint (a node or the router).
///
/// Opaque to this crate: it is compared, hashed and handed to transports,
/// never parsed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceAddr(String);

impl ServiceAddr {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceAddr {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

impl From<String> for ServiceAddr {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}

impl AsRef<str> for ServiceAddr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Client side of the router service.
///
/// Implementations own delivery: retries, timeouts and connection handling
/// are theirs. Callers treat the outcome as advisory.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one client is shared between the
/// node and its background heartbeat task.
#[async_trait]
pub trait RouterClient: Send + Sync + 'static {
    /// Announce that the node at `node` is alive to the router at `router`.
    async fn heartbeat(&self, router: &ServiceAddr, node: &ServiceAddr) -> anyhow::Result<()>;
}
