//! Router client used by the `run` command.
//!
//! No transport ships with this workspace, so announcements are written to
//! the log instead of the network.

use async_trait::async_trait;
use corelib::{RouterClient, ServiceAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct LogRouterClient {
    sent: AtomicU64,
}

impl LogRouterClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of heartbeats announced so far.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RouterClient for LogRouterClient {
    async fn heartbeat(&self, router: &ServiceAddr, node: &ServiceAddr) -> anyhow::Result<()> {
        let seq = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        info!(%router, %node, seq, "heartbeat");
        Ok(())
    }
}
