//! The storage node service.

use crate::config::Config;
use crate::error::HeartbeatError;
use crate::heartbeat::HeartbeatTask;
use crate::table::Table;
use bytes::Bytes;
use corelib::{RecordId, Result, ServiceAddr};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::warn;

/// A storage node: one in-memory shard plus a heartbeat to the router.
///
/// Record operations are synchronous and safe to call from any number of
/// threads. The heartbeat runs on the tokio runtime that was current when
/// [`Node::heartbeats`] was called.
#[derive(Debug)]
pub struct Node {
    cfg: Config,
    table: Table,
    heartbeat: Mutex<Slot>,
}

/// Lifecycle state of the heartbeat task.
#[derive(Debug)]
enum Slot {
    Idle,
    Running(HeartbeatTask),
    /// A stop signal was sent and the loop has not exited yet.
    Stopping,
}

/// Returns the slot to `Idle` once a stop completes or is abandoned.
struct IdleOnDrop<'a>(&'a Mutex<Slot>);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        *self.0.lock() = Slot::Idle;
    }
}

impl Node {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            table: Table::new(),
            heartbeat: Mutex::new(Slot::Idle),
        }
    }

    pub fn addr(&self) -> &ServiceAddr {
        self.cfg.addr()
    }

    pub fn router(&self) -> &ServiceAddr {
        self.cfg.router()
    }

    pub fn heartbeat_interval(&self) -> Duration {
        self.cfg.heartbeat()
    }

    /// Start sending heartbeats to the router every configured interval.
    ///
    /// At most one heartbeat task runs per node: a second call before
    /// [`Node::stop`] returns `HeartbeatError::AlreadyRunning` and leaves the
    /// running task alone. While a stop is still waiting for the previous
    /// task to exit, this returns `HeartbeatError::Stopping`.
    pub fn heartbeats(&self) -> std::result::Result<(), HeartbeatError> {
        let runtime = Handle::try_current().map_err(|_| HeartbeatError::NoRuntime)?;
        let mut slot = self.heartbeat.lock();
        match &*slot {
            Slot::Running(task) if !task.is_finished() => {
                return Err(HeartbeatError::AlreadyRunning)
            }
            Slot::Running(task) => {
                // The client panicked or the runtime cancelled the task.
                warn!(addr = %self.cfg.addr(), task = ?task, "replacing dead heartbeat task");
            }
            Slot::Stopping => return Err(HeartbeatError::Stopping),
            Slot::Idle => {}
        }
        *slot = Slot::Running(HeartbeatTask::spawn(&runtime, self.cfg.clone()));
        Ok(())
    }

    /// Stop the heartbeat task and wait for it to exit.
    ///
    /// Returns `HeartbeatError::NotRunning` if no task was started, and
    /// `HeartbeatError::Stopping` if another stop is already waiting.
    pub async fn stop(&self) -> std::result::Result<(), HeartbeatError> {
        let task = {
            let mut slot = self.heartbeat.lock();
            match std::mem::replace(&mut *slot, Slot::Stopping) {
                Slot::Running(task) => task,
                Slot::Stopping => return Err(HeartbeatError::Stopping),
                Slot::Idle => {
                    *slot = Slot::Idle;
                    return Err(HeartbeatError::NotRunning);
                }
            }
        };

        // The lock is not held across the await. The slot reads `Stopping`
        // until the old loop has exited, then `Idle` again (also when this
        // future is dropped before completing).
        let _idle = IdleOnDrop(&self.heartbeat);
        task.stop().await
    }

    pub fn is_heartbeating(&self) -> bool {
        matches!(&*self.heartbeat.lock(), Slot::Running(task) if !task.is_finished())
    }

    /// Put a record if none exists for `key`.
    ///
    /// Returns `StorageError::RecordExists` otherwise.
    pub fn put(&self, key: RecordId, payload: impl Into<Bytes>) -> Result<()> {
        self.table.put(key, payload.into())
    }

    /// Get the record stored for `key`.
    ///
    /// Returns `StorageError::RecordNotFound` if there is none.
    pub fn get(&self, key: &RecordId) -> Result<Bytes> {
        self.table.get(key)
    }

    /// Delete the record stored for `key`.
    ///
    /// Returns `StorageError::RecordNotFound` if there is none.
    pub fn del(&self, key: &RecordId) -> Result<()> {
        self.table.delete(key)
    }

    /// Number of records held by this node.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use corelib::{RouterClient, StorageError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct NoopClient;

    #[async_trait]
    impl RouterClient for NoopClient {
        async fn heartbeat(&self, _: &ServiceAddr, _: &ServiceAddr) -> anyhow::Result<()> {
            Ok(())
        }
    }

    /// Panics on the first `panics` deliveries, succeeds afterwards.
    struct PanickingClient {
        panics: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RouterClient for PanickingClient {
        async fn heartbeat(&self, _: &ServiceAddr, _: &ServiceAddr) -> anyhow::Result<()> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.panics {
                panic!("router client bug");
            }
            Ok(())
        }
    }

    fn panicking_node(panics: usize) -> (Node, Arc<PanickingClient>) {
        let client = Arc::new(PanickingClient {
            panics,
            calls: AtomicUsize::new(0),
        });
        let cfg = Config::new("node", "router", Duration::from_millis(50), client.clone()).unwrap();
        (Node::new(cfg), client)
    }

    fn node() -> Node {
        let cfg = Config::new(
            "127.0.0.1:7001",
            "127.0.0.1:7000",
            Duration::from_millis(50),
            Arc::new(NoopClient),
        )
        .unwrap();
        Node::new(cfg)
    }

    #[test]
    fn test_accessors() {
        let node = node();
        assert_eq!(node.addr().as_str(), "127.0.0.1:7001");
        assert_eq!(node.router().as_str(), "127.0.0.1:7000");
        assert_eq!(node.heartbeat_interval(), Duration::from_millis(50));
        assert!(node.is_empty());
        assert!(!node.is_heartbeating());
    }

    #[test]
    fn test_crud() {
        let node = node();
        node.put("a".into(), &b"alpha"[..]).unwrap();
        node.put("b".into(), Vec::<u8>::new()).unwrap();
        assert_eq!(node.len(), 2);

        assert_eq!(node.get(&"a".into()).unwrap(), Bytes::from_static(b"alpha"));
        assert_eq!(node.get(&"b".into()).unwrap(), Bytes::new());
        assert_eq!(node.put("a".into(), "other"), Err(StorageError::RecordExists));

        node.del(&"a".into()).unwrap();
        assert_eq!(node.get(&"a".into()), Err(StorageError::RecordNotFound));
        assert_eq!(node.del(&"a".into()), Err(StorageError::RecordNotFound));
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_heartbeats_outside_runtime() {
        let node = node();
        assert!(matches!(node.heartbeats(), Err(HeartbeatError::NoRuntime)));
        assert!(!node.is_heartbeating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_rejected() {
        let node = node();
        node.heartbeats().unwrap();
        assert!(matches!(node.heartbeats(), Err(HeartbeatError::AlreadyRunning)));
        assert!(node.is_heartbeating());

        node.stop().await.unwrap();
        assert!(!node.is_heartbeating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_without_start() {
        let node = node();
        assert!(matches!(node.stop().await, Err(HeartbeatError::NotRunning)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let node = node();
        node.heartbeats().unwrap();
        node.stop().await.unwrap();
        assert!(matches!(node.stop().await, Err(HeartbeatError::NotRunning)));

        node.heartbeats().unwrap();
        assert!(node.is_heartbeating());
        node.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_dead_task_is_replaced() {
        let (node, client) = panicking_node(1);
        node.heartbeats().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!node.is_heartbeating());

        node.heartbeats().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(node.is_heartbeating());
        node.stop().await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_reports_dead_task() {
        let (node, _client) = panicking_node(usize::MAX);
        node.heartbeats().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(matches!(node.stop().await, Err(HeartbeatError::Aborted(_))));
        assert!(matches!(node.stop().await, Err(HeartbeatError::NotRunning)));
        node.heartbeats().unwrap();
    }
}
