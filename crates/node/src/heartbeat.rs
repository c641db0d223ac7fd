//! Background heartbeat task.
//!
//! # Loop
//!
//! Each iteration:
//! 1. Check the stop signal; exit if it fired (or its sender is gone)
//! 2. Send one heartbeat through the router client, logging a failure
//! 3. Sleep for the configured interval, waking early on a stop signal
//!
//! The stop signal is checked before every send, not only after sleeping, so
//! a pending stop is always observed before the next heartbeat goes out.
//!
//! # Cancellation
//!
//! A `HeartbeatTask` pairs the spawned task with the sending half of a
//! one-shot channel. `stop` consumes the task, so a signal can only ever be
//! delivered to the one loop it was created for. Dropping the task without
//! calling `stop` closes the channel, which the loop treats as a stop too.

use crate::config::Config;
use crate::error::HeartbeatError;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Handle on one running heartbeat loop.
#[derive(Debug)]
pub(crate) struct HeartbeatTask {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl HeartbeatTask {
    /// Spawn the heartbeat loop on the given runtime.
    pub(crate) fn spawn(runtime: &Handle, config: Config) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        info!(
            addr = %config.addr(),
            router = %config.router(),
            interval_ms = config.heartbeat().as_millis() as u64,
            "starting heartbeats"
        );
        let handle = runtime.spawn(run(config, stop_rx));
        Self { stop_tx, handle }
    }

    /// Signal the loop and wait until it has exited.
    ///
    /// Once this returns no further heartbeat is sent by this task. A
    /// heartbeat already in flight is allowed to finish first.
    pub(crate) async fn stop(self) -> Result<(), HeartbeatError> {
        // An error here means the loop has already exited; the join below
        // reports how.
        let _ = self.stop_tx.send(());
        self.handle
            .await
            .map_err(|err| HeartbeatError::Aborted(err.to_string()))?;
        info!("heartbeats stopped");
        Ok(())
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn run(config: Config, mut stop_rx: oneshot::Receiver<()>) {
    loop {
        match stop_rx.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(()) | Err(TryRecvError::Closed) => break,
        }

        match config.client().heartbeat(config.router(), config.addr()).await {
            Ok(()) => debug!(router = %config.router(), "heartbeat sent"),
            Err(err) => warn!(router = %config.router(), error = %err, "heartbeat failed"),
        }

        tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            _ = tokio::time::sleep(config.heartbeat()) => {}
        }
    }
}
