use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::store::TokenStore;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Background task that periodically purges expired download tokens.
pub struct TokenSweeper;

impl TokenSweeper {
    /// Start the sweeper on the current tokio runtime.
    ///
    /// The first sweep runs one full `every` after start. Returns a handle for
    /// graceful shutdown.
    pub fn start(store: Arc<TokenStore>, every: Duration) -> SweeperHandle {
        let every = every.max(MIN_SWEEP_INTERVAL);
        let cancel = CancellationToken::new();
        let child = cancel.child_token();

        let task = tokio::spawn(async move {
            let mut sweep_interval = interval(every);
            sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            sweep_interval.tick().await;

            tracing::info!(interval_ms = every.as_millis() as u64, "Token sweeper started");

            loop {
                tokio::select! {
                    _ = child.cancelled() => {
                        tracing::info!("Token sweeper shutting down");
                        break;
                    }
                    _ = sweep_interval.tick() => {
                        let purged = store.sweep();
                        tracing::debug!(purged, remaining = store.len(), "Token sweep completed");
                    }
                }
            }
        });

        SweeperHandle { cancel, task }
    }
}

/// Handle to a running [`TokenSweeper`].
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for the task to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Token sweeper task ended abnormally");
        }
    }
}
