//! Background poll loop for the device scanner.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::scanner::DeviceScanner;

/// Handle for a running poll loop.
///
/// Dropping the handle detaches the loop; it then runs until the runtime
/// shuts down.
pub struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Ask the loop to stop. An in-flight scan still runs to completion.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check whether the loop task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    ///
    /// A loop that panicked or was aborted is logged, not propagated.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!("Hardware scan loop ended abnormally: {}", e);
        }
    }
}

/// Spawn the poll loop.
///
/// Each cycle waits `interval` and then scans; the wait for the next cycle
/// starts only once the scan has settled, so at most one scan is in flight.
pub(crate) fn spawn(scanner: Arc<DeviceScanner>, interval: Duration) -> PollHandle {
    let token = CancellationToken::new();
    let task = tokio::spawn(run(scanner, interval, token.clone()));
    PollHandle { token, task }
}

async fn run(scanner: Arc<DeviceScanner>, interval: Duration, token: CancellationToken) {
    info!("Hardware scan loop started ({}ms interval)", interval.as_millis());

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }

        let report = scanner.scan().await;
        debug!(
            "Poll cycle {} settled with {} wallets",
            report.snapshot.generation,
            report.snapshot.wallets.len()
        );

        if token.is_cancelled() {
            break;
        }
    }

    info!("Hardware scan loop stopped");
}
