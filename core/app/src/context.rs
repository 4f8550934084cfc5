//! Application context wiring the scanner and the vault store.

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use hwvault_hardware::{DeviceScanner, PollHandle};
use hwvault_node::{HardwareTransport, NodeApi};
use hwvault_vault::VaultStore;

use crate::config::AppConfig;

static SHARED: OnceCell<Arc<AppContext>> = OnceCell::new();

/// The one scanner and vault store of an application.
///
/// Construct it once at startup and hand it to every consumer.
pub struct AppContext {
    scanner: Arc<DeviceScanner>,
    vaults: Arc<VaultStore>,
    poll: Mutex<Option<PollHandle>>,
}

impl AppContext {
    /// Build the context, start polling and load the vault list in the background.
    ///
    /// Must be called within a tokio runtime.
    pub fn launch(
        config: AppConfig,
        node: Arc<dyn NodeApi>,
        transport: Arc<dyn HardwareTransport>,
    ) -> Self {
        let context = Self::build(config, node, transport);
        let vaults = context.vaults.clone();
        tokio::spawn(async move {
            vaults.load_vaults().await;
        });
        context
    }

    /// Build the context, start polling and wait for the first vault list.
    pub async fn start(
        config: AppConfig,
        node: Arc<dyn NodeApi>,
        transport: Arc<dyn HardwareTransport>,
    ) -> Self {
        let context = Self::build(config, node, transport);
        context.vaults.load_vaults().await;
        context
    }

    fn build(
        config: AppConfig,
        node: Arc<dyn NodeApi>,
        transport: Arc<dyn HardwareTransport>,
    ) -> Self {
        let vaults = Arc::new(VaultStore::new(node.clone()));
        let (scanner, handle) = DeviceScanner::start(node, transport, config.scanner);
        info!(
            "Application context started ({}ms scan interval)",
            scanner.config().interval_ms
        );
        Self {
            scanner,
            vaults,
            poll: Mutex::new(Some(handle)),
        }
    }

    /// Process-wide context, built by `init` on first use.
    ///
    /// Later callers get the same instance and their `init` is never run.
    pub fn shared<F>(init: F) -> Arc<AppContext>
    where
        F: FnOnce() -> AppContext,
    {
        SHARED.get_or_init(|| Arc::new(init())).clone()
    }

    /// Get the device scanner.
    pub fn scanner(&self) -> &Arc<DeviceScanner> {
        &self.scanner
    }

    /// Get the vault store.
    pub fn vaults(&self) -> &Arc<VaultStore> {
        &self.vaults
    }

    /// Stop the poll loop. Later calls do nothing.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.poll.lock().await.take() {
            handle.stop().await;
            info!("Application context shut down");
        }
    }
}
