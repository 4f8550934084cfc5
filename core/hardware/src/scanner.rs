//! Hardware wallet discovery across the local device and the node.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use hwvault_common::{
    AccountMeta, Address, Error, HardwareMeta, Outcome, Result, WalletEntry,
};
use hwvault_node::{HardwareTransport, NodeApi};

use crate::config::ScannerConfig;
use crate::poller::{self, PollHandle};
use crate::snapshot::{ScanReport, ScanSnapshot};

/// Tag stored on every account labelled through the scanner.
pub const HARDWARE_TAG: &str = "hardware";

/// Label for a discovered hardware wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareEntry {
    pub address: Address,
    pub name: String,
    pub description: String,
    /// Device family, stored as `hardware.type` in the account metadata.
    pub hardware_type: String,
}

impl HardwareEntry {
    /// Metadata written to the node for this entry.
    pub fn to_meta(&self, timestamp: i64) -> AccountMeta {
        AccountMeta {
            deleted: false,
            description: self.description.clone(),
            hardware: HardwareMeta {
                kind: self.hardware_type.clone(),
            },
            name: self.name.clone(),
            tags: vec![HARDWARE_TAG.to_string()],
            timestamp,
        }
    }
}

/// Polls the hardware transport and the node and publishes the merged wallets.
pub struct DeviceScanner {
    node: Arc<dyn NodeApi>,
    transport: Arc<dyn HardwareTransport>,
    config: ScannerConfig,
    state: watch::Sender<ScanSnapshot>,
    scan_lock: Mutex<()>,
}

impl DeviceScanner {
    /// Create an idle scanner. No polling happens until `start_polling`.
    pub fn new(
        node: Arc<dyn NodeApi>,
        transport: Arc<dyn HardwareTransport>,
        config: ScannerConfig,
    ) -> Self {
        let (state, _) = watch::channel(ScanSnapshot::default());
        Self {
            node,
            transport,
            config,
            state,
            scan_lock: Mutex::new(()),
        }
    }

    /// Create a scanner and start its poll loop right away.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(
        node: Arc<dyn NodeApi>,
        transport: Arc<dyn HardwareTransport>,
        config: ScannerConfig,
    ) -> (Arc<Self>, PollHandle) {
        let scanner = Arc::new(Self::new(node, transport, config));
        let handle = scanner.start_polling();
        (scanner, handle)
    }

    /// Spawn the poll loop for this scanner.
    pub fn start_polling(self: &Arc<Self>) -> PollHandle {
        poller::spawn(self.clone(), self.config.interval())
    }

    /// Get the scanner configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ScanSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<ScanSnapshot> {
        self.state.subscribe()
    }

    /// Run one scan cycle.
    ///
    /// Never fails: a source that errors out contributes no wallets. The
    /// returned report carries the published snapshot and how each source
    /// settled.
    ///
    /// Scans are serialized: a call made while another scan is in flight
    /// (from the poll loop or another caller) waits for it to publish first.
    pub async fn scan(&self) -> ScanReport {
        let _running = self.scan_lock.lock().await;
        self.state.send_modify(|snapshot| snapshot.is_scanning = true);

        let ((device_wallets, device), (node_wallets, node)) =
            futures::join!(self.scan_device(), self.scan_node());

        let mut wallets = device_wallets;
        wallets.extend(node_wallets);

        let mut published = ScanSnapshot::default();
        self.state.send_modify(|snapshot| {
            *snapshot = ScanSnapshot {
                is_scanning: false,
                wallets,
                generation: snapshot.generation + 1,
            };
            published = snapshot.clone();
        });

        debug!(
            "Scan {} completed: {} wallets (device: {:?}, node: {:?})",
            published.generation,
            published.wallets.len(),
            device,
            node
        );

        ScanReport {
            snapshot: published,
            device,
            node,
        }
    }

    async fn scan_device(&self) -> (Vec<WalletEntry>, Outcome) {
        match bounded(self.config.fetch_timeout(), "device scan", self.transport.scan()).await {
            Ok(record) => {
                debug!("scan_device found {}", record.address);
                (vec![WalletEntry::from_device(record)], Outcome::Completed)
            }
            Err(e) => {
                warn!("scan_device failed on {}: {}", self.transport.name(), e);
                (Vec::new(), Outcome::degraded(e))
            }
        }
    }

    async fn scan_node(&self) -> (Vec<WalletEntry>, Outcome) {
        match bounded(
            self.config.fetch_timeout(),
            "hardware accounts info",
            self.node.hardware_accounts_info(),
        )
        .await
        {
            Ok(accounts) => {
                debug!("scan_node found {} accounts", accounts.len());
                let wallets = accounts
                    .into_iter()
                    .map(|(address, info)| WalletEntry::from_node(address, info))
                    .collect();
                (wallets, Outcome::Completed)
            }
            Err(e) => {
                warn!("scan_node failed on {}: {}", self.node.name(), e);
                (Vec::new(), Outcome::degraded(e))
            }
        }
    }

    /// Label a hardware account on the node.
    ///
    /// Sets the account name and its hardware metadata. Both calls are issued
    /// together; if either fails the error is returned.
    pub async fn create_entry(&self, entry: &HardwareEntry) -> Result<()> {
        let meta = entry.to_meta(chrono::Utc::now().timestamp_millis());

        let (name_result, meta_result) = futures::join!(
            self.node.set_account_name(&entry.address, &entry.name),
            self.node.set_account_meta(&entry.address, &meta)
        );

        if let Err(e) = name_result.and(meta_result) {
            warn!("create_entry failed for {}: {}", entry.address, e);
            return Err(e);
        }

        debug!("create_entry labelled {} as '{}'", entry.address, entry.name);
        Ok(())
    }
}

/// Await `fut`, failing with `Error::Timeout` once `limit` elapses.
async fn bounded<T>(
    limit: Option<Duration>,
    what: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| Error::Timeout(format!("{} after {}ms", what, limit.as_millis())))?,
        None => fut.await,
    }
}
