//! Published scanner state.

use hwvault_common::{Outcome, WalletEntry};

/// Immutable view of the scanner state.
///
/// Replaced as a whole on every transition, so `is_scanning` and `wallets`
/// always belong to the same scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSnapshot {
    /// A scan is in flight.
    pub is_scanning: bool,
    /// Device wallets followed by node wallets, as of the last completed scan.
    pub wallets: Vec<WalletEntry>,
    /// Number of completed scans; 0 until the first one settles.
    pub generation: u64,
}

impl ScanSnapshot {
    /// Check whether at least one scan has completed.
    pub fn has_scanned(&self) -> bool {
        self.generation > 0
    }
}

/// Result of one scan cycle.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Snapshot published at the end of the cycle.
    pub snapshot: ScanSnapshot,
    /// How the device fetch settled.
    pub device: Outcome,
    /// How the node fetch settled.
    pub node: Outcome,
}
