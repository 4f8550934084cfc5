//! Hardware wallet discovery for hwvault.
//!
//! This module provides:
//! - One-shot scans merging the connected device with the node's hardware accounts
//! - Atomic snapshot publication through a watch channel
//! - A cancellable background poll loop
//! - Labelling of hardware accounts on the node

pub mod config;
pub mod poller;
pub mod scanner;
pub mod snapshot;

pub use config::{ScannerConfig, HW_SCAN_INTERVAL};
pub use poller::PollHandle;
pub use scanner::{DeviceScanner, HardwareEntry, HARDWARE_TAG};
pub use snapshot::{ScanReport, ScanSnapshot};
