//! Common utilities and types shared across hwvault modules.
//!
//! This module provides the error type, the degradable `Outcome` and the wallet
//! and account records exchanged between the scanner, the vault store and their
//! collaborators.

pub mod error;
pub mod types;

pub use error::{Error, FormError, Outcome, Result};
pub use types::{
    AccountMeta, Address, HardwareAccountInfo, HardwareMeta, Secret, WalletEntry, WalletRecord,
    WalletSource,
};
