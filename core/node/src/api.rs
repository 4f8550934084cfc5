//! Collaborator traits for the node API and the hardware transport.

use async_trait::async_trait;
use hwvault_common::{AccountMeta, Address, HardwareAccountInfo, Result, Secret, WalletRecord};

/// Remote node exposing the account and vault registry.
///
/// Calls are opaque RPCs; implementations own their transport, authentication
/// and rate limiting. Every method may fail with `Error::Api`.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Get the node name (e.g. "memory", "parity").
    fn name(&self) -> &str;

    /// Hardware accounts already known to the node, one pair per address, in
    /// the order the node reports them.
    async fn hardware_accounts_info(&self) -> Result<Vec<(Address, HardwareAccountInfo)>>;

    /// Set the human-readable name of an account.
    async fn set_account_name(&self, address: &Address, name: &str) -> Result<()>;

    /// Replace the metadata stored for an account.
    async fn set_account_meta(&self, address: &Address, meta: &AccountMeta) -> Result<()>;

    /// Names of all vaults, in node order.
    async fn list_vaults(&self) -> Result<Vec<String>>;

    /// Names of the currently opened vaults.
    async fn list_opened_vaults(&self) -> Result<Vec<String>>;

    /// Create a vault.
    ///
    /// # Errors
    /// - A vault with this name already exists
    async fn new_vault(&self, name: &str, password: &Secret) -> Result<()>;

    /// Open an existing vault.
    ///
    /// # Errors
    /// - Vault not found
    /// - Invalid password
    async fn open_vault(&self, name: &str, password: &Secret) -> Result<()>;

    /// Close an opened vault.
    async fn close_vault(&self, name: &str) -> Result<()>;
}

/// Local hardware wallet transport (USB/HID).
#[async_trait]
pub trait HardwareTransport: Send + Sync {
    /// Get the transport name (e.g. "ledger").
    fn name(&self) -> &str;

    /// Read the single wallet exposed by the connected device.
    ///
    /// # Errors
    /// - No device connected
    /// - Transport failure
    async fn scan(&self) -> Result<WalletRecord>;
}
