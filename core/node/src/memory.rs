//! In-memory node and device for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use hwvault_common::{
    AccountMeta, Address, Error, HardwareAccountInfo, Result, Secret, WalletRecord,
};

use crate::api::{HardwareTransport, NodeApi};

/// Node API methods, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCall {
    HardwareAccountsInfo,
    SetAccountName,
    SetAccountMeta,
    ListVaults,
    ListOpenedVaults,
    NewVault,
    OpenVault,
    CloseVault,
}

#[derive(Default)]
struct NodeState {
    hardware_accounts: Vec<(Address, HardwareAccountInfo)>,
    account_names: HashMap<Address, String>,
    account_meta: HashMap<Address, AccountMeta>,
    vaults: Vec<String>,
    opened: Vec<String>,
    passwords: HashMap<String, Secret>,
    failing: HashSet<NodeCall>,
    calls: HashMap<NodeCall, usize>,
    latency: Option<Duration>,
}

/// In-memory node.
///
/// Useful for testing and development. Cloning shares the same state, so a test
/// can keep a handle to inspect calls made through an `Arc<dyn NodeApi>`.
#[derive(Clone, Default)]
pub struct MemoryNode {
    state: Arc<Mutex<NodeState>>,
}

impl MemoryNode {
    /// Create a new empty node.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a hardware account on the node side.
    ///
    /// Accounts are reported in registration order; re-registering an address
    /// replaces its info in place.
    pub fn add_hardware_account(&self, address: Address, info: HardwareAccountInfo) {
        let mut state = self.state();
        match state
            .hardware_accounts
            .iter_mut()
            .find(|(known, _)| *known == address)
        {
            Some((_, existing)) => *existing = info,
            None => state.hardware_accounts.push((address, info)),
        }
    }

    /// Seed a vault, optionally opened.
    pub fn add_vault(&self, name: impl Into<String>, password: impl Into<String>, open: bool) {
        let name = name.into();
        let mut state = self.state();
        state.passwords.insert(name.clone(), Secret::new(password));
        if open {
            state.opened.push(name.clone());
        }
        state.vaults.push(name);
    }

    /// Make every call of `call` fail until cleared.
    pub fn fail(&self, call: NodeCall) {
        self.state().failing.insert(call);
    }

    /// Stop failing `call`.
    pub fn recover(&self, call: NodeCall) {
        self.state().failing.remove(&call);
    }

    /// Delay every call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = Some(latency);
    }

    /// Number of times `call` was invoked.
    pub fn calls(&self, call: NodeCall) -> usize {
        self.state().calls.get(&call).copied().unwrap_or(0)
    }

    /// Name stored for an account.
    pub fn account_name(&self, address: &Address) -> Option<String> {
        self.state().account_names.get(address).cloned()
    }

    /// Metadata stored for an account.
    pub fn account_meta(&self, address: &Address) -> Option<AccountMeta> {
        self.state().account_meta.get(address).cloned()
    }

    /// Record the call, apply latency and injected failures.
    async fn enter(&self, call: NodeCall) -> Result<()> {
        let (latency, failing) = {
            let mut state = self.state();
            *state.calls.entry(call).or_insert(0) += 1;
            (state.latency, state.failing.contains(&call))
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if failing {
            return Err(Error::Api(format!("{:?} unavailable", call)));
        }
        Ok(())
    }
}

#[async_trait]
impl NodeApi for MemoryNode {
    fn name(&self) -> &str {
        "memory"
    }

    async fn hardware_accounts_info(&self) -> Result<Vec<(Address, HardwareAccountInfo)>> {
        self.enter(NodeCall::HardwareAccountsInfo).await?;
        Ok(self.state().hardware_accounts.clone())
    }

    async fn set_account_name(&self, address: &Address, name: &str) -> Result<()> {
        self.enter(NodeCall::SetAccountName).await?;
        self.state()
            .account_names
            .insert(address.clone(), name.to_string());
        Ok(())
    }

    async fn set_account_meta(&self, address: &Address, meta: &AccountMeta) -> Result<()> {
        self.enter(NodeCall::SetAccountMeta).await?;
        self.state()
            .account_meta
            .insert(address.clone(), meta.clone());
        Ok(())
    }

    async fn list_vaults(&self) -> Result<Vec<String>> {
        self.enter(NodeCall::ListVaults).await?;
        Ok(self.state().vaults.clone())
    }

    async fn list_opened_vaults(&self) -> Result<Vec<String>> {
        self.enter(NodeCall::ListOpenedVaults).await?;
        Ok(self.state().opened.clone())
    }

    async fn new_vault(&self, name: &str, password: &Secret) -> Result<()> {
        self.enter(NodeCall::NewVault).await?;
        let mut state = self.state();
        if state.vaults.iter().any(|v| v == name) {
            return Err(Error::AlreadyExists(format!("Vault '{}'", name)));
        }
        state.vaults.push(name.to_string());
        state.opened.push(name.to_string());
        state.passwords.insert(name.to_string(), password.clone());
        Ok(())
    }

    async fn open_vault(&self, name: &str, password: &Secret) -> Result<()> {
        self.enter(NodeCall::OpenVault).await?;
        let mut state = self.state();
        match state.passwords.get(name) {
            None => return Err(Error::NotFound(format!("Vault '{}'", name))),
            Some(stored) if stored != password => {
                return Err(Error::Api("Invalid password".to_string()));
            }
            Some(_) => {}
        }
        if !state.opened.iter().any(|v| v == name) {
            state.opened.push(name.to_string());
        }
        Ok(())
    }

    async fn close_vault(&self, name: &str) -> Result<()> {
        self.enter(NodeCall::CloseVault).await?;
        let mut state = self.state();
        if !state.vaults.iter().any(|v| v == name) {
            return Err(Error::NotFound(format!("Vault '{}'", name)));
        }
        state.opened.retain(|v| v != name);
        Ok(())
    }
}

#[derive(Default)]
struct DeviceState {
    connected: Option<WalletRecord>,
    failing: bool,
    scans: usize,
    latency: Option<Duration>,
}

/// In-memory hardware device.
#[derive(Clone, Default)]
pub struct MemoryDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl MemoryDevice {
    /// Create a device with nothing plugged in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a device with a wallet plugged in.
    pub fn connected(record: WalletRecord) -> Self {
        let device = Self::new();
        device.plug(record);
        device
    }

    fn state(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Connect a wallet.
    pub fn plug(&self, record: WalletRecord) {
        self.state().connected = Some(record);
    }

    /// Disconnect the wallet.
    pub fn unplug(&self) {
        self.state().connected = None;
    }

    /// Make the transport error out on every scan.
    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }

    /// Delay every scan by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = Some(latency);
    }

    /// Number of scans performed.
    pub fn scans(&self) -> usize {
        self.state().scans
    }
}

#[async_trait]
impl HardwareTransport for MemoryDevice {
    fn name(&self) -> &str {
        "memory"
    }

    async fn scan(&self) -> Result<WalletRecord> {
        let latency = {
            let mut state = self.state();
            state.scans += 1;
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.state();
        if state.failing {
            return Err(Error::Transport("device busy".to_string()));
        }
        state
            .connected
            .clone()
            .ok_or_else(|| Error::Transport("no device connected".to_string()))
    }
}
