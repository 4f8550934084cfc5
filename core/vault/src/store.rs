//! Vault session store: creation form, known vaults and vault commands.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use hwvault_common::{Error, FormError, Outcome, Result, Secret};
use hwvault_node::NodeApi;

use crate::form::VaultFormState;
use crate::registry::{VaultRegistry, VaultStatus};

/// Everything a vault view renders, published as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultStoreState {
    pub form: VaultFormState,
    pub registry: VaultRegistry,
    /// The "add vault" dialog is shown.
    pub is_open_add: bool,
}

/// Store for the vault list and the vault creation form.
///
/// Every mutation replaces the published state in a single step, so readers
/// never see the form out of step with the registry or the dialog flag.
pub struct VaultStore {
    node: Arc<dyn NodeApi>,
    state: watch::Sender<VaultStoreState>,
}

impl VaultStore {
    /// Create a store with an empty registry and a cleared form.
    pub fn new(node: Arc<dyn NodeApi>) -> Self {
        let (state, _) = watch::channel(VaultStoreState::default());
        Self { node, state }
    }

    /// Current state.
    pub fn state(&self) -> VaultStoreState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<VaultStoreState> {
        self.state.subscribe()
    }

    /// Current form fields.
    pub fn form(&self) -> VaultFormState {
        self.state.borrow().form.clone()
    }

    /// Current registry.
    pub fn registry(&self) -> VaultRegistry {
        self.state.borrow().registry.clone()
    }

    /// Known vaults with their open flags.
    pub fn vaults(&self) -> Vec<VaultStatus> {
        self.state.borrow().registry.statuses()
    }

    pub fn is_open_add(&self) -> bool {
        self.state.borrow().is_open_add
    }

    /// Mismatch between password and repeat, derived from the current form.
    pub fn create_password_repeat_error(&self) -> Option<FormError> {
        self.state.borrow().form.password_repeat_error()
    }

    /// Set the vault name and validate it against the known vaults.
    pub fn set_create_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|state| {
            let VaultStoreState { form, registry, .. } = state;
            form.set_name(name, registry.names());
        });
    }

    pub fn set_create_password(&self, password: impl Into<String>) {
        let password = Secret::new(password);
        self.state.send_modify(|state| state.form.password = password);
    }

    pub fn set_create_password_hint(&self, hint: impl Into<String>) {
        let hint = hint.into();
        self.state.send_modify(|state| state.form.password_hint = hint);
    }

    pub fn set_create_password_repeat(&self, password: impl Into<String>) {
        let password = Secret::new(password);
        self.state
            .send_modify(|state| state.form.password_repeat = password);
    }

    /// Reset every form field; the name error goes back to `NoName`.
    pub fn clear_create_fields(&self) {
        self.state
            .send_modify(|state| state.form = VaultFormState::default());
    }

    pub fn set_open_add(&self, is_open_add: bool) {
        self.state
            .send_modify(|state| state.is_open_add = is_open_add);
    }

    /// Reset the form and show the dialog.
    pub fn open_add(&self) {
        self.state.send_modify(|state| {
            state.form = VaultFormState::default();
            state.is_open_add = true;
        });
    }

    /// Hide the dialog, keeping the form contents.
    pub fn close_add(&self) {
        self.set_open_add(false);
    }

    /// Replace the registry with the node's lists and revalidate the form name.
    pub fn set_vaults(&self, all: Vec<String>, opened: Vec<String>) {
        let registry = VaultRegistry::new(all, opened);
        self.state.send_modify(|state| {
            state.form.revalidate_name(registry.names());
            state.registry = registry;
        });
    }

    /// Refresh the registry from the node.
    ///
    /// Both lists are fetched together. If either call fails the previous
    /// registry is kept.
    pub async fn load_vaults(&self) -> Outcome {
        let (all, opened) = tokio::join!(self.node.list_vaults(), self.node.list_opened_vaults());

        match all.and_then(|all| opened.map(|opened| (all, opened))) {
            Ok((all, opened)) => {
                debug!("load_vaults: {} vaults, {} open", all.len(), opened.len());
                self.set_vaults(all, opened);
                Outcome::Completed
            }
            Err(e) => {
                warn!("load_vaults failed on {}: {}", self.node.name(), e);
                Outcome::degraded(e)
            }
        }
    }

    /// Create a vault from the form fields.
    ///
    /// # Errors
    /// - `Error::Validation` when the name or password repeat is invalid; no
    ///   remote call is made in that case
    ///
    /// A failing remote call is logged and reported as `Outcome::Degraded`,
    /// leaving the registry untouched.
    pub async fn create_vault(&self) -> Result<Outcome> {
        let form = self.form();
        if let Some(err) = form.validation_error() {
            warn!("create_vault rejected: {}", err);
            return Err(Error::Validation(err));
        }

        match self.node.new_vault(&form.name, &form.password).await {
            Ok(()) => {
                debug!("create_vault created '{}'", form.name);
                Ok(self.load_vaults().await)
            }
            Err(e) => {
                warn!("create_vault failed for '{}': {}", form.name, e);
                Ok(Outcome::degraded(e))
            }
        }
    }

    /// Open a vault with its password and refresh the registry.
    ///
    /// # Errors
    /// - `Error::Validation` when `name` is blank
    pub async fn open_vault(&self, name: &str, password: impl Into<String>) -> Result<Outcome> {
        if name.trim().is_empty() {
            return Err(Error::Validation(FormError::NoName));
        }
        let password = Secret::new(password);

        match self.node.open_vault(name, &password).await {
            Ok(()) => {
                debug!("open_vault opened '{}'", name);
                Ok(self.load_vaults().await)
            }
            Err(e) => {
                warn!("open_vault failed for '{}': {}", name, e);
                Ok(Outcome::degraded(e))
            }
        }
    }

    /// Close a vault and refresh the registry whether or not the close worked.
    pub async fn close_vault(&self, name: &str) -> Outcome {
        let closed = self.node.close_vault(name).await;
        let loaded = self.load_vaults().await;

        match closed {
            Ok(()) => {
                debug!("close_vault closed '{}'", name);
                loaded
            }
            Err(e) => {
                warn!("close_vault failed for '{}': {}", name, e);
                Outcome::degraded(e)
            }
        }
    }
}
