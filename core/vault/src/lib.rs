//! Vault session store for hwvault.
//!
//! This module provides:
//! - The vault creation form with synchronous validation
//! - The registry of known and opened vaults
//! - Create, open and close commands that refresh the registry afterwards
//!
//! # Architecture
//! The store sits between the views and the node API. All view-facing state is
//! one value behind a watch channel and is replaced whole on every mutation.

pub mod form;
pub mod registry;
pub mod store;

pub use form::{validate_name, VaultFormState};
pub use registry::{VaultRegistry, VaultStatus};
pub use store::{VaultStore, VaultStoreState};
