//! Collaborator abstractions for hwvault.
//!
//! The scanner and the vault store talk to two external systems: a remote node
//! exposing the account and vault registry, and a local hardware wallet
//! transport. Both are trait objects so the host decides how they are reached.
//!
//! # Design Principles
//! - Opaque calls: no wire format is assumed by the core
//! - Async operations: every call may suspend
//! - Unified error semantics: failures are `hwvault_common::Error`

pub mod api;
pub mod memory;

pub use api::{HardwareTransport, NodeApi};
pub use memory::{MemoryDevice, MemoryNode, NodeCall};
