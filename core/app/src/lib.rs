//! Application wiring for hwvault.
//!
//! Builds the device scanner and the vault store once, on top of a shared node
//! API, and owns the scanner's poll loop.

pub mod config;
pub mod context;

pub use config::AppConfig;
pub use context::AppContext;
