//! Known and opened vaults as reported by the node.

use serde::Serialize;
use std::collections::BTreeSet;

/// Name and open flag of one vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultStatus {
    pub name: String,
    pub is_open: bool,
}

/// All known vaults and the subset currently open.
///
/// Every open name is also a known name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultRegistry {
    names: Vec<String>,
    open_names: BTreeSet<String>,
}

impl VaultRegistry {
    /// Build a registry from the node's lists.
    ///
    /// Opened names the node does not list as known are dropped.
    pub fn new(names: Vec<String>, opened: Vec<String>) -> Self {
        let open_names = opened
            .into_iter()
            .filter(|name| names.contains(name))
            .collect();
        Self { names, open_names }
    }

    /// All known vault names, in node order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names of open vaults.
    pub fn open_names(&self) -> &BTreeSet<String> {
        &self.open_names
    }

    /// Check if a vault is known.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Check if a vault is open.
    pub fn is_open(&self, name: &str) -> bool {
        self.open_names.contains(name)
    }

    /// Per-vault open flags, in node order.
    pub fn statuses(&self) -> Vec<VaultStatus> {
        self.names
            .iter()
            .map(|name| VaultStatus {
                name: name.clone(),
                is_open: self.is_open(name),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_statuses() {
        let registry = VaultRegistry::new(strings(&["v1", "v2"]), strings(&["v1"]));

        assert_eq!(
            registry.statuses(),
            vec![
                VaultStatus {
                    name: "v1".to_string(),
                    is_open: true
                },
                VaultStatus {
                    name: "v2".to_string(),
                    is_open: false
                },
            ]
        );
    }

    #[test]
    fn test_unknown_open_names_dropped() {
        let registry = VaultRegistry::new(strings(&["v1"]), strings(&["v1", "ghost"]));

        assert!(registry.is_open("v1"));
        assert!(!registry.is_open("ghost"));
        assert!(!registry.contains("ghost"));
        assert_eq!(registry.open_names().len(), 1);
    }

    #[test]
    fn test_empty() {
        let registry = VaultRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.statuses().is_empty());
    }
}
