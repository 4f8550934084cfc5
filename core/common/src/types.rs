//! Common types used throughout hwvault.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Account address as reported by a hardware device or the node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create a new Address from a string.
    ///
    /// # Preconditions
    /// - `address` must be non-empty and contain no whitespace
    ///
    /// # Errors
    /// - Returns error if the address is empty or contains whitespace
    pub fn new(address: impl Into<String>) -> crate::Result<Self> {
        let address = address.into();
        if address.is_empty() {
            return Err(crate::Error::InvalidInput(
                "Address cannot be empty".to_string(),
            ));
        }
        if address.chars().any(char::is_whitespace) {
            return Err(crate::Error::InvalidInput(format!(
                "Address '{}' contains whitespace",
                address
            )));
        }
        Ok(Self(address))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a discovered wallet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletSource {
    /// Read directly from a locally connected device.
    Device,
    /// Reported by the node's hardware account registry.
    Node,
}

/// Single wallet reported by the hardware transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub address: Address,
    /// Device family, e.g. "ledger".
    pub manufacturer: String,
    pub name: Option<String>,
}

/// Node-side description of a hardware account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareAccountInfo {
    pub manufacturer: String,
    pub name: String,
}

/// One entry of the merged wallet list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub address: Address,
    pub source: WalletSource,
    pub manufacturer: String,
    pub name: Option<String>,
}

impl WalletEntry {
    /// Entry for a wallet read from the device.
    pub fn from_device(record: WalletRecord) -> Self {
        Self {
            address: record.address,
            source: WalletSource::Device,
            manufacturer: record.manufacturer,
            name: record.name,
        }
    }

    /// Entry for an account known to the node.
    pub fn from_node(address: Address, info: HardwareAccountInfo) -> Self {
        Self {
            address,
            source: WalletSource::Node,
            manufacturer: info.manufacturer,
            name: Some(info.name),
        }
    }
}

/// Hardware section of the account metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareMeta {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Account metadata stored on the node for a labelled hardware account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub deleted: bool,
    pub description: String,
    pub hardware: HardwareMeta,
    pub name: String,
    pub tags: Vec<String>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Password held in memory; zeroized on drop and redacted in debug output.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct Secret(String);

impl Secret {
    /// Wrap a password.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the password for a remote call.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} chars])", self.0.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_creation() {
        let address = Address::new("0x00a329c0648769a73afac7f9381e08fb43dbea72").unwrap();
        assert_eq!(address.as_str(), "0x00a329c0648769a73afac7f9381e08fb43dbea72");
    }

    #[test]
    fn test_address_invalid() {
        assert!(Address::new("").is_err());
        assert!(Address::new("0x12 34").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_address_without_whitespace_parses(raw in "0x[0-9a-f]{1,40}") {
            let address = Address::new(raw.clone()).unwrap();
            proptest::prop_assert_eq!(address.as_str(), raw.as_str());
        }
    }

    #[test]
    fn test_entry_sources() {
        let record = WalletRecord {
            address: Address::new("0xdevice").unwrap(),
            manufacturer: "ledger".to_string(),
            name: None,
        };
        let device = WalletEntry::from_device(record);
        assert_eq!(device.source, WalletSource::Device);
        assert_eq!(device.name, None);

        let node = WalletEntry::from_node(
            Address::new("0xnode").unwrap(),
            HardwareAccountInfo {
                manufacturer: "ledger".to_string(),
                name: "Nano S".to_string(),
            },
        );
        assert_eq!(node.source, WalletSource::Node);
        assert_eq!(node.name.as_deref(), Some("Nano S"));
    }

    #[test]
    fn test_account_meta_shape() {
        let meta = AccountMeta {
            deleted: false,
            description: "cold storage".to_string(),
            hardware: HardwareMeta {
                kind: "ledger".to_string(),
            },
            name: "Ledger".to_string(),
            tags: vec!["hardware".to_string()],
            timestamp: 1_500_000_000_000,
        };

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["hardware"]["type"], "ledger");
        assert_eq!(json["tags"][0], "hardware");
        assert_eq!(json["deleted"], false);
    }

    #[test]
    fn test_secret_redacted() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{:?}", secret), "Secret([REDACTED; 7 chars])");
        assert_eq!(secret.expose(), "hunter2");
    }
}
