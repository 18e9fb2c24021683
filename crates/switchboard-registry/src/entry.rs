//! Account entry data structure

use serde::{Deserialize, Serialize};

/// Prefix shared by every persistent partition identifier.
pub const PARTITION_PREFIX: &str = "persist:";

/// Accounts synthesized when no usable registry exists on disk.
pub const DEFAULT_ACCOUNTS: [&str; 3] = ["account1", "account2", "account3"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Human-chosen, unique account name
    pub name: String,
    /// Isolation domain for cookies, storage and cache
    pub partition_id: String,
}

impl AccountEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let partition_id = Self::partition_for(&name);
        Self { name, partition_id }
    }

    /// Deterministic partition identifier for an account name.
    pub fn partition_for(name: &str) -> String {
        format!("{PARTITION_PREFIX}{name}")
    }
}
