//! Account Registry
//!
//! Handles registry persistence and mutation.
//! Every mutation is flushed to disk before it returns; a failed flush is
//! logged and the in-memory state stays authoritative.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::{AccountEntry, DEFAULT_ACCOUNTS};
use crate::error::RegistryError;
use crate::Result;

pub struct AccountRegistry {
    /// Entries in insertion order
    entries: Vec<AccountEntry>,
    /// Durable copy location
    path: PathBuf,
}

impl AccountRegistry {
    /// Load the registry from `path`.
    ///
    /// Missing, unreadable or corrupt files are treated as absent: three
    /// default accounts are synthesized and written back immediately.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        match read_entries(&path) {
            Ok(entries) => {
                tracing::info!(
                    path = %path.display(),
                    account_count = entries.len(),
                    "Loaded account registry"
                );
                Self { entries, path }
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Account registry unavailable, creating defaults"
                );
                let registry = Self {
                    entries: DEFAULT_ACCOUNTS.iter().map(|name| AccountEntry::new(*name)).collect(),
                    path,
                };
                registry.save();
                registry
            }
        }
    }

    /// Write the full registry to disk. Errors are logged, never returned.
    pub fn save(&self) {
        if let Err(e) = self.write_to_disk() {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to save account registry"
            );
        }
    }

    fn write_to_disk(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&RegistryFile(self.entries.clone()))?;

        // Write beside the target and rename over it so readers never see a
        // half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    /// Add an account. Existing names are left untouched.
    ///
    /// Returns the ordered account names after the call.
    pub fn add(&mut self, name: &str) -> Vec<String> {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Ignoring account with empty name");
            return self.names();
        }

        if self.contains(name) {
            tracing::debug!(account = %name, "Account already registered");
            return self.names();
        }

        let entry = AccountEntry::new(name);
        tracing::info!(
            account = %entry.name,
            partition = %entry.partition_id,
            "Added account"
        );
        self.entries.push(entry);
        self.save();

        self.names()
    }

    /// Delete an account (cannot delete the last account)
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if self.entries.len() <= 1 {
            return Err(RegistryError::LastAccount);
        }

        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        self.entries.remove(index);
        self.save();

        tracing::info!(account = %name, "Deleted account");

        Ok(())
    }

    /// Ordered snapshot of all account names
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&AccountEntry> {
        let name = name.trim();
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_entries(path: &Path) -> Result<Vec<AccountEntry>> {
    let contents = fs::read_to_string(path)?;
    let RegistryFile(entries) = serde_json::from_str(&contents)?;

    if entries.is_empty() {
        return Err(RegistryError::Corrupt("no accounts".to_string()));
    }

    let mut partitions = HashSet::new();
    for entry in &entries {
        if entry.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if entry.partition_id != AccountEntry::partition_for(&entry.name) {
            return Err(RegistryError::Corrupt(format!(
                "account {} is bound to foreign partition {}",
                entry.name, entry.partition_id
            )));
        }
        if !partitions.insert(entry.partition_id.as_str()) {
            return Err(RegistryError::Corrupt(format!(
                "partition {} is shared by more than one account",
                entry.partition_id
            )));
        }
    }

    Ok(entries)
}

/// On-disk shape: a JSON object of `name -> partition id`, in registry order.
struct RegistryFile(Vec<AccountEntry>);

impl Serialize for RegistryFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.name, &entry.partition_id)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegistryFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RegistryFile;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of account name to partition id")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<AccountEntry> = Vec::new();
                while let Some((name, partition_id)) = access.next_entry::<String, String>()? {
                    let name = name.trim().to_string();
                    // Later duplicates win, keeping the first position.
                    match entries.iter_mut().find(|entry| entry.name == name) {
                        Some(existing) => existing.partition_id = partition_id,
                        None => entries.push(AccountEntry { name, partition_id }),
                    }
                }
                Ok(RegistryFile(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
