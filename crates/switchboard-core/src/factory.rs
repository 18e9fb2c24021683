//! Session Window Factory
//!
//! Builds the description of an account's content window: which partition it
//! is bound to, where that partition keeps its data, and which title the
//! shell pins over whatever the page asks for. Account lookup happens here
//! and nowhere else before a main window is created.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use url::Url;

use switchboard_registry::AccountRegistry;

use crate::config::Config;
use crate::error::CoreError;
use crate::geometry::Size;
use crate::window::{WindowHost, WindowId};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionWindowSpec {
    pub account: String,
    pub partition_id: String,
    /// Webview data directory backing the partition
    pub data_dir: PathBuf,
    pub url: Url,
    /// Title enforced by the shell
    pub title: String,
    pub size: Size,
    pub min_size: Size,
}

pub struct SessionWindowFactory {
    service_url: Url,
    partitions_dir: PathBuf,
    app_title: String,
    size: Size,
    min_size: Size,
}

impl SessionWindowFactory {
    pub fn from_config(config: &Config) -> Result<Self> {
        let service_url = Url::parse(&config.service_url)?;
        if !matches!(service_url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "service URL must be http(s): {service_url}"
            )));
        }

        Ok(Self {
            service_url,
            partitions_dir: config.partitions_dir.clone(),
            app_title: config.app_title.clone(),
            size: config.main_size,
            min_size: config.main_min_size,
        })
    }

    /// Describe the content window for `account`.
    pub fn spec_for(&self, registry: &AccountRegistry, account: &str) -> Result<SessionWindowSpec> {
        let entry = registry
            .get(account)
            .ok_or_else(|| CoreError::AccountNotFound(account.to_string()))?;

        Ok(SessionWindowSpec {
            account: entry.name.clone(),
            partition_id: entry.partition_id.clone(),
            data_dir: partition_data_dir(&self.partitions_dir, &entry.partition_id),
            url: self.service_url.clone(),
            title: pinned_title(&self.app_title, &entry.name),
            size: self.size,
            min_size: self.min_size,
        })
    }

    /// Create the content window for `account` on `host`.
    ///
    /// Unknown accounts and host failures are logged and returned; no window
    /// exists afterwards in either case.
    pub fn create<H: WindowHost>(
        &self,
        host: &mut H,
        registry: &AccountRegistry,
        account: &str,
    ) -> Result<(WindowId, SessionWindowSpec)> {
        let spec = self.spec_for(registry, account).inspect_err(|e| {
            tracing::error!(account = %account, error = %e, "Cannot create session window");
        })?;

        let id = host.open_session(&spec).inspect_err(|e| {
            tracing::error!(account = %account, error = %e, "Session window creation failed");
        })?;

        tracing::info!(
            account = %spec.account,
            partition = %spec.partition_id,
            window = %id,
            "Created session window"
        );

        Ok((id, spec))
    }
}

/// Title the shell shows for an account's main window.
pub fn pinned_title(app_title: &str, account: &str) -> String {
    format!("{app_title} - {account}")
}

/// Filesystem location for a partition's cookies, storage and cache.
///
/// The directory name is a readable prefix plus a digest of the exact id, so
/// ids that differ only in case or punctuation never share a directory.
pub fn partition_data_dir(base: &Path, partition_id: &str) -> PathBuf {
    let mut name: String = partition_id
        .chars()
        .take(32)
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    name.push('-');
    for b in &partition_digest(partition_id)[..16] {
        name.push_str(&format!("{:02x}", b));
    }

    base.join(name)
}

/// Stable 16-byte store id for a partition (WebKit keys data stores by UUID).
pub fn partition_store_id(partition_id: &str) -> [u8; 16] {
    let digest = partition_digest(partition_id);
    let mut id = [0u8; 16];
    id.copy_from_slice(&digest[..16]);
    id
}

fn partition_digest(partition_id: &str) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(partition_id.as_bytes()));
    digest
}
