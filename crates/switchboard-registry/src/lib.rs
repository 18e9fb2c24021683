//! Switchboard Account Registry
//!
//! An ordered mapping from account name to the partition that isolates its
//! cookies and storage. The registry is flushed to disk on every mutation and
//! is never empty.

mod entry;
mod error;
mod registry;

pub use entry::{AccountEntry, DEFAULT_ACCOUNTS, PARTITION_PREFIX};
pub use error::RegistryError;
pub use registry::AccountRegistry;

pub type Result<T> = std::result::Result<T, RegistryError>;
