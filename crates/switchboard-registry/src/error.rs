//! Registry error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt registry: {0}")]
    Corrupt(String),

    #[error("Account name cannot be empty")]
    EmptyName,

    #[error("Cannot delete the last account")]
    LastAccount,

    #[error("Account not found: {0}")]
    NotFound(String),
}
