//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Registry error: {0}")]
    Registry(#[from] switchboard_registry::RegistryError),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Window host error: {0}")]
    Host(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
