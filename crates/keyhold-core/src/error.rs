//! Errors raised by vault management.

use thiserror::Error;

use keyhold_protocols::StoreError;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store(StoreError::from(err))
    }
}
