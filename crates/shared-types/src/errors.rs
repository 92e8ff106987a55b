//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised by a module's key-value store.
///
/// Every variant is fatal for the block being executed: a store that cannot
/// be read or decoded must not let replicas diverge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Stored bytes could not be encoded or decoded.
    #[error("Serialization error for key {key}: {reason}")]
    Serialization { key: String, reason: String },

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl StorageError {
    /// Build a serialization error, rendering the raw key lossily.
    pub fn serialization(key: &[u8], reason: impl ToString) -> Self {
        Self::Serialization {
            key: String::from_utf8_lossy(key).into_owned(),
            reason: reason.to_string(),
        }
    }
}
