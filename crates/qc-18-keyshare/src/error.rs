//! Error types for Keyshare subsystem
//!
//! Fatal vs. local errors:
//!
//! | Variant | Scope |
//! |---------|-------|
//! | `Storage` | fatal, aborts the block |
//! | `InvariantViolation` | fatal, aborts the block |
//! | `InvalidConsensusAddress` | one validator, skipped for this block |
//! | `Codec` | one packet or acknowledgement |
//! | `InvalidParams` | rejected parameter update |

use shared_types::StorageError;
use thiserror::Error;

/// Keyshare subsystem errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyshareError {
    /// Underlying store failed or held undecodable bytes
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Persistent state broke a structural rule
    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    /// Stored consensus address does not decode to a fixed-length address
    #[error("Invalid consensus address {value:?}: {reason}")]
    InvalidConsensusAddress { value: String, reason: String },

    /// Packet or acknowledgement bytes could not be encoded/decoded
    #[error("Codec error: {reason}")]
    Codec { reason: String },

    /// Parameter set failed validation
    #[error("Invalid params: {reason}")]
    InvalidParams { reason: String },
}

impl KeyshareError {
    /// Whether this error must abort the whole block transition.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::InvariantViolation { .. })
    }
}

impl From<prost::DecodeError> for KeyshareError {
    fn from(e: prost::DecodeError) -> Self {
        Self::Codec {
            reason: e.to_string(),
        }
    }
}

/// Result type for keyshare operations
pub type KeyshareResult<T> = Result<T, KeyshareError>;
