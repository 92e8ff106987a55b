//! Outgoing events for Keyshare subsystem
//!
//! One event per observable fact of a block hook. Callers forward them to
//! whatever event bus or indexer they run.

use serde::{Deserialize, Serialize};

/// Why a validator left the keyshare set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Absent from the staking view
    NotFound,
    /// Present but not bonded
    NotBonded,
}

/// Keyshare subsystem events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyshareEvent {
    /// Validator pruned from the keyshare set
    ValidatorRemoved {
        validator: String,
        reason: RemovalReason,
    },
    /// Active key reached its expiry and was removed
    ActivePubKeyExpired { creator: String, expiry: u64 },
    /// Queued key became the active key
    QueuedPubKeyPromoted { creator: String, expiry: u64 },
    /// Queued key expired before it could be promoted
    QueuedPubKeyDiscarded { creator: String, expiry: u64 },
    /// Idle validator slashed
    ValidatorSlashed {
        validator: String,
        cons_addr: String,
        infraction_height: u64,
        last_submitted_height: u64,
    },
    /// Idle validator could not be slashed this block
    SlashSkipped { validator: String, reason: String },
    /// Aggregated keyshare packet accepted by the transport
    AggrKeysharePacketSent {
        identity: String,
        sequence: u64,
        timeout_timestamp: u64,
    },
    /// Aggregated keyshare packet rejected by the transport
    AggrKeysharePacketFailed { identity: String, reason: String },
    /// Local key pair updated from a current-keys acknowledgement
    CurrentKeysAcknowledged {
        active_updated: bool,
        queued_updated: bool,
    },
    /// Counterparty returned an error acknowledgement
    AcknowledgementError { error: String },
}
