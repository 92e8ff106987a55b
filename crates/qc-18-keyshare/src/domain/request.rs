//! Aggregated keyshare requests
//!
//! ```text
//! [PENDING] ──aggregation (external)──→ [AGGREGATED] ──send ok──→ [DISPATCHED]
//!                                           │    ↑
//!                                           └────┘ send failed (retried next block)
//! ```

use serde::{Deserialize, Serialize};
use shared_types::ChannelEndpoint;

/// Lifecycle stage of a [`KeyShareRequest`], derived from its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    /// Aggregated keyshare not computed yet
    Pending,
    /// Aggregated keyshare ready, not sent
    Aggregated,
    /// Packet submitted successfully
    Dispatched,
}

/// A request for an aggregated keyshare, created by the aggregation process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShareRequest {
    /// Correlation id of the request
    pub identity: String,
    /// Public key the requester encrypted under
    pub pubkey: String,
    /// Channel the aggregated keyshare must be sent on
    pub ibc_info: ChannelEndpoint,
    /// Aggregated keyshare, empty until computed
    pub aggr_keyshare: String,
    /// Proposal the request belongs to
    pub proposal_id: String,
    /// Whether the aggregated keyshare has been sent
    pub sent: bool,
}

impl KeyShareRequest {
    pub fn new(
        identity: impl Into<String>,
        pubkey: impl Into<String>,
        ibc_info: ChannelEndpoint,
        proposal_id: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            pubkey: pubkey.into(),
            ibc_info,
            aggr_keyshare: String::new(),
            proposal_id: proposal_id.into(),
            sent: false,
        }
    }

    pub fn status(&self) -> RequestStatus {
        if self.sent {
            RequestStatus::Dispatched
        } else if self.aggr_keyshare.is_empty() {
            RequestStatus::Pending
        } else {
            RequestStatus::Aggregated
        }
    }

    /// Eligible for dispatch this block.
    pub fn is_dispatchable(&self) -> bool {
        self.status() == RequestStatus::Aggregated
    }
}
