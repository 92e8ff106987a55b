//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Chain**: `BlockContext`, `Address`
//! - **Channels**: `ChannelEndpoint`, `TimeoutHeight`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A 20-byte address (consensus or account).
pub type Address = [u8; 20];

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Per-block execution context handed to every block hook.
///
/// Carries the block's declared height and timestamp. Block hooks must not
/// consult any other clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockContext {
    /// Height of the block being executed.
    pub height: u64,
    /// Block timestamp as nanoseconds since the Unix epoch.
    pub time_unix_nanos: u64,
}

impl BlockContext {
    pub fn new(height: u64, time_unix_nanos: u64) -> Self {
        Self {
            height,
            time_unix_nanos,
        }
    }

    /// Height of the previous block (saturating at genesis).
    pub fn previous_height(&self) -> u64 {
        self.height.saturating_sub(1)
    }

    /// Absolute timestamp `window` after this block's time, in nanoseconds.
    pub fn timestamp_after(&self, window: Duration) -> u64 {
        let window_nanos = u64::try_from(window.as_nanos()).unwrap_or(u64::MAX);
        self.time_unix_nanos.saturating_add(window_nanos)
    }
}

// =============================================================================
// CLUSTER B: CHANNELS
// =============================================================================

/// Source port/channel pair a packet is sent on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ChannelEndpoint {
    pub port_id: String,
    pub channel_id: String,
}

impl ChannelEndpoint {
    pub fn new(port_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

impl fmt::Display for ChannelEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// Height on the counterparty chain after which a packet times out.
///
/// The zero height disables height-based timeout, leaving only the
/// timestamp timeout in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TimeoutHeight {
    pub revision_number: u64,
    pub revision_height: u64,
}

impl TimeoutHeight {
    /// Relative zero height.
    pub const ZERO: Self = Self {
        revision_number: 0,
        revision_height: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Render an address as lowercase hex.
pub fn address_to_hex(address: &Address) -> String {
    hex::encode(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_height_saturates_at_genesis() {
        assert_eq!(BlockContext::new(0, 0).previous_height(), 0);
        assert_eq!(BlockContext::new(10, 0).previous_height(), 9);
    }

    #[test]
    fn test_timestamp_after_adds_window() {
        let block = BlockContext::new(5, 1_000);
        assert_eq!(block.timestamp_after(Duration::from_secs(20)), 20_000_001_000);
    }

    #[test]
    fn test_timestamp_after_saturates() {
        let block = BlockContext::new(5, u64::MAX - 1);
        assert_eq!(block.timestamp_after(Duration::from_secs(1)), u64::MAX);
    }

    #[test]
    fn test_zero_timeout_height() {
        assert!(TimeoutHeight::ZERO.is_zero());
        assert!(!TimeoutHeight {
            revision_number: 1,
            revision_height: 0
        }
        .is_zero());
    }

    #[test]
    fn test_channel_endpoint_display() {
        let endpoint = ChannelEndpoint::new("keyshare", "channel-0");
        assert_eq!(endpoint.to_string(), "keyshare/channel-0");
    }

    #[test]
    fn test_block_context_bincode_stable() {
        let block = BlockContext::new(42, 7);
        let bytes = bincode::serialize(&block).unwrap();
        let decoded: BlockContext = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, block);
    }
}
