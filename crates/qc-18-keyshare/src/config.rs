//! Node-local keyshare configuration
//!
//! Not consensus state: every validator is expected to run the same values,
//! but they are never persisted in the module store.

use std::env;
use std::time::Duration;

/// Default grace window between a block's time and a packet's timeout.
pub const DEFAULT_PACKET_TIMEOUT: Duration = Duration::from_secs(20);

/// Keyshare service configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyshareConfig {
    /// Added to the block time to build each packet's timeout timestamp
    pub packet_timeout: Duration,
}

impl Default for KeyshareConfig {
    fn default() -> Self {
        Self {
            packet_timeout: DEFAULT_PACKET_TIMEOUT,
        }
    }
}

impl KeyshareConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `QC_KEYSHARE_PACKET_TIMEOUT_SECS` | `20` |
    pub fn from_env() -> Self {
        let packet_timeout = env::var("QC_KEYSHARE_PACKET_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PACKET_TIMEOUT);

        Self { packet_timeout }
    }

    pub fn with_packet_timeout(mut self, packet_timeout: Duration) -> Self {
        self.packet_timeout = packet_timeout;
        self
    }
}
