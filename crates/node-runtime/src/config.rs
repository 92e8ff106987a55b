//! # Node Configuration
//!
//! Runtime parameters for the keyshare node, loaded from the environment.
//! Unparseable values are logged and replaced by their defaults.

use qc_18_keyshare::KeyshareConfig;
use quantum_telemetry::TelemetryConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Default time between produced blocks.
pub const DEFAULT_BLOCK_INTERVAL: Duration = Duration::from_millis(1_000);

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Time between produced blocks.
    pub block_interval: Duration,
    /// Stop after this many blocks. 0 runs until Ctrl-C.
    pub max_blocks: u64,
    /// Keyshare service configuration.
    pub keyshare: KeyshareConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            block_interval: DEFAULT_BLOCK_INTERVAL,
            max_blocks: 0,
            keyshare: KeyshareConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Whether the node should stop after producing `height`.
    pub fn reached_limit(&self, height: u64) -> bool {
        self.max_blocks != 0 && height >= self.max_blocks
    }

    /// Block interval in milliseconds, saturating at `u64::MAX`.
    pub fn block_interval_ms(&self) -> u64 {
        u64::try_from(self.block_interval.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Load configuration from the environment.
///
/// | Variable | Default |
/// |----------|---------|
/// | `QC_BLOCK_INTERVAL_MS` | `1000` |
/// | `QC_MAX_BLOCKS` | `0` |
/// | `QC_KEYSHARE_PACKET_TIMEOUT_SECS` | `20` |
pub fn load_config() -> NodeConfig {
    let defaults = NodeConfig::default();

    NodeConfig {
        block_interval: env_parsed::<u64>("QC_BLOCK_INTERVAL_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.block_interval),
        max_blocks: env_parsed("QC_MAX_BLOCKS").unwrap_or(defaults.max_blocks),
        keyshare: KeyshareConfig::from_env(),
        telemetry: TelemetryConfig::from_env(),
    }
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparseable environment value");
            None
        }
    }
}
