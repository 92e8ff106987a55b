//! # Keyshare Metrics
//!
//! Prometheus metrics for the per-block keyshare hooks.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-keyshare = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `keyshare_validators_pruned_total` - Validators removed from the keyshare set
//! - `keyshare_validators_slashed_total` - Slashes issued for idle validators
//! - `keyshare_slashes_skipped_total` - Idle validators skipped (undecodable address)
//! - `keyshare_pub_keys_total` - Key epoch transitions, labeled by `transition`
//! - `keyshare_packets_sent_total` - Aggregated keyshare packets accepted
//! - `keyshare_packets_failed_total` - Aggregated keyshare packets rejected

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref VALIDATORS_PRUNED: IntCounter = register_int_counter!(
        "keyshare_validators_pruned_total",
        "Total number of validators removed from the keyshare set"
    )
    .expect("Failed to create VALIDATORS_PRUNED metric");

    pub static ref VALIDATORS_SLASHED: IntCounter = register_int_counter!(
        "keyshare_validators_slashed_total",
        "Total number of slashes issued for idle validators"
    )
    .expect("Failed to create VALIDATORS_SLASHED metric");

    pub static ref SLASHES_SKIPPED: IntCounter = register_int_counter!(
        "keyshare_slashes_skipped_total",
        "Total number of idle validators skipped for an undecodable address"
    )
    .expect("Failed to create SLASHES_SKIPPED metric");

    /// Key epoch transitions (expired, promoted, discarded)
    pub static ref PUB_KEY_TRANSITIONS: IntCounterVec = register_int_counter_vec!(
        "keyshare_pub_keys_total",
        "Total number of key epoch transitions",
        &["transition"]
    )
    .expect("Failed to create PUB_KEY_TRANSITIONS metric");

    pub static ref PACKETS_SENT: IntCounter = register_int_counter!(
        "keyshare_packets_sent_total",
        "Total number of aggregated keyshare packets accepted by the transport"
    )
    .expect("Failed to create PACKETS_SENT metric");

    pub static ref PACKETS_FAILED: IntCounter = register_int_counter!(
        "keyshare_packets_failed_total",
        "Total number of aggregated keyshare packets rejected by the transport"
    )
    .expect("Failed to create PACKETS_FAILED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_validator_pruned() {
    VALIDATORS_PRUNED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_validator_slashed() {
    VALIDATORS_SLASHED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_slash_skipped() {
    SLASHES_SKIPPED.inc();
}

/// Record a key epoch transition
#[cfg(feature = "metrics")]
pub fn record_pub_key_transition(transition: &str) {
    PUB_KEY_TRANSITIONS.with_label_values(&[transition]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_packet_sent() {
    PACKETS_SENT.inc();
}

#[cfg(feature = "metrics")]
pub fn record_packet_failed() {
    PACKETS_FAILED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_validator_pruned() {}

#[cfg(not(feature = "metrics"))]
pub fn record_validator_slashed() {}

#[cfg(not(feature = "metrics"))]
pub fn record_slash_skipped() {}

#[cfg(not(feature = "metrics"))]
pub fn record_pub_key_transition(_transition: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_packet_sent() {}

#[cfg(not(feature = "metrics"))]
pub fn record_packet_failed() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_callable_regardless_of_feature() {
        record_validator_pruned();
        record_validator_slashed();
        record_slash_skipped();
        record_pub_key_transition("promoted");
        record_packet_sent();
        record_packet_failed();
    }
}
