//! # Quantum-Chain Keyshare Node
//!
//! Produces blocks on a fixed interval and runs the keyshare hooks for each.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging
//! 3. Apply the devnet genesis
//! 4. Produce blocks until Ctrl-C or `QC_MAX_BLOCKS`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use node_runtime::{load_config, GenesisConfig, KeyshareNode};
use quantum_telemetry::{init_telemetry, subsystem_span};
use tracing::{error, info};

fn now_unix_nanos() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    u64::try_from(elapsed.as_nanos()).context("Block time does not fit in u64 nanoseconds")
}

#[cfg(feature = "metrics")]
fn log_final_metrics() {
    match quantum_telemetry::encode_metrics() {
        Ok(text) => info!("Final metrics:\n{}", text),
        Err(e) => error!(error = %e, "Failed to encode metrics"),
    }
}

#[cfg(not(feature = "metrics"))]
fn log_final_metrics() {}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();
    let telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;
    let service = telemetry.config().full_service_name();

    let node = KeyshareNode::from_genesis(config.keyshare.clone(), &GenesisConfig::devnet())
        .context("Failed to apply genesis")?;

    info!("===========================================");
    info!("  Quantum-Chain Keyshare Node v0.1.0");
    info!("===========================================");
    info!(
        block_interval_ms = config.block_interval_ms(),
        max_blocks = config.max_blocks,
        packet_timeout_secs = config.keyshare.packet_timeout.as_secs(),
        "Node is running. Press Ctrl+C to stop."
    );

    let mut ticker = tokio::time::interval(config.block_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let _block = subsystem_span!(
                    "keyshare_block",
                    service = %service,
                    height = node.height() + 1
                )
                .entered();
                let report = match node.produce_block(now_unix_nanos()?) {
                    Ok(report) => report,
                    Err(e) => {
                        error!(height = node.height() + 1, error = %e, "Block aborted");
                        return Err(e).context("Keyshare block hook failed");
                    }
                };
                info!(height = report.height, events = report.events.len(), "Block produced");
                if config.reached_limit(report.height) {
                    info!("Block limit reached");
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    log_final_metrics();
    info!(height = node.height(), "Shutdown complete");
    Ok(())
}
