//! # Channel Transport Adapter
//!
//! Loopback transport: packets on open channels are accepted and queued for
//! inspection, with per-node monotonically increasing sequence numbers.

use parking_lot::Mutex;
use qc_18_keyshare::{ChannelTransport, TransportError};
use shared_types::{ChannelEndpoint, TimeoutHeight};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A packet accepted for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub sequence: u64,
    pub source: ChannelEndpoint,
    pub data: Vec<u8>,
    pub timeout_timestamp: u64,
}

/// Loopback channel transport over a fixed set of open channels.
pub struct LoopbackTransport {
    open: HashSet<ChannelEndpoint>,
    next_sequence: AtomicU64,
    delivered: Mutex<Vec<Delivered>>,
}

impl LoopbackTransport {
    pub fn new(open: impl IntoIterator<Item = ChannelEndpoint>) -> Self {
        Self {
            open: open.into_iter().collect(),
            next_sequence: AtomicU64::new(1),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Drain every packet accepted so far.
    pub fn drain(&self) -> Vec<Delivered> {
        std::mem::take(&mut *self.delivered.lock())
    }
}

impl ChannelTransport for LoopbackTransport {
    fn send_packet(
        &self,
        data: Vec<u8>,
        source: &ChannelEndpoint,
        timeout_height: TimeoutHeight,
        timeout_timestamp: u64,
    ) -> Result<u64, TransportError> {
        if !self.open.contains(source) {
            return Err(TransportError::ChannelNotFound {
                port_id: source.port_id.clone(),
                channel_id: source.channel_id.clone(),
            });
        }

        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        debug!(
            channel = %source,
            sequence,
            bytes = data.len(),
            timeout_height_zero = timeout_height.is_zero(),
            timeout_timestamp,
            "[transport] Packet accepted"
        );
        self.delivered.lock().push(Delivered {
            sequence,
            source: source.clone(),
            data,
            timeout_timestamp,
        });
        Ok(sequence)
    }
}
