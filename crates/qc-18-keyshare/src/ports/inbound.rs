//! Driving Ports (API - Inbound)

use crate::domain::{CurrentKeysPacketAck, PacketAck};
use crate::error::KeyshareResult;
use crate::events::KeyshareEvent;
use crate::ports::outbound::KvStore;
use shared_types::BlockContext;

/// Facts produced by one block hook
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockReport {
    pub height: u64,
    pub events: Vec<KeyshareEvent>,
}

impl BlockReport {
    pub fn new(height: u64) -> Self {
        Self {
            height,
            events: Vec::new(),
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = KeyshareEvent>) {
        self.events.extend(events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Primary Keyshare API
///
/// The store is passed into every call; the module keeps no state of its own
/// between calls. Hooks must be invoked once per block, in order:
/// `begin_block` (prune, rotate) then `end_block` (slash, dispatch).
/// Any `Err` returned by a block hook is fatal for the block.
pub trait KeyshareModule {
    /// Prune the validator set, then advance the key epoch pipeline
    fn begin_block(
        &self,
        store: &mut dyn KvStore,
        block: &BlockContext,
    ) -> KeyshareResult<BlockReport>;

    /// Slash idle validators, then dispatch aggregated keyshares
    fn end_block(&self, store: &mut dyn KvStore, block: &BlockContext)
        -> KeyshareResult<BlockReport>;

    /// Record a keyshare submission by `validator` at `height`
    fn record_submission(
        &self,
        store: &mut dyn KvStore,
        validator: &str,
        height: u64,
    ) -> KeyshareResult<()>;

    /// Apply a channel acknowledgement carrying the peer's current keys
    fn on_acknowledgement(
        &self,
        store: &mut dyn KvStore,
        ack: &PacketAck,
    ) -> KeyshareResult<Vec<KeyshareEvent>>;

    /// Answer a current-keys request from the local key pair
    fn current_keys_ack(&self, store: &mut dyn KvStore) -> KeyshareResult<CurrentKeysPacketAck>;
}
