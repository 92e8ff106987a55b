//! Keyshare Service
//!
//! Wires the four per-block components onto the outbound ports.
//!
//! ## Block lifecycle
//!
//! | Hook          | Steps                                   |
//! |---------------|-----------------------------------------|
//! | `begin_block` | prune validator set, rotate key epochs  |
//! | `end_block`   | slash idle validators, dispatch packets |

mod dispatch;
mod liveness;
mod rotation;
mod slashing;


pub use slashing::is_idle;

use crate::config::KeyshareConfig;
use crate::domain::{CurrentKeysPacketAck, PacketAck};
use crate::error::KeyshareResult;
use crate::events::KeyshareEvent;
use crate::ports::inbound::{BlockReport, KeyshareModule};
use crate::ports::outbound::{ChannelTransport, KvStore, PeerKeyRegistry, StakingView};
use crate::store::Keeper;
use shared_types::BlockContext;
use std::sync::Arc;
use tracing::{debug, info_span};

/// Keyshare module service
///
/// Holds no chain state. Everything it reads or writes lives in the store
/// handed to each hook.
pub struct KeyshareService<K, P, T>
where
    K: StakingView,
    P: PeerKeyRegistry,
    T: ChannelTransport,
{
    config: KeyshareConfig,
    staking: Arc<K>,
    peer: Arc<P>,
    transport: Arc<T>,
}

impl<K, P, T> KeyshareService<K, P, T>
where
    K: StakingView,
    P: PeerKeyRegistry,
    T: ChannelTransport,
{
    pub fn new(config: KeyshareConfig, staking: Arc<K>, peer: Arc<P>, transport: Arc<T>) -> Self {
        Self {
            config,
            staking,
            peer,
            transport,
        }
    }

    pub fn config(&self) -> &KeyshareConfig {
        &self.config
    }

    /// Run both hooks for one block and merge their reports.
    pub fn execute_block(
        &self,
        store: &mut dyn KvStore,
        block: &BlockContext,
    ) -> KeyshareResult<BlockReport> {
        let mut report = self.begin_block(store, block)?;
        report.extend(self.end_block(store, block)?.events);
        Ok(report)
    }
}

impl<K, P, T> KeyshareModule for KeyshareService<K, P, T>
where
    K: StakingView,
    P: PeerKeyRegistry,
    T: ChannelTransport,
{
    fn begin_block(
        &self,
        store: &mut dyn KvStore,
        block: &BlockContext,
    ) -> KeyshareResult<BlockReport> {
        let span = info_span!("keyshare_begin_block", height = block.height);
        let _enter = span.enter();

        let mut keeper = Keeper::new(store);
        let mut report = BlockReport::new(block.height);
        report.extend(liveness::prune_validator_set(
            &mut keeper,
            self.staking.as_ref(),
        )?);
        report.extend(rotation::rotate_pub_keys(
            &mut keeper,
            self.peer.as_ref(),
            block.height,
        )?);

        debug!(events = report.events.len(), "[qc-18] begin_block complete");
        Ok(report)
    }

    fn end_block(
        &self,
        store: &mut dyn KvStore,
        block: &BlockContext,
    ) -> KeyshareResult<BlockReport> {
        let span = info_span!("keyshare_end_block", height = block.height);
        let _enter = span.enter();

        let mut keeper = Keeper::new(store);
        let mut report = BlockReport::new(block.height);
        report.extend(slashing::slash_idle_validators(
            &mut keeper,
            self.staking.as_ref(),
            block,
        )?);
        report.extend(dispatch::dispatch_aggr_keyshares(
            &mut keeper,
            self.transport.as_ref(),
            block,
            self.config.packet_timeout,
        )?);

        debug!(events = report.events.len(), "[qc-18] end_block complete");
        Ok(report)
    }

    fn record_submission(
        &self,
        store: &mut dyn KvStore,
        validator: &str,
        height: u64,
    ) -> KeyshareResult<()> {
        liveness::record_submission(&mut Keeper::new(store), validator, height)
    }

    fn on_acknowledgement(
        &self,
        store: &mut dyn KvStore,
        ack: &PacketAck,
    ) -> KeyshareResult<Vec<KeyshareEvent>> {
        dispatch::apply_current_keys_ack(&mut Keeper::new(store), ack)
    }

    fn current_keys_ack(&self, store: &mut dyn KvStore) -> KeyshareResult<CurrentKeysPacketAck> {
        dispatch::current_keys_ack(&Keeper::new(store))
    }
}
