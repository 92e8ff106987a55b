//! # Keyshare Node
//!
//! Owns the module store and produces blocks one at a time:
//!
//! ```text
//! begin_block ──→ record submissions for participants ──→ end_block
//! ```

use crate::adapters::{GenesisStakingView, InProcessPeerRegistry, LoopbackTransport, PeerKeys};
use crate::genesis::{GenesisConfig, GenesisError};
use parking_lot::Mutex;
use qc_18_keyshare::{
    BlockReport, BondStatus, InMemoryKvStore, Keeper, KeyshareConfig, KeyshareModule,
    KeyshareResult, KeyshareService,
};
use shared_types::BlockContext;
use std::sync::Arc;
use tracing::{debug, info};

pub type NodeService = KeyshareService<GenesisStakingView, InProcessPeerRegistry, LoopbackTransport>;

pub struct KeyshareNode {
    store: Mutex<InMemoryKvStore>,
    service: NodeService,
    staking: Arc<GenesisStakingView>,
    peer: Arc<InProcessPeerRegistry>,
    transport: Arc<LoopbackTransport>,
    participants: Vec<String>,
    height: Mutex<u64>,
}

impl KeyshareNode {
    /// Build a node whose store and collaborators are seeded from `genesis`.
    pub fn from_genesis(
        config: KeyshareConfig,
        genesis: &GenesisConfig,
    ) -> Result<Self, GenesisError> {
        let mut store = InMemoryKvStore::new();
        genesis.apply(&mut store)?;

        let staking = Arc::new(GenesisStakingView::new());
        for validator in &genesis.validators {
            staking.set_status(&validator.operator, BondStatus::Bonded);
        }

        let peer = Arc::new(InProcessPeerRegistry::new());
        peer.seed(PeerKeys {
            active: genesis.active_key.as_ref().map(|k| k.key.clone()),
            queued: genesis.queued_key.as_ref().map(|k| k.key.clone()),
            active_commitments: genesis
                .active_key
                .as_ref()
                .is_some_and(|k| k.commitments.is_some()),
            queued_commitments: genesis
                .queued_key
                .as_ref()
                .is_some_and(|k| k.commitments.is_some()),
        });

        let transport = Arc::new(LoopbackTransport::new(genesis.open_channels.clone()));
        let service = KeyshareService::new(
            config,
            Arc::clone(&staking),
            Arc::clone(&peer),
            Arc::clone(&transport),
        );

        info!(
            validators = genesis.validators.len(),
            requests = genesis.requests.len(),
            "Keyshare node initialized from genesis"
        );

        Ok(Self {
            store: Mutex::new(store),
            service,
            staking,
            peer,
            transport,
            participants: genesis.participants(),
            height: Mutex::new(0),
        })
    }

    /// Height of the last produced block.
    pub fn height(&self) -> u64 {
        *self.height.lock()
    }

    /// Produce the next block at `time_unix_nanos`.
    ///
    /// The block runs against a staged copy of the store that replaces the
    /// live store only when every hook succeeds. An error leaves both the
    /// store and the height unchanged; the caller must not continue.
    pub fn produce_block(&self, time_unix_nanos: u64) -> KeyshareResult<BlockReport> {
        let mut height = self.height.lock();
        let block = BlockContext::new(*height + 1, time_unix_nanos);
        let mut store = self.store.lock();
        let mut staged = store.clone();

        let report = self.run_block(&mut staged, &block)?;
        *store = staged;
        *height = block.height;

        for event in &report.events {
            debug!(height = block.height, event = ?event, "Keyshare event");
        }
        Ok(report)
    }

    fn run_block(
        &self,
        store: &mut InMemoryKvStore,
        block: &BlockContext,
    ) -> KeyshareResult<BlockReport> {
        let mut report = self.service.begin_block(store, block)?;

        for operator in &self.participants {
            // Pruned validators stop submitting.
            if Keeper::new(store).validator(operator)?.is_some() {
                self.service.record_submission(store, operator, block.height)?;
            }
        }

        report.extend(self.service.end_block(store, block)?.events);
        Ok(report)
    }

    pub fn staking(&self) -> &GenesisStakingView {
        &self.staking
    }

    pub fn peer(&self) -> &InProcessPeerRegistry {
        &self.peer
    }

    pub fn transport(&self) -> &LoopbackTransport {
        &self.transport
    }

    /// Run `f` against the module store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut InMemoryKvStore) -> R) -> R {
        f(&mut *self.store.lock())
    }
}
