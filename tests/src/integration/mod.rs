//! # Integration Scenarios
//!
//! Each scenario drives full blocks through the public `KeyshareModule` API
//! with the recording doubles from `qc_18_keyshare::adapters`.

pub mod block_lifecycle;
pub mod handshake;
pub mod runtime;

use qc_18_keyshare::adapters::{MockChannelTransport, MockStakingView, RecordingPeerRegistry};
use qc_18_keyshare::{InMemoryKvStore, KeyshareConfig, KeyshareService};
use shared_types::BlockContext;
use std::sync::Arc;

/// Nanoseconds per second.
pub const SECOND: u64 = 1_000_000_000;

pub type MockService = KeyshareService<MockStakingView, RecordingPeerRegistry, MockChannelTransport>;

/// One chain's keyshare module together with its collaborators.
pub struct Chain {
    pub store: InMemoryKvStore,
    pub staking: Arc<MockStakingView>,
    pub peer: Arc<RecordingPeerRegistry>,
    pub transport: Arc<MockChannelTransport>,
    pub service: MockService,
}

impl Chain {
    pub fn new() -> Self {
        let staking = Arc::new(MockStakingView::new());
        let peer = Arc::new(RecordingPeerRegistry::new());
        let transport = Arc::new(MockChannelTransport::new());
        let service = KeyshareService::new(
            KeyshareConfig::default(),
            Arc::clone(&staking),
            Arc::clone(&peer),
            Arc::clone(&transport),
        );
        Self {
            store: InMemoryKvStore::new(),
            staking,
            peer,
            transport,
            service,
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

/// Block at `height`, one second per block.
pub fn block(height: u64) -> BlockContext {
    BlockContext::new(height, 1_700_000_000 * SECOND + height * SECOND)
}
