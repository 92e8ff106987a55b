//! Adapters for Keyshare subsystem
//!
//! - memory_store: ordered in-memory `KvStore`
//! - mock: recording doubles for staking, peer registry and transport

pub mod memory_store;
pub mod mock;

pub use memory_store::InMemoryKvStore;
pub use mock::{
    MockChannelTransport, MockStakingView, PeerCall, RecordingPeerRegistry, SentPacket, SlashCall,
};
