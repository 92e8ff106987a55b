//! # qc-18-keyshare
//!
//! Keyshare module: tracks validator keyshare liveness, rotates the threshold
//! public key through its epochs, and ships aggregated keyshares to the chains
//! that requested them.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Liveness Store**: last keyshare height per validator, pruned against staking
//! - **Key Epoch Rotator**: Active/Queued key pipeline driven by block height
//! - **Slashing Enforcer**: penalizes validators idle for `max_idled_block` blocks
//! - **Share Dispatcher**: exactly-once delivery of aggregated keyshares
//!
//! ## Architecture
//!
//! ```text
//!                       ┌─────────────── begin_block ───────────────┐
//! Staking ──bond status──→ prune validator set ──→ rotate key epochs ──→ Peer registry
//!                       └───────────────────────────────────────────┘
//!                       ┌──────────────── end_block ────────────────┐
//! Staking ←──slash────── slash idle validators ──→ dispatch shares  ──→ Channel transport
//!                       └───────────────────────────────────────────┘
//! ```
//!
//! Hook errors are fatal for the block. Per-item failures (an undecodable
//! consensus address, a rejected packet) are logged, reported as events and
//! retried on the next block.
//!
//! ## Example
//!
//! ```rust,ignore
//! use qc_18_keyshare::{KeyshareConfig, KeyshareModule, KeyshareService};
//! use shared_types::BlockContext;
//!
//! let service = KeyshareService::new(KeyshareConfig::from_env(), staking, peer, transport);
//!
//! let block = BlockContext::new(height, time_unix_nanos);
//! let begin = service.begin_block(&mut store, &block)?;
//! // ... deliver transactions, calling record_submission ...
//! let end = service.end_block(&mut store, &block)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod store;

pub use adapters::InMemoryKvStore;
pub use config::KeyshareConfig;
pub use domain::{
    AggrKeyshareDataPacketData, Commitments, ConsensusAddress, CurrentKeysPacketAck,
    KeyShareRequest, KeySlot, KeysharePacketData, PacketAck, Params, PepPacketData,
    PubKeyRecord, RequestStatus, ValidatorRecord,
};
pub use error::{KeyshareError, KeyshareResult};
pub use events::{KeyshareEvent, RemovalReason};
pub use ports::inbound::{BlockReport, KeyshareModule};
pub use ports::outbound::{
    BondStatus, ChannelTransport, KvStore, PeerKeyRegistry, StakingView, TransportError,
    ValidatorInfo,
};
pub use service::KeyshareService;
pub use store::Keeper;

// Slash fractions cross the staking port as decimals.
pub use rust_decimal::Decimal;
