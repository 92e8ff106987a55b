//! Ports module for Keyshare subsystem
//!
//! Hexagonal architecture ports

pub mod inbound;
pub mod outbound;

pub use inbound::{BlockReport, KeyshareModule};
pub use outbound::{
    BondStatus, ChannelTransport, KvStore, PeerKeyRegistry, StakingView, TransportError,
    ValidatorInfo,
};
