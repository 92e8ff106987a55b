//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Every port is synchronous: block hooks run to completion inside the
//! block-processing slot and never suspend.

use crate::domain::{ConsensusAddress, PubKeyRecord};
use rust_decimal::Decimal;
use shared_types::{ChannelEndpoint, StorageError, TimeoutHeight};
use thiserror::Error;

/// Module key-value store.
///
/// `prefix_scan` MUST return entries in ascending key order so that every
/// replica iterates validators and requests identically.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StorageError>;
    fn delete(&mut self, key: &[u8]) -> Result<(), StorageError>;
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError>;
}

/// Bonding status reported by the staking module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BondStatus {
    Unbonded,
    Unbonding,
    Bonded,
}

/// Staking module's view of a validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorInfo {
    pub operator: String,
    pub status: BondStatus,
}

/// Staking module interface
///
/// Read for pruning, written (slash) for liveness enforcement. Slashing
/// effects are owned by the staking module; nothing is returned.
pub trait StakingView: Send + Sync {
    /// Look up a validator by operator identity
    fn validator(&self, operator: &str) -> Option<ValidatorInfo>;

    /// Whether the validator is currently bonded
    fn is_bonded(&self, info: &ValidatorInfo) -> bool {
        info.status == BondStatus::Bonded
    }

    /// Slash a validator for an infraction at `infraction_height`
    fn slash(
        &self,
        cons_addr: &ConsensusAddress,
        infraction_height: u64,
        power: i64,
        fraction: Decimal,
    );
}

/// Peer key registry push interface
///
/// Fire-and-forget: the peer keeps its own copy of the key pair and no
/// result is consumed. Local state is never rolled back if the peer
/// fails to apply a call.
pub trait PeerKeyRegistry: Send + Sync {
    fn set_active_pub_key(&self, key: &PubKeyRecord);
    fn delete_active_pub_key(&self);
    fn delete_active_commitments(&self);
    fn set_queued_pub_key(&self, key: &PubKeyRecord);
    fn delete_queued_pub_key(&self);
    fn delete_queued_commitments(&self);
}

/// Channel transport errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Channel not found: {port_id}/{channel_id}")]
    ChannelNotFound { port_id: String, channel_id: String },

    #[error("Channel closed: {port_id}/{channel_id}")]
    ChannelClosed { port_id: String, channel_id: String },

    #[error("Packet rejected: {0}")]
    Rejected(String),
}

/// Reliable, ordered, acknowledged channel
pub trait ChannelTransport: Send + Sync {
    /// Submit a packet; returns the packet sequence number
    fn send_packet(
        &self,
        data: Vec<u8>,
        source: &ChannelEndpoint,
        timeout_height: TimeoutHeight,
        timeout_timestamp: u64,
    ) -> Result<u64, TransportError>;
}
