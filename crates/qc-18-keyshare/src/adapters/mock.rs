//! Test doubles for the outbound ports
//!
//! Each double records calls in order and can be told to misbehave.

use crate::domain::{ConsensusAddress, PubKeyRecord};
use crate::ports::outbound::{
    BondStatus, ChannelTransport, PeerKeyRegistry, StakingView, TransportError, ValidatorInfo,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared_types::{ChannelEndpoint, TimeoutHeight};
use std::collections::{HashMap, HashSet};

// =============================================================================
// STAKING
// =============================================================================

/// A recorded slash call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashCall {
    pub cons_addr: ConsensusAddress,
    pub infraction_height: u64,
    pub power: i64,
    pub fraction: Decimal,
}

/// Staking view over a fixed validator table.
#[derive(Default)]
pub struct MockStakingView {
    validators: Mutex<HashMap<String, ValidatorInfo>>,
    slashes: Mutex<Vec<SlashCall>>,
}

impl MockStakingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bonded(operators: &[&str]) -> Self {
        let view = Self::new();
        for operator in operators {
            view.set_status(operator, BondStatus::Bonded);
        }
        view
    }

    pub fn set_status(&self, operator: &str, status: BondStatus) {
        self.validators.lock().insert(
            operator.to_string(),
            ValidatorInfo {
                operator: operator.to_string(),
                status,
            },
        );
    }

    pub fn remove(&self, operator: &str) {
        self.validators.lock().remove(operator);
    }

    pub fn slashes(&self) -> Vec<SlashCall> {
        self.slashes.lock().clone()
    }
}

impl StakingView for MockStakingView {
    fn validator(&self, operator: &str) -> Option<ValidatorInfo> {
        self.validators.lock().get(operator).cloned()
    }

    fn slash(
        &self,
        cons_addr: &ConsensusAddress,
        infraction_height: u64,
        power: i64,
        fraction: Decimal,
    ) {
        self.slashes.lock().push(SlashCall {
            cons_addr: *cons_addr,
            infraction_height,
            power,
            fraction,
        });
    }
}

// =============================================================================
// PEER KEY REGISTRY
// =============================================================================

/// A recorded peer registry call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeerCall {
    SetActivePubKey(PubKeyRecord),
    DeleteActivePubKey,
    DeleteActiveCommitments,
    SetQueuedPubKey(PubKeyRecord),
    DeleteQueuedPubKey,
    DeleteQueuedCommitments,
}

#[derive(Default)]
struct PeerMirror {
    active: Option<PubKeyRecord>,
    queued: Option<PubKeyRecord>,
}

/// Peer registry that logs every call and mirrors the key pair.
///
/// While `unavailable`, calls are still logged but not applied to the
/// mirror, simulating a peer that silently drops updates.
#[derive(Default)]
pub struct RecordingPeerRegistry {
    calls: Mutex<Vec<PeerCall>>,
    mirror: Mutex<PeerMirror>,
    unavailable: Mutex<bool>,
}

impl RecordingPeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock() = unavailable;
    }

    pub fn calls(&self) -> Vec<PeerCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn active(&self) -> Option<PubKeyRecord> {
        self.mirror.lock().active.clone()
    }

    pub fn queued(&self) -> Option<PubKeyRecord> {
        self.mirror.lock().queued.clone()
    }

    fn apply(&self, call: PeerCall) {
        self.calls.lock().push(call.clone());
        if *self.unavailable.lock() {
            return;
        }
        let mut mirror = self.mirror.lock();
        match call {
            PeerCall::SetActivePubKey(key) => mirror.active = Some(key),
            PeerCall::DeleteActivePubKey => mirror.active = None,
            PeerCall::SetQueuedPubKey(key) => mirror.queued = Some(key),
            PeerCall::DeleteQueuedPubKey => mirror.queued = None,
            PeerCall::DeleteActiveCommitments | PeerCall::DeleteQueuedCommitments => {}
        }
    }
}

impl PeerKeyRegistry for RecordingPeerRegistry {
    fn set_active_pub_key(&self, key: &PubKeyRecord) {
        self.apply(PeerCall::SetActivePubKey(key.clone()));
    }

    fn delete_active_pub_key(&self) {
        self.apply(PeerCall::DeleteActivePubKey);
    }

    fn delete_active_commitments(&self) {
        self.apply(PeerCall::DeleteActiveCommitments);
    }

    fn set_queued_pub_key(&self, key: &PubKeyRecord) {
        self.apply(PeerCall::SetQueuedPubKey(key.clone()));
    }

    fn delete_queued_pub_key(&self) {
        self.apply(PeerCall::DeleteQueuedPubKey);
    }

    fn delete_queued_commitments(&self) {
        self.apply(PeerCall::DeleteQueuedCommitments);
    }
}

// =============================================================================
// CHANNEL TRANSPORT
// =============================================================================

/// A packet accepted by [`MockChannelTransport`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPacket {
    pub sequence: u64,
    pub data: Vec<u8>,
    pub source: ChannelEndpoint,
    pub timeout_height: TimeoutHeight,
    pub timeout_timestamp: u64,
}

#[derive(Default)]
struct TransportState {
    next_sequence: u64,
    sent: Vec<SentPacket>,
    attempts: usize,
    closed: HashSet<ChannelEndpoint>,
    reject_all: bool,
}

/// Channel transport that accepts packets in memory.
#[derive(Default)]
pub struct MockChannelTransport {
    state: Mutex<TransportState>,
}

impl MockChannelTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every packet until switched back.
    pub fn set_reject_all(&self, reject: bool) {
        self.state.lock().reject_all = reject;
    }

    pub fn close_channel(&self, endpoint: ChannelEndpoint) {
        self.state.lock().closed.insert(endpoint);
    }

    pub fn open_channel(&self, endpoint: &ChannelEndpoint) {
        self.state.lock().closed.remove(endpoint);
    }

    pub fn sent(&self) -> Vec<SentPacket> {
        self.state.lock().sent.clone()
    }

    /// Number of send attempts, failed ones included.
    pub fn attempts(&self) -> usize {
        self.state.lock().attempts
    }
}

impl ChannelTransport for MockChannelTransport {
    fn send_packet(
        &self,
        data: Vec<u8>,
        source: &ChannelEndpoint,
        timeout_height: TimeoutHeight,
        timeout_timestamp: u64,
    ) -> Result<u64, TransportError> {
        let mut state = self.state.lock();
        state.attempts += 1;

        if state.reject_all {
            return Err(TransportError::Rejected("transport offline".to_string()));
        }
        if state.closed.contains(source) {
            return Err(TransportError::ChannelClosed {
                port_id: source.port_id.clone(),
                channel_id: source.channel_id.clone(),
            });
        }

        state.next_sequence += 1;
        let sequence = state.next_sequence;
        state.sent.push(SentPacket {
            sequence,
            data,
            source: source.clone(),
            timeout_height,
            timeout_timestamp,
        });
        Ok(sequence)
    }
}
