//! # Peer Registry Adapter
//!
//! Stands in for the counterparty chain's key registry. The node keeps a
//! copy of what it last pushed so the two sides can be compared.

use parking_lot::Mutex;
use qc_18_keyshare::{PeerKeyRegistry, PubKeyRecord};
use tracing::{debug, info};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PeerKeys {
    pub active: Option<PubKeyRecord>,
    pub queued: Option<PubKeyRecord>,
    pub active_commitments: bool,
    pub queued_commitments: bool,
}

/// In-process peer registry.
#[derive(Default)]
pub struct InProcessPeerRegistry {
    keys: Mutex<PeerKeys>,
}

impl InProcessPeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed commitment presence, mirroring what genesis stored locally.
    pub fn seed(&self, keys: PeerKeys) {
        *self.keys.lock() = keys;
    }

    pub fn snapshot(&self) -> PeerKeys {
        self.keys.lock().clone()
    }
}

impl PeerKeyRegistry for InProcessPeerRegistry {
    fn set_active_pub_key(&self, key: &PubKeyRecord) {
        let mut keys = self.keys.lock();
        if keys.active.as_ref() != Some(key) {
            info!(expiry = key.expiry, creator = %key.creator, "[peer] Active key updated");
        }
        keys.active = Some(key.clone());
    }

    fn delete_active_pub_key(&self) {
        debug!("[peer] Active key deleted");
        self.keys.lock().active = None;
    }

    fn delete_active_commitments(&self) {
        debug!("[peer] Active commitments deleted");
        self.keys.lock().active_commitments = false;
    }

    fn set_queued_pub_key(&self, key: &PubKeyRecord) {
        let mut keys = self.keys.lock();
        if keys.queued.as_ref() != Some(key) {
            info!(expiry = key.expiry, creator = %key.creator, "[peer] Queued key updated");
        }
        keys.queued = Some(key.clone());
    }

    fn delete_queued_pub_key(&self) {
        debug!("[peer] Queued key deleted");
        self.keys.lock().queued = None;
    }

    fn delete_queued_commitments(&self) {
        debug!("[peer] Queued commitments deleted");
        self.keys.lock().queued_commitments = false;
    }
}
