//! Typed access to the keyshare store
//!
//! Values are bincode-encoded. Any read that fails to decode is a
//! `StorageError`, which aborts the block.

use super::keys;
use crate::domain::{
    Commitments, KeyShareRequest, KeySlot, Params, PubKeyRecord, ValidatorRecord,
};
use crate::error::{KeyshareError, KeyshareResult};
use crate::ports::outbound::KvStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::StorageError;

/// Keeper over a borrowed store.
pub struct Keeper<'a> {
    store: &'a mut dyn KvStore,
}

impl<'a> Keeper<'a> {
    pub fn new(store: &'a mut dyn KvStore) -> Self {
        Self { store }
    }

    // =========================================================================
    // ENCODING
    // =========================================================================

    fn read<T: DeserializeOwned>(&self, key: &[u8]) -> KeyshareResult<Option<T>> {
        match self.store.get(key)? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(|e| KeyshareError::from(StorageError::serialization(key, e))),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&mut self, key: &[u8], value: &T) -> KeyshareResult<()> {
        let bytes = bincode::serialize(value).map_err(|e| StorageError::serialization(key, e))?;
        self.store.set(key, bytes)?;
        Ok(())
    }

    fn scan<T: DeserializeOwned>(&self, prefix: &[u8]) -> KeyshareResult<Vec<T>> {
        self.store
            .prefix_scan(prefix)?
            .into_iter()
            .map(|(key, bytes)| {
                bincode::deserialize(&bytes)
                    .map_err(|e| KeyshareError::from(StorageError::serialization(&key, e)))
            })
            .collect()
    }

    // =========================================================================
    // VALIDATOR SET
    // =========================================================================

    /// All validators, ordered by identity.
    pub fn validator_set(&self) -> KeyshareResult<Vec<ValidatorRecord>> {
        self.scan(keys::VALIDATOR_SET_PREFIX)
    }

    pub fn validator(&self, validator: &str) -> KeyshareResult<Option<ValidatorRecord>> {
        self.read(&keys::validator_set_key(validator))
    }

    pub fn set_validator(&mut self, record: &ValidatorRecord) -> KeyshareResult<()> {
        self.write(&keys::validator_set_key(&record.validator), record)
    }

    /// Remove a validator together with its last-submitted height.
    pub fn remove_validator(&mut self, validator: &str) -> KeyshareResult<()> {
        self.store.delete(&keys::validator_set_key(validator))?;
        self.store
            .delete(&keys::last_submitted_height_key(validator))?;
        Ok(())
    }

    /// Height of the validator's latest keyshare, 0 if it never submitted.
    pub fn last_submitted_height(&self, validator: &str) -> KeyshareResult<u64> {
        Ok(self
            .read(&keys::last_submitted_height_key(validator))?
            .unwrap_or(0))
    }

    pub fn set_last_submitted_height(&mut self, validator: &str, height: u64) -> KeyshareResult<()> {
        self.write(&keys::last_submitted_height_key(validator), &height)
    }

    // =========================================================================
    // KEY EPOCH SLOTS
    // =========================================================================

    fn pub_key_key(slot: KeySlot) -> &'static [u8] {
        match slot {
            KeySlot::Active => keys::ACTIVE_PUB_KEY,
            KeySlot::Queued => keys::QUEUED_PUB_KEY,
        }
    }

    fn commitments_key(slot: KeySlot) -> &'static [u8] {
        match slot {
            KeySlot::Active => keys::ACTIVE_COMMITMENTS,
            KeySlot::Queued => keys::QUEUED_COMMITMENTS,
        }
    }

    pub fn pub_key(&self, slot: KeySlot) -> KeyshareResult<Option<PubKeyRecord>> {
        self.read(Self::pub_key_key(slot))
    }

    pub fn set_pub_key(&mut self, slot: KeySlot, key: &PubKeyRecord) -> KeyshareResult<()> {
        self.write(Self::pub_key_key(slot), key)
    }

    pub fn commitments(&self, slot: KeySlot) -> KeyshareResult<Option<Commitments>> {
        self.read(Self::commitments_key(slot))
    }

    /// Store commitments for a slot. The slot's key must already exist.
    pub fn set_commitments(
        &mut self,
        slot: KeySlot,
        commitments: &Commitments,
    ) -> KeyshareResult<()> {
        if self.pub_key(slot)?.is_none() {
            return Err(KeyshareError::InvariantViolation {
                reason: format!("refusing to store {} commitments without a {} key", slot, slot),
            });
        }
        self.write(Self::commitments_key(slot), commitments)
    }

    /// Delete a slot's key and commitments together.
    pub fn clear_slot(&mut self, slot: KeySlot) -> KeyshareResult<()> {
        self.store.delete(Self::pub_key_key(slot))?;
        self.store.delete(Self::commitments_key(slot))?;
        Ok(())
    }

    /// Fail if a slot holds commitments but no key.
    pub fn check_slot_invariant(&self, slot: KeySlot) -> KeyshareResult<()> {
        let has_key = self.store.get(Self::pub_key_key(slot))?.is_some();
        let has_commitments = self.store.get(Self::commitments_key(slot))?.is_some();
        if has_commitments && !has_key {
            return Err(KeyshareError::InvariantViolation {
                reason: format!("{} commitments stored without a {} key", slot, slot),
            });
        }
        Ok(())
    }

    // =========================================================================
    // KEY SHARE REQUESTS
    // =========================================================================

    /// All requests, ordered by identity.
    pub fn key_share_requests(&self) -> KeyshareResult<Vec<KeyShareRequest>> {
        self.scan(keys::KEY_SHARE_REQUEST_PREFIX)
    }

    pub fn key_share_request(&self, identity: &str) -> KeyshareResult<Option<KeyShareRequest>> {
        self.read(&keys::key_share_request_key(identity))
    }

    pub fn set_key_share_request(&mut self, request: &KeyShareRequest) -> KeyshareResult<()> {
        self.write(&keys::key_share_request_key(&request.identity), request)
    }

    // =========================================================================
    // PARAMS
    // =========================================================================

    /// Stored params, or the defaults if none were ever set.
    pub fn params(&self) -> KeyshareResult<Params> {
        Ok(self.read(keys::PARAMS)?.unwrap_or_default())
    }

    pub fn set_params(&mut self, params: &Params) -> KeyshareResult<()> {
        params.validate()?;
        self.write(keys::PARAMS, params)
    }
}
