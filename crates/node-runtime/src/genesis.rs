//! # Genesis
//!
//! Seeds an empty keyshare store: params, validator set, key epochs and
//! outstanding keyshare requests.

use qc_18_keyshare::{
    Commitments, ConsensusAddress, KeyShareRequest, KeySlot, Keeper, KeyshareError, KvStore,
    Params, PubKeyRecord, ValidatorRecord,
};
use shared_types::ChannelEndpoint;
use std::collections::HashSet;
use thiserror::Error;

/// Genesis errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// Writing genesis state failed.
    #[error("Failed to write genesis state: {0}")]
    Keyshare(#[from] KeyshareError),
}

/// A validator in the genesis set.
#[derive(Debug, Clone)]
pub struct GenesisValidator {
    pub operator: String,
    pub cons_addr: ConsensusAddress,
    /// Whether the node submits keyshares on this validator's behalf.
    pub submits_keyshares: bool,
}

/// A key epoch seeded at genesis.
#[derive(Debug, Clone)]
pub struct GenesisKey {
    pub key: PubKeyRecord,
    pub commitments: Option<Commitments>,
}

/// Genesis configuration.
#[derive(Debug, Clone, Default)]
pub struct GenesisConfig {
    pub params: Params,
    pub validators: Vec<GenesisValidator>,
    pub active_key: Option<GenesisKey>,
    pub queued_key: Option<GenesisKey>,
    pub requests: Vec<KeyShareRequest>,
    /// Channels the loopback transport accepts packets on.
    pub open_channels: Vec<ChannelEndpoint>,
}

impl GenesisConfig {
    /// Four validators, one of which never submits, plus a key epoch
    /// rollover at height 30 and one aggregated request waiting to ship.
    pub fn devnet() -> Self {
        let channel = ChannelEndpoint::new("keyshare", "channel-0");

        let validators = (0u8..4)
            .map(|i| GenesisValidator {
                operator: format!("qcvaloper{}", i),
                cons_addr: ConsensusAddress::new([i + 1; 20]),
                submits_keyshares: i != 3,
            })
            .collect();

        let mut aggregated = KeyShareRequest::new("devnet-id-1", "a0b1c2", channel.clone(), "1");
        aggregated.aggr_keyshare = "c0ffee".to_string();
        let pending = KeyShareRequest::new("devnet-id-2", "a0b1c2", channel.clone(), "2");

        Self {
            params: Params::default(),
            validators,
            active_key: Some(GenesisKey {
                key: PubKeyRecord::new(vec![0xA1; 48], "qcvaloper0", 30),
                commitments: Some(Commitments::new(vec![vec![0x01; 48], vec![0x02; 48]])),
            }),
            queued_key: Some(GenesisKey {
                key: PubKeyRecord::new(vec![0xB2; 48], "qcvaloper1", 60),
                commitments: Some(Commitments::new(vec![vec![0x03; 48], vec![0x04; 48]])),
            }),
            requests: vec![aggregated, pending],
            open_channels: vec![channel],
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut seen = HashSet::new();
        for validator in &self.validators {
            if !seen.insert(validator.operator.as_str()) {
                return Err(GenesisError::InvalidConfig(format!(
                    "duplicate validator {}",
                    validator.operator
                )));
            }
        }

        let mut identities = HashSet::new();
        for request in &self.requests {
            if !identities.insert(request.identity.as_str()) {
                return Err(GenesisError::InvalidConfig(format!(
                    "duplicate request identity {}",
                    request.identity
                )));
            }
        }

        self.params.validate()?;
        Ok(())
    }

    /// Operators the node submits keyshares for.
    pub fn participants(&self) -> Vec<String> {
        self.validators
            .iter()
            .filter(|v| v.submits_keyshares)
            .map(|v| v.operator.clone())
            .collect()
    }

    /// Write genesis state into `store`.
    pub fn apply(&self, store: &mut dyn KvStore) -> Result<(), GenesisError> {
        self.validate()?;

        let mut keeper = Keeper::new(store);
        keeper.set_params(&self.params)?;

        for validator in &self.validators {
            keeper.set_validator(&ValidatorRecord::new(
                validator.operator.clone(),
                validator.cons_addr,
            ))?;
        }

        for (slot, epoch) in [
            (KeySlot::Active, &self.active_key),
            (KeySlot::Queued, &self.queued_key),
        ] {
            if let Some(epoch) = epoch {
                keeper.set_pub_key(slot, &epoch.key)?;
                if let Some(commitments) = &epoch.commitments {
                    keeper.set_commitments(slot, commitments)?;
                }
            }
        }

        for request in &self.requests {
            keeper.set_key_share_request(request)?;
        }

        Ok(())
    }
}
