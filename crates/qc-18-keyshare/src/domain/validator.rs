//! Keyshare validator set entries
//!
//! A validator joins the keyshare set out of band (registration message).
//! The set is pruned every block against the staking view.

use crate::error::{KeyshareError, KeyshareResult};
use serde::{Deserialize, Serialize};
use shared_types::{address_to_hex, Address, ADDRESS_LEN};
use std::fmt;

/// Fixed-length consensus address of a validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsensusAddress(pub Address);

impl ConsensusAddress {
    pub fn new(bytes: Address) -> Self {
        Self(bytes)
    }

    /// Decode the hex form kept in the store.
    pub fn from_hex(value: &str) -> KeyshareResult<Self> {
        let bytes = hex::decode(value).map_err(|e| KeyshareError::InvalidConsensusAddress {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

        let address: Address =
            bytes
                .try_into()
                .map_err(|raw: Vec<u8>| KeyshareError::InvalidConsensusAddress {
                    value: value.to_string(),
                    reason: format!("expected {} bytes, got {}", ADDRESS_LEN, raw.len()),
                })?;

        Ok(Self(address))
    }

    pub fn to_hex(&self) -> String {
        address_to_hex(&self.0)
    }

    pub fn as_bytes(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for ConsensusAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A member of the keyshare validator set.
///
/// The consensus address is stored hex-encoded, exactly as registered.
/// It is decoded lazily when the validator is about to be slashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorRecord {
    /// Validator operator identity
    pub validator: String,
    /// Hex-encoded consensus address
    pub cons_addr: String,
}

impl ValidatorRecord {
    pub fn new(validator: impl Into<String>, cons_addr: ConsensusAddress) -> Self {
        Self {
            validator: validator.into(),
            cons_addr: cons_addr.to_hex(),
        }
    }

    pub fn consensus_address(&self) -> KeyshareResult<ConsensusAddress> {
        ConsensusAddress::from_hex(&self.cons_addr)
    }
}
