//! Key epoch records
//!
//! Two slots exist: `Active` (serving current traffic) and `Queued`
//! (prepared ahead of the next epoch). Each slot optionally carries
//! a commitment set that lives and dies with its key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which slot of the two-key pipeline a record occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySlot {
    Active,
    Queued,
}

impl fmt::Display for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Queued => f.write_str("queued"),
        }
    }
}

/// Threshold public key of one epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKeyRecord {
    /// Opaque public key material
    pub public_key: Vec<u8>,
    /// Identity that submitted the key
    pub creator: String,
    /// Height at which the key stops being valid
    pub expiry: u64,
}

impl PubKeyRecord {
    pub fn new(public_key: impl Into<Vec<u8>>, creator: impl Into<String>, expiry: u64) -> Self {
        Self {
            public_key: public_key.into(),
            creator: creator.into(),
            expiry,
        }
    }

    /// A key is expired at the start of the block whose height reaches its expiry.
    pub fn is_expired_at(&self, height: u64) -> bool {
        self.expiry <= height
    }
}

/// Opaque per-epoch commitments accompanying a key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Commitments {
    pub commitments: Vec<Vec<u8>>,
}

impl Commitments {
    pub fn new(commitments: Vec<Vec<u8>>) -> Self {
        Self { commitments }
    }
}
