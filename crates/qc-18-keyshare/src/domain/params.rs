//! Governance parameters
//!
//! Read-only while a block executes. Updated only through the parameter
//! update path, which must call [`Params::validate`] first.

use crate::error::{KeyshareError, KeyshareResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of blocks a validator may go without submitting a keyshare.
pub const DEFAULT_MAX_IDLED_BLOCK: u64 = 10;

/// Default slash power passed to the staking module.
pub const DEFAULT_SLASH_POWER: i64 = 100;

/// Default slash fraction (0.5).
pub fn default_slash_fraction() -> Decimal {
    Decimal::new(5, 1)
}

/// Keyshare module parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Blocks a validator may stay idle before being slashed
    pub max_idled_block: u64,
    /// Fraction of stake slashed for not submitting keyshares
    #[serde(with = "decimal_str")]
    pub slash_fraction_no_keyshare: Decimal,
    /// Power reported to the staking module with each slash
    pub slash_power: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_idled_block: DEFAULT_MAX_IDLED_BLOCK,
            slash_fraction_no_keyshare: default_slash_fraction(),
            slash_power: DEFAULT_SLASH_POWER,
        }
    }
}

impl Params {
    pub fn validate(&self) -> KeyshareResult<()> {
        if self.max_idled_block == 0 {
            return Err(KeyshareError::InvalidParams {
                reason: "max idled block must be positive".to_string(),
            });
        }
        if self.slash_fraction_no_keyshare.is_sign_negative()
            || self.slash_fraction_no_keyshare > Decimal::ONE
        {
            return Err(KeyshareError::InvalidParams {
                reason: format!(
                    "slash fraction must be within [0, 1], got {}",
                    self.slash_fraction_no_keyshare
                ),
            });
        }
        if self.slash_power <= 0 {
            return Err(KeyshareError::InvalidParams {
                reason: format!("slash power must be positive, got {}", self.slash_power),
            });
        }
        Ok(())
    }
}

/// Decimal as its canonical string, so non self-describing formats (bincode)
/// round-trip it exactly.
mod decimal_str {
    use rust_decimal::Decimal;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Decimal::from_str(&raw).map_err(D::Error::custom)
    }
}
