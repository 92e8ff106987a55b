//! # Staking Adapter
//!
//! Bond table seeded from genesis. Slashes are logged and tallied; the node
//! does not model stake balances.

use parking_lot::RwLock;
use qc_18_keyshare::domain::ConsensusAddress;
use qc_18_keyshare::{BondStatus, Decimal, StakingView, ValidatorInfo};
use std::collections::HashMap;
use tracing::warn;

/// Staking view over the genesis validator table.
#[derive(Default)]
pub struct GenesisStakingView {
    validators: RwLock<HashMap<String, BondStatus>>,
    slashes: RwLock<HashMap<ConsensusAddress, u64>>,
}

impl GenesisStakingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, operator: &str, status: BondStatus) {
        self.validators.write().insert(operator.to_string(), status);
    }

    /// Number of times `cons_addr` has been slashed.
    pub fn slash_count(&self, cons_addr: &ConsensusAddress) -> u64 {
        self.slashes.read().get(cons_addr).copied().unwrap_or(0)
    }
}

impl StakingView for GenesisStakingView {
    fn validator(&self, operator: &str) -> Option<ValidatorInfo> {
        self.validators
            .read()
            .get(operator)
            .map(|status| ValidatorInfo {
                operator: operator.to_string(),
                status: *status,
            })
    }

    fn slash(
        &self,
        cons_addr: &ConsensusAddress,
        infraction_height: u64,
        power: i64,
        fraction: Decimal,
    ) {
        *self.slashes.write().entry(*cons_addr).or_insert(0) += 1;
        warn!(
            cons_addr = %cons_addr,
            infraction_height,
            power,
            fraction = %fraction,
            "[staking] Slash applied"
        );
    }
}
