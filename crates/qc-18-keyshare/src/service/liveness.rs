//! Validator liveness bookkeeping
//!
//! Pruning runs at the start of every block, before rotation and long before
//! slashing, so a validator that just left the bonded set is never slashed.

use crate::error::KeyshareResult;
use crate::events::{KeyshareEvent, RemovalReason};
use crate::metrics;
use crate::ports::outbound::StakingView;
use crate::store::Keeper;
use tracing::{debug, info};

/// Drop every validator the staking view no longer reports as bonded.
pub(crate) fn prune_validator_set<K>(
    keeper: &mut Keeper<'_>,
    staking: &K,
) -> KeyshareResult<Vec<KeyshareEvent>>
where
    K: StakingView + ?Sized,
{
    let mut events = Vec::new();

    for record in keeper.validator_set()? {
        let reason = match staking.validator(&record.validator) {
            None => RemovalReason::NotFound,
            Some(info) if !staking.is_bonded(&info) => RemovalReason::NotBonded,
            Some(_) => continue,
        };

        keeper.remove_validator(&record.validator)?;
        metrics::record_validator_pruned();
        info!(
            validator = %record.validator,
            reason = ?reason,
            "[qc-18] Validator removed from keyshare set"
        );
        events.push(KeyshareEvent::ValidatorRemoved {
            validator: record.validator,
            reason,
        });
    }

    Ok(events)
}

/// Overwrite the validator's last-submitted height.
pub(crate) fn record_submission(
    keeper: &mut Keeper<'_>,
    validator: &str,
    height: u64,
) -> KeyshareResult<()> {
    keeper.set_last_submitted_height(validator, height)?;
    debug!(validator, height, "[qc-18] Keyshare submission recorded");
    Ok(())
}
