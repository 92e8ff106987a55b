//! Keyshare liveness slashing
//!
//! A validator is idle once `last_submitted_height + max_idled_block <= height`.
//! With a window of 10 and a last submission at 0, the slash lands at
//! height 10, not 11.
//!
//! After a slash the validator's last-submitted height is reset to the
//! current height, so one prolonged absence is penalized once per window.

use crate::error::KeyshareResult;
use crate::events::KeyshareEvent;
use crate::metrics;
use crate::ports::outbound::StakingView;
use crate::store::Keeper;
use shared_types::BlockContext;
use tracing::{error, info};

/// Whether a validator last seen at `last_submitted_height` is past its window.
pub fn is_idle(last_submitted_height: u64, max_idled_block: u64, height: u64) -> bool {
    last_submitted_height.saturating_add(max_idled_block) <= height
}

/// Slash every idle validator still in the set.
pub(crate) fn slash_idle_validators<K>(
    keeper: &mut Keeper<'_>,
    staking: &K,
    block: &BlockContext,
) -> KeyshareResult<Vec<KeyshareEvent>>
where
    K: StakingView + ?Sized,
{
    let params = keeper.params()?;
    let mut events = Vec::new();

    for record in keeper.validator_set()? {
        let last_submitted_height = keeper.last_submitted_height(&record.validator)?;
        if !is_idle(last_submitted_height, params.max_idled_block, block.height) {
            continue;
        }

        // Retried next block: the last-submitted height is left untouched.
        let cons_addr = match record.consensus_address() {
            Ok(addr) => addr,
            Err(e) => {
                error!(
                    validator = %record.validator,
                    error = %e,
                    "[qc-18] Error while decoding validator cons addr"
                );
                metrics::record_slash_skipped();
                events.push(KeyshareEvent::SlashSkipped {
                    validator: record.validator,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let infraction_height = block.previous_height();
        staking.slash(
            &cons_addr,
            infraction_height,
            params.slash_power,
            params.slash_fraction_no_keyshare,
        );
        keeper.set_last_submitted_height(&record.validator, block.height)?;

        metrics::record_validator_slashed();
        info!(
            validator = %record.validator,
            cons_addr = %cons_addr,
            last_submitted_height,
            infraction_height,
            fraction = %params.slash_fraction_no_keyshare,
            "[qc-18] Idle validator slashed"
        );
        events.push(KeyshareEvent::ValidatorSlashed {
            validator: record.validator,
            cons_addr: cons_addr.to_hex(),
            infraction_height,
            last_submitted_height,
        });
    }

    Ok(events)
}
