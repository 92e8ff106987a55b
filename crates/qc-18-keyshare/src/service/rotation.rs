//! Key epoch rotation
//!
//! ```text
//!            ┌──────────── expiry > h ───────────┐
//!            │  refresh Active (+ Queued), stop  │
//! [ACTIVE] ──┤                                   │
//!            │  expiry <= h: drop Active ────────┼──→ [QUEUED?]
//!            └───────────────────────────────────┘        │
//!                                       expiry > h: promote to Active
//!                                       always: drop Queued
//! ```
//!
//! Driven purely by block height, so every replica reaches the same pair.

use crate::domain::{KeySlot, PubKeyRecord};
use crate::error::KeyshareResult;
use crate::events::KeyshareEvent;
use crate::metrics;
use crate::ports::outbound::PeerKeyRegistry;
use crate::store::Keeper;
use tracing::{debug, info, warn};

/// Advance the (Active, Queued) pair for the block at `height`.
pub(crate) fn rotate_pub_keys<P>(
    keeper: &mut Keeper<'_>,
    peer: &P,
    height: u64,
) -> KeyshareResult<Vec<KeyshareEvent>>
where
    P: PeerKeyRegistry + ?Sized,
{
    keeper.check_slot_invariant(KeySlot::Active)?;
    keeper.check_slot_invariant(KeySlot::Queued)?;

    let mut events = Vec::new();
    let active = keeper.pub_key(KeySlot::Active)?;
    let queued = keeper.pub_key(KeySlot::Queued)?;

    if let Some(active) = active {
        keeper.set_pub_key(KeySlot::Active, &active)?;
        peer.set_active_pub_key(&active);

        if !active.is_expired_at(height) {
            if let Some(queued) = &queued {
                keeper.set_pub_key(KeySlot::Queued, queued)?;
                peer.set_queued_pub_key(queued);
            }
            debug!(
                height,
                expiry = active.expiry,
                queued = queued.is_some(),
                "[qc-18] Active key still live"
            );
            return Ok(events);
        }

        expire_active(keeper, peer, &active, height)?;
        events.push(KeyshareEvent::ActivePubKeyExpired {
            creator: active.creator,
            expiry: active.expiry,
        });
    }

    if let Some(queued) = queued {
        events.push(advance_queued(keeper, peer, queued, height)?);
    }

    Ok(events)
}

fn expire_active<P>(
    keeper: &mut Keeper<'_>,
    peer: &P,
    active: &PubKeyRecord,
    height: u64,
) -> KeyshareResult<()>
where
    P: PeerKeyRegistry + ?Sized,
{
    keeper.clear_slot(KeySlot::Active)?;
    peer.delete_active_pub_key();
    peer.delete_active_commitments();

    metrics::record_pub_key_transition("expired");
    info!(
        height,
        expiry = active.expiry,
        creator = %active.creator,
        "[qc-18] Active key expired"
    );
    Ok(())
}

/// Promote the queued key if it is still live, then drop the queued slot.
fn advance_queued<P>(
    keeper: &mut Keeper<'_>,
    peer: &P,
    queued: PubKeyRecord,
    height: u64,
) -> KeyshareResult<KeyshareEvent>
where
    P: PeerKeyRegistry + ?Sized,
{
    let queued_commitments = keeper.commitments(KeySlot::Queued)?;

    let event = if !queued.is_expired_at(height) {
        keeper.set_pub_key(KeySlot::Active, &queued)?;
        peer.set_active_pub_key(&queued);
        if let Some(commitments) = &queued_commitments {
            keeper.set_commitments(KeySlot::Active, commitments)?;
        }

        metrics::record_pub_key_transition("promoted");
        info!(
            height,
            expiry = queued.expiry,
            creator = %queued.creator,
            "[qc-18] Queued key promoted to active"
        );
        KeyshareEvent::QueuedPubKeyPromoted {
            creator: queued.creator,
            expiry: queued.expiry,
        }
    } else {
        // Expired while waiting in the queue; it never becomes active.
        metrics::record_pub_key_transition("discarded");
        warn!(
            height,
            expiry = queued.expiry,
            creator = %queued.creator,
            "[qc-18] Queued key expired before promotion, discarding"
        );
        KeyshareEvent::QueuedPubKeyDiscarded {
            creator: queued.creator,
            expiry: queued.expiry,
        }
    };

    keeper.clear_slot(KeySlot::Queued)?;
    peer.delete_queued_pub_key();
    if queued_commitments.is_some() {
        peer.delete_queued_commitments();
    }

    Ok(event)
}
