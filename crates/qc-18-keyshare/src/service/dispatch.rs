//! Aggregated keyshare dispatch and the current-keys handshake

use crate::domain::packet::decode_current_keys_ack;
use crate::domain::{
    AggrKeyshareDataPacketData, CurrentKeysPacketAck, KeyShareRequest, KeySlot,
    KeysharePacketData, PacketAck, PubKeyRecord,
};
use crate::error::KeyshareResult;
use crate::events::KeyshareEvent;
use crate::metrics;
use crate::ports::outbound::ChannelTransport;
use crate::store::Keeper;
use prost::Message;
use shared_types::{BlockContext, TimeoutHeight};
use std::time::Duration;
use tracing::{info, warn};

/// Send every aggregated, unsent keyshare request.
///
/// A request is marked sent only when the transport accepts the packet.
/// Rejected requests stay eligible and are attempted again next block.
pub(crate) fn dispatch_aggr_keyshares<T>(
    keeper: &mut Keeper<'_>,
    transport: &T,
    block: &BlockContext,
    packet_timeout: Duration,
) -> KeyshareResult<Vec<KeyshareEvent>>
where
    T: ChannelTransport + ?Sized,
{
    let timeout_timestamp = block.timestamp_after(packet_timeout);
    let mut events = Vec::new();

    let requests = keeper.key_share_requests()?;
    for mut request in requests
        .into_iter()
        .filter(KeyShareRequest::is_dispatchable)
    {
        let packet = aggr_keyshare_packet(&request, block.height);

        match transport.send_packet(
            packet.encode_to_vec(),
            &request.ibc_info,
            TimeoutHeight::ZERO,
            timeout_timestamp,
        ) {
            Ok(sequence) => {
                request.sent = true;
                keeper.set_key_share_request(&request)?;

                metrics::record_packet_sent();
                info!(
                    identity = %request.identity,
                    channel = %request.ibc_info,
                    sequence,
                    timeout_timestamp,
                    "[qc-18] Aggregated keyshare transmitted"
                );
                events.push(KeyshareEvent::AggrKeysharePacketSent {
                    identity: request.identity,
                    sequence,
                    timeout_timestamp,
                });
            }
            Err(e) => {
                metrics::record_packet_failed();
                warn!(
                    identity = %request.identity,
                    channel = %request.ibc_info,
                    error = %e,
                    "[qc-18] Aggregated keyshare transmission failed"
                );
                events.push(KeyshareEvent::AggrKeysharePacketFailed {
                    identity: request.identity,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(events)
}

fn aggr_keyshare_packet(request: &KeyShareRequest, height: u64) -> KeysharePacketData {
    KeysharePacketData::aggr_keyshare(AggrKeyshareDataPacketData {
        identity: request.identity.clone(),
        pubkey: request.pubkey.clone(),
        aggr_keyshare: request.aggr_keyshare.clone(),
        aggr_height: height.to_string(),
        proposal_id: request.proposal_id.clone(),
    })
}

/// Apply the counterparty's acknowledgement of a current-keys request.
///
/// Each key carried by the ack overwrites the matching local slot; a key
/// missing from the ack leaves that slot alone. Replacing a key with a
/// different one discards that slot's commitments.
pub(crate) fn apply_current_keys_ack(
    keeper: &mut Keeper<'_>,
    ack: &PacketAck,
) -> KeyshareResult<Vec<KeyshareEvent>> {
    let bytes = match ack {
        PacketAck::Result(bytes) => bytes,
        PacketAck::Error(error) => {
            warn!(error = %error, "[qc-18] Current keys request acknowledged with error");
            return Ok(vec![KeyshareEvent::AcknowledgementError {
                error: error.clone(),
            }]);
        }
    };

    let payload = decode_current_keys_ack(bytes)?;
    let active_updated = match payload.active_key {
        Some(key) => {
            replace_slot_key(keeper, KeySlot::Active, PubKeyRecord::from(key))?;
            true
        }
        None => false,
    };
    let queued_updated = match payload.queued_key {
        Some(key) => {
            replace_slot_key(keeper, KeySlot::Queued, PubKeyRecord::from(key))?;
            true
        }
        None => false,
    };

    info!(
        active_updated,
        queued_updated, "[qc-18] Current keys acknowledgement applied"
    );
    Ok(vec![KeyshareEvent::CurrentKeysAcknowledged {
        active_updated,
        queued_updated,
    }])
}

/// Commitments belong to the key they were stored with, so a different
/// incoming key drops them along with the old key.
fn replace_slot_key(keeper: &mut Keeper<'_>, slot: KeySlot, key: PubKeyRecord) -> KeyshareResult<()> {
    if keeper.pub_key(slot)?.as_ref() != Some(&key) {
        keeper.clear_slot(slot)?;
    }
    keeper.set_pub_key(slot, &key)
}

/// Build the answer to a current-keys request from the local pair.
pub(crate) fn current_keys_ack(keeper: &Keeper<'_>) -> KeyshareResult<CurrentKeysPacketAck> {
    let active = keeper.pub_key(KeySlot::Active)?;
    let queued = keeper.pub_key(KeySlot::Queued)?;
    Ok(CurrentKeysPacketAck::from_records(
        active.as_ref(),
        queued.as_ref(),
    ))
}
