//! # Node Runtime
//!
//! Drives the devnet node for a few epochs and checks that what reached the
//! transport decodes into the expected aggregated keyshare packets.

#[cfg(test)]
mod tests {
    use super::super::SECOND;
    use node_runtime::{GenesisConfig, KeyshareNode};
    use qc_18_keyshare::domain::packet::{decode_keyshare_packet, keyshare_packet_data};
    use qc_18_keyshare::{Keeper, KeyshareConfig, KeyshareEvent, RequestStatus};
    use std::time::Duration;

    fn run(node: &KeyshareNode, blocks: u64) -> Vec<KeyshareEvent> {
        let mut events = Vec::new();
        for _ in 0..blocks {
            let height = node.height() + 1;
            events.extend(node.produce_block(height * SECOND).unwrap().events);
        }
        events
    }

    #[test]
    fn test_devnet_sixty_blocks() {
        let node =
            KeyshareNode::from_genesis(KeyshareConfig::default(), &GenesisConfig::devnet()).unwrap();

        let events = run(&node, 60);

        let slashed = events
            .iter()
            .filter(|e| matches!(e, KeyshareEvent::ValidatorSlashed { .. }))
            .count();
        assert_eq!(slashed, 6);

        let transitions: Vec<_> = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    KeyshareEvent::ActivePubKeyExpired { .. }
                        | KeyshareEvent::QueuedPubKeyPromoted { .. }
                )
            })
            .cloned()
            .collect();
        assert_eq!(transitions.len(), 3);

        let statuses: Vec<_> = node.with_store(|store| {
            Keeper::new(store)
                .key_share_requests()
                .unwrap()
                .into_iter()
                .map(|r| r.status())
                .collect()
        });
        assert_eq!(statuses, vec![RequestStatus::Dispatched, RequestStatus::Pending]);
    }

    #[test]
    fn test_devnet_packet_contents() {
        let config = KeyshareConfig::default().with_packet_timeout(Duration::from_secs(7));
        let node = KeyshareNode::from_genesis(config, &GenesisConfig::devnet()).unwrap();

        run(&node, 2);

        let delivered = node.transport().drain();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].timeout_timestamp, SECOND + 7 * SECOND);

        match decode_keyshare_packet(&delivered[0].data).unwrap().packet {
            Some(keyshare_packet_data::Packet::AggrKeyshareDataPacket(data)) => {
                assert_eq!(data.identity, "devnet-id-1");
                assert_eq!(data.aggr_keyshare, "c0ffee");
                assert_eq!(data.aggr_height, "1");
                assert_eq!(data.proposal_id, "1");
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }
}
