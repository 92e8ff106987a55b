//! # Block Lifecycle
//!
//! Runs many consecutive blocks and checks the interplay of pruning,
//! submissions, slashing, rotation and dispatch.

#[cfg(test)]
mod tests {
    use super::super::{block, Chain, SECOND};
    use qc_18_keyshare::domain::packet::{decode_keyshare_packet, keyshare_packet_data};
    use qc_18_keyshare::{
        BondStatus, ConsensusAddress, KeyShareRequest, KeySlot, Keeper, KeyshareEvent,
        KeyshareModule, PubKeyRecord, ValidatorRecord,
    };
    use shared_types::ChannelEndpoint;

    fn add_validator(chain: &mut Chain, name: &str, addr_byte: u8) {
        chain.staking.set_status(name, BondStatus::Bonded);
        Keeper::new(&mut chain.store)
            .set_validator(&ValidatorRecord::new(name, ConsensusAddress::new([addr_byte; 20])))
            .unwrap();
    }

    /// Run blocks `from..=to`. `submit(height)` lists who submits in that block.
    fn run_blocks(
        chain: &mut Chain,
        from: u64,
        to: u64,
        submit: impl Fn(u64) -> Vec<&'static str>,
    ) -> Vec<KeyshareEvent> {
        let mut events = Vec::new();
        for height in from..=to {
            let ctx = block(height);
            events.extend(chain.service.begin_block(&mut chain.store, &ctx).unwrap().events);
            for validator in submit(height) {
                chain
                    .service
                    .record_submission(&mut chain.store, validator, height)
                    .unwrap();
            }
            events.extend(chain.service.end_block(&mut chain.store, &ctx).unwrap().events);
        }
        events
    }

    #[test]
    fn test_slashing_cadence_over_one_hundred_blocks() {
        let mut chain = Chain::new();
        add_validator(&mut chain, "val-diligent", 1);
        add_validator(&mut chain, "val-sporadic", 2);
        add_validator(&mut chain, "val-absent", 3);

        run_blocks(&mut chain, 1, 100, |h| {
            let mut who = vec!["val-diligent"];
            if h % 5 == 0 {
                who.push("val-sporadic");
            }
            who
        });

        let slashes = chain.staking.slashes();
        assert!(slashes
            .iter()
            .all(|s| s.cons_addr == ConsensusAddress::new([3; 20])));
        let heights: Vec<_> = slashes.iter().map(|s| s.infraction_height).collect();
        assert_eq!(heights, vec![9, 19, 29, 39, 49, 59, 69, 79, 89, 99]);
    }

    #[test]
    fn test_unbonding_stops_slashing() {
        let mut chain = Chain::new();
        add_validator(&mut chain, "val-absent", 3);

        run_blocks(&mut chain, 1, 34, |_| vec![]);
        chain.staking.set_status("val-absent", BondStatus::Unbonding);
        let events = run_blocks(&mut chain, 35, 80, |_| vec![]);

        assert_eq!(chain.staking.slashes().len(), 3);
        assert!(matches!(
            &events[0],
            KeyshareEvent::ValidatorRemoved { validator, .. } if validator == "val-absent"
        ));
        assert!(Keeper::new(&mut chain.store)
            .validator_set()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_dispatch_survives_channel_outage() {
        let mut chain = Chain::new();
        let channel = ChannelEndpoint::new("keyshare", "channel-3");
        let mut request = KeyShareRequest::new("id-42", "pk", channel.clone(), "proposal-9");
        Keeper::new(&mut chain.store)
            .set_key_share_request(&request)
            .unwrap();
        chain.transport.close_channel(channel.clone());

        // Pending: nothing to send yet.
        run_blocks(&mut chain, 1, 4, |_| vec![]);
        assert_eq!(chain.transport.attempts(), 0);

        request.aggr_keyshare = "aggregated".to_string();
        Keeper::new(&mut chain.store)
            .set_key_share_request(&request)
            .unwrap();
        let failures = run_blocks(&mut chain, 5, 7, |_| vec![]);
        assert_eq!(failures.len(), 3);
        assert!(failures
            .iter()
            .all(|e| matches!(e, KeyshareEvent::AggrKeysharePacketFailed { .. })));

        chain.transport.open_channel(&channel);
        run_blocks(&mut chain, 8, 12, |_| vec![]);

        let sent = chain.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(chain.transport.attempts(), 4);
        assert_eq!(sent[0].timeout_timestamp, block(8).time_unix_nanos + 20 * SECOND);

        let packet = decode_keyshare_packet(&sent[0].data).unwrap();
        match packet.packet {
            Some(keyshare_packet_data::Packet::AggrKeyshareDataPacket(data)) => {
                assert_eq!(data.aggr_height, "8");
                assert_eq!(data.identity, "id-42");
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }

    #[test]
    fn test_three_epochs_roll_through() {
        let mut chain = Chain::new();
        let epochs = [
            PubKeyRecord::new(vec![1; 48], "creator-1", 20),
            PubKeyRecord::new(vec![2; 48], "creator-2", 40),
            PubKeyRecord::new(vec![3; 48], "creator-3", 60),
        ];
        Keeper::new(&mut chain.store)
            .set_pub_key(KeySlot::Active, &epochs[0])
            .unwrap();
        Keeper::new(&mut chain.store)
            .set_pub_key(KeySlot::Queued, &epochs[1])
            .unwrap();

        run_blocks(&mut chain, 1, 25, |_| vec![]);
        assert_eq!(
            Keeper::new(&mut chain.store).pub_key(KeySlot::Active).unwrap(),
            Some(epochs[1].clone())
        );

        // The next epoch is queued while the second is live.
        Keeper::new(&mut chain.store)
            .set_pub_key(KeySlot::Queued, &epochs[2])
            .unwrap();
        run_blocks(&mut chain, 26, 45, |_| vec![]);
        assert_eq!(
            Keeper::new(&mut chain.store).pub_key(KeySlot::Active).unwrap(),
            Some(epochs[2].clone())
        );

        let events = run_blocks(&mut chain, 46, 70, |_| vec![]);
        assert!(Keeper::new(&mut chain.store)
            .pub_key(KeySlot::Active)
            .unwrap()
            .is_none());
        assert_eq!(
            events,
            vec![KeyshareEvent::ActivePubKeyExpired {
                creator: "creator-3".into(),
                expiry: 60,
            }]
        );
        assert_eq!(chain.peer.active(), None);
    }
}
