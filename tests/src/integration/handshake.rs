//! # Current-Keys Handshake
//!
//! A consumer chain asks the keyshare chain for its current keys:
//!
//! ```text
//! Consumer ──PepPacketData::CurrentKeysPacket──→ Keyshare
//!     ↑                                              │
//!     └─────────── CurrentKeysPacketAck ─────────────┘
//! ```
//!
//! The consumer applies the ack to its own key slots, after which its
//! rotation proceeds from the same pair as the keyshare chain.

#[cfg(test)]
mod tests {
    use super::super::{block, Chain};
    use qc_18_keyshare::domain::packet::decode_pep_packet;
    use qc_18_keyshare::{
        Keeper, KeySlot, KeyshareError, KeyshareEvent, KeyshareModule, PacketAck, PepPacketData,
        PubKeyRecord,
    };
    use prost::Message;

    fn key(tag: u8, expiry: u64) -> PubKeyRecord {
        PubKeyRecord::new(vec![tag; 48], format!("creator-{}", tag), expiry)
    }

    /// Keyshare side: decode the request and answer it from local state.
    fn answer(provider: &mut Chain, request: &[u8]) -> PacketAck {
        let packet = decode_pep_packet(request).unwrap();
        assert!(packet.is_current_keys_request());
        let ack = provider.service.current_keys_ack(&mut provider.store).unwrap();
        PacketAck::current_keys(&ack)
    }

    #[test]
    fn test_consumer_mirrors_provider_keys() {
        let mut provider = Chain::new();
        let mut consumer = Chain::new();
        Keeper::new(&mut provider.store)
            .set_pub_key(KeySlot::Active, &key(1, 100))
            .unwrap();
        Keeper::new(&mut provider.store)
            .set_pub_key(KeySlot::Queued, &key(2, 200))
            .unwrap();

        let request = PepPacketData::current_keys_request().encode_to_vec();
        let ack = answer(&mut provider, &request);
        let events = consumer
            .service
            .on_acknowledgement(&mut consumer.store, &ack)
            .unwrap();

        assert_eq!(
            events,
            vec![KeyshareEvent::CurrentKeysAcknowledged {
                active_updated: true,
                queued_updated: true,
            }]
        );
        let consumer_keeper = Keeper::new(&mut consumer.store);
        assert_eq!(consumer_keeper.pub_key(KeySlot::Active).unwrap(), Some(key(1, 100)));
        assert_eq!(consumer_keeper.pub_key(KeySlot::Queued).unwrap(), Some(key(2, 200)));
    }

    #[test]
    fn test_both_chains_rotate_in_lockstep_after_handshake() {
        let mut provider = Chain::new();
        let mut consumer = Chain::new();
        Keeper::new(&mut provider.store)
            .set_pub_key(KeySlot::Active, &key(1, 10))
            .unwrap();
        Keeper::new(&mut provider.store)
            .set_pub_key(KeySlot::Queued, &key(2, 30))
            .unwrap();

        let request = PepPacketData::current_keys_request().encode_to_vec();
        let ack = answer(&mut provider, &request);
        consumer
            .service
            .on_acknowledgement(&mut consumer.store, &ack)
            .unwrap();

        for height in 1..=15 {
            provider
                .service
                .execute_block(&mut provider.store, &block(height))
                .unwrap();
            consumer
                .service
                .execute_block(&mut consumer.store, &block(height))
                .unwrap();
        }

        let provider_active = Keeper::new(&mut provider.store)
            .pub_key(KeySlot::Active)
            .unwrap();
        let consumer_active = Keeper::new(&mut consumer.store)
            .pub_key(KeySlot::Active)
            .unwrap();
        assert_eq!(provider_active, Some(key(2, 30)));
        assert_eq!(provider_active, consumer_active);
    }

    #[test]
    fn test_empty_provider_leaves_consumer_untouched() {
        let mut provider = Chain::new();
        let mut consumer = Chain::new();
        Keeper::new(&mut consumer.store)
            .set_pub_key(KeySlot::Active, &key(9, 500))
            .unwrap();

        let request = PepPacketData::current_keys_request().encode_to_vec();
        let ack = answer(&mut provider, &request);
        consumer
            .service
            .on_acknowledgement(&mut consumer.store, &ack)
            .unwrap();

        assert_eq!(
            Keeper::new(&mut consumer.store)
                .pub_key(KeySlot::Active)
                .unwrap(),
            Some(key(9, 500))
        );
    }

    #[test]
    fn test_error_and_garbage_acks() {
        let mut consumer = Chain::new();

        let events = consumer
            .service
            .on_acknowledgement(&mut consumer.store, &PacketAck::Error("closed".into()))
            .unwrap();
        assert!(matches!(events[0], KeyshareEvent::AcknowledgementError { .. }));

        let err = consumer
            .service
            .on_acknowledgement(&mut consumer.store, &PacketAck::Result(vec![0x0A, 0x05]))
            .unwrap_err();
        assert!(matches!(err, KeyshareError::Codec { .. }));
    }
}
