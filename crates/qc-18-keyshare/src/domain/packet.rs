//! Cross-chain packet schema
//!
//! Protobuf messages exchanged with the peer chain. Packet envelopes are
//! `oneof` unions, exposed here as Rust enums.
//!
//! ```text
//! Keyshare (18) ──KeysharePacketData::AggrKeyshareDataPacket──→ Peer
//! Peer ──PepPacketData::CurrentKeysPacket──→ Keyshare (18)
//! Keyshare (18) ──PacketAck::Result(CurrentKeysPacketAck)──→ Peer
//! ```

use crate::domain::pubkey::PubKeyRecord;
use crate::error::KeyshareResult;
use prost::Message;

/// Empty marker packet.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NoData {}

/// Request for the counterparty's current key pair.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrentKeysPacketData {}

/// Envelope of packets sent by the peer key registry.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PepPacketData {
    #[prost(oneof = "pep_packet_data::Packet", tags = "1, 2")]
    pub packet: ::core::option::Option<pep_packet_data::Packet>,
}

pub mod pep_packet_data {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Packet {
        #[prost(message, tag = "1")]
        NoData(super::NoData),
        #[prost(message, tag = "2")]
        CurrentKeysPacket(super::CurrentKeysPacketData),
    }
}

impl PepPacketData {
    pub fn no_data() -> Self {
        Self {
            packet: Some(pep_packet_data::Packet::NoData(NoData {})),
        }
    }

    pub fn current_keys_request() -> Self {
        Self {
            packet: Some(pep_packet_data::Packet::CurrentKeysPacket(
                CurrentKeysPacketData {},
            )),
        }
    }

    pub fn is_current_keys_request(&self) -> bool {
        matches!(
            self.packet,
            Some(pep_packet_data::Packet::CurrentKeysPacket(_))
        )
    }
}

/// Active key as carried on the wire.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActivePubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub public_key: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "2")]
    pub creator: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub expiry: u64,
}

/// Queued key as carried on the wire.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueuedPubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub public_key: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "2")]
    pub creator: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub expiry: u64,
}

macro_rules! impl_pubkey_conversions {
    ($wire:ty) => {
        impl From<&PubKeyRecord> for $wire {
            fn from(key: &PubKeyRecord) -> Self {
                Self {
                    public_key: key.public_key.clone(),
                    creator: key.creator.clone(),
                    expiry: key.expiry,
                }
            }
        }

        impl From<$wire> for PubKeyRecord {
            fn from(key: $wire) -> Self {
                PubKeyRecord::new(key.public_key, key.creator, key.expiry)
            }
        }
    };
}

impl_pubkey_conversions!(ActivePubKey);
impl_pubkey_conversions!(QueuedPubKey);

/// Acknowledgement payload answering a current-keys request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrentKeysPacketAck {
    #[prost(message, optional, tag = "1")]
    pub active_key: ::core::option::Option<ActivePubKey>,
    #[prost(message, optional, tag = "2")]
    pub queued_key: ::core::option::Option<QueuedPubKey>,
}

impl CurrentKeysPacketAck {
    pub fn from_records(active: Option<&PubKeyRecord>, queued: Option<&PubKeyRecord>) -> Self {
        Self {
            active_key: active.map(ActivePubKey::from),
            queued_key: queued.map(QueuedPubKey::from),
        }
    }
}

/// Aggregated keyshare delivered to the requester's chain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AggrKeyshareDataPacketData {
    #[prost(string, tag = "1")]
    pub identity: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub pubkey: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub aggr_keyshare: ::prost::alloc::string::String,
    /// Height the keyshare was aggregated at, decimal
    #[prost(string, tag = "4")]
    pub aggr_height: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub proposal_id: ::prost::alloc::string::String,
}

/// Envelope of packets sent by the keyshare module.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeysharePacketData {
    #[prost(oneof = "keyshare_packet_data::Packet", tags = "1, 2")]
    pub packet: ::core::option::Option<keyshare_packet_data::Packet>,
}

pub mod keyshare_packet_data {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Packet {
        #[prost(message, tag = "1")]
        NoData(super::NoData),
        #[prost(message, tag = "2")]
        AggrKeyshareDataPacket(super::AggrKeyshareDataPacketData),
    }
}

impl KeysharePacketData {
    pub fn aggr_keyshare(data: AggrKeyshareDataPacketData) -> Self {
        Self {
            packet: Some(keyshare_packet_data::Packet::AggrKeyshareDataPacket(data)),
        }
    }
}

/// Channel acknowledgement envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketAck {
    /// Successful acknowledgement with an encoded payload
    Result(Vec<u8>),
    /// Counterparty reported an error
    Error(String),
}

impl PacketAck {
    pub fn current_keys(ack: &CurrentKeysPacketAck) -> Self {
        Self::Result(ack.encode_to_vec())
    }
}

/// Decode a [`KeysharePacketData`] envelope.
pub fn decode_keyshare_packet(bytes: &[u8]) -> KeyshareResult<KeysharePacketData> {
    Ok(KeysharePacketData::decode(bytes)?)
}

/// Decode a [`PepPacketData`] envelope.
pub fn decode_pep_packet(bytes: &[u8]) -> KeyshareResult<PepPacketData> {
    Ok(PepPacketData::decode(bytes)?)
}

/// Decode a [`CurrentKeysPacketAck`] payload.
pub fn decode_current_keys_ack(bytes: &[u8]) -> KeyshareResult<CurrentKeysPacketAck> {
    Ok(CurrentKeysPacketAck::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyshareError;

    #[test]
    fn test_current_keys_request_discriminant() {
        let bytes = PepPacketData::current_keys_request().encode_to_vec();
        let decoded = decode_pep_packet(&bytes).unwrap();
        assert!(decoded.is_current_keys_request());

        let bytes = PepPacketData::no_data().encode_to_vec();
        assert!(!decode_pep_packet(&bytes).unwrap().is_current_keys_request());
    }

    #[test]
    fn test_oneof_uses_field_tag_two_for_current_keys() {
        // Field 2, wire type 2 (length-delimited), zero-length body.
        let bytes = PepPacketData::current_keys_request().encode_to_vec();
        assert_eq!(bytes, vec![0x12, 0x00]);
    }

    #[test]
    fn test_ack_carries_optional_keys() {
        let active = PubKeyRecord::new(vec![1; 48], "alice", 100);
        let ack = CurrentKeysPacketAck::from_records(Some(&active), None);
        let decoded = decode_current_keys_ack(&ack.encode_to_vec()).unwrap();

        assert_eq!(decoded.queued_key, None);
        let restored: PubKeyRecord = decoded.active_key.unwrap().into();
        assert_eq!(restored, active);
    }

    #[test]
    fn test_aggr_keyshare_packet_fields() {
        let packet = KeysharePacketData::aggr_keyshare(AggrKeyshareDataPacketData {
            identity: "id-1".into(),
            pubkey: "pk".into(),
            aggr_keyshare: "aggr".into(),
            aggr_height: "42".into(),
            proposal_id: "9".into(),
        });
        let decoded = decode_keyshare_packet(&packet.encode_to_vec()).unwrap();
        match decoded.packet {
            Some(keyshare_packet_data::Packet::AggrKeyshareDataPacket(data)) => {
                assert_eq!(data.identity, "id-1");
                assert_eq!(data.aggr_height, "42");
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_ack_is_codec_error() {
        let active = PubKeyRecord::new(vec![9; 16], "bob", 5);
        let mut bytes = CurrentKeysPacketAck::from_records(Some(&active), None).encode_to_vec();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            decode_current_keys_ack(&bytes),
            Err(KeyshareError::Codec { .. })
        ));
    }
}
