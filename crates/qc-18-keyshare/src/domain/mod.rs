//! Domain module for Keyshare subsystem
//!
//! - params: governance parameters
//! - validator: keyshare validator set entries
//! - pubkey: active/queued key epoch records
//! - request: aggregated keyshare requests
//! - packet: cross-chain packet schema

pub mod packet;
pub mod params;
pub mod pubkey;
pub mod request;
pub mod validator;

pub use packet::{
    AggrKeyshareDataPacketData, CurrentKeysPacketAck, KeysharePacketData, PacketAck,
    PepPacketData,
};
pub use params::{Params, DEFAULT_MAX_IDLED_BLOCK, DEFAULT_SLASH_POWER};
pub use pubkey::{Commitments, KeySlot, PubKeyRecord};
pub use request::{KeyShareRequest, RequestStatus};
pub use validator::{ConsensusAddress, ValidatorRecord};
