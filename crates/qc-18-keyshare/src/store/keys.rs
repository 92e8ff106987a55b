//! Store key layout

pub const VALIDATOR_SET_PREFIX: &[u8] = b"ValidatorSet/value/";
pub const LAST_SUBMITTED_HEIGHT_PREFIX: &[u8] = b"LastSubmittedHeight/value/";
pub const KEY_SHARE_REQUEST_PREFIX: &[u8] = b"KeyShareRequest/value/";

pub const ACTIVE_PUB_KEY: &[u8] = b"ActivePubKey";
pub const QUEUED_PUB_KEY: &[u8] = b"QueuedPubKey";
pub const ACTIVE_COMMITMENTS: &[u8] = b"ActiveCommitments";
pub const QUEUED_COMMITMENTS: &[u8] = b"QueuedCommitments";
pub const PARAMS: &[u8] = b"Params";

pub fn validator_set_key(validator: &str) -> Vec<u8> {
    prefixed(VALIDATOR_SET_PREFIX, validator)
}

pub fn last_submitted_height_key(validator: &str) -> Vec<u8> {
    prefixed(LAST_SUBMITTED_HEIGHT_PREFIX, validator)
}

pub fn key_share_request_key(identity: &str) -> Vec<u8> {
    prefixed(KEY_SHARE_REQUEST_PREFIX, identity)
}

fn prefixed(prefix: &[u8], id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + id.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(id.as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_keys() {
        assert_eq!(validator_set_key("val-1"), b"ValidatorSet/value/val-1".to_vec());
        assert!(last_submitted_height_key("v").starts_with(LAST_SUBMITTED_HEIGHT_PREFIX));
        assert!(key_share_request_key("id").starts_with(KEY_SHARE_REQUEST_PREFIX));
    }
}
