use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

/// EIP-191 version 0x45 header. The decimal payload length follows it.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Hashes `message` under the personal-message convention:
/// `keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)`.
pub fn hash_personal_message(message: &[u8]) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    B256::from_slice(&hasher.finalize())
}

/// Personal-message hash of a 32-byte digest (the length field is always `32`).
pub fn prefixed_hash(digest: &B256) -> B256 {
    hash_personal_message(digest.as_slice())
}
