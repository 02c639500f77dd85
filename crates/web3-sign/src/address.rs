use std::str::FromStr;

use alloy_primitives::Address;
use k256::ecdsa::VerifyingKey;
use sha3::{Digest, Keccak256};

use crate::error::SignError;

/// Derives the Ethereum address of a secp256k1 verifying key.
///
/// The address is the last 20 bytes of the Keccak-256 hash of the 64-byte
/// uncompressed public key (the 0x04 SEC1 tag is not hashed).
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let uncompressed = key.to_encoded_point(false);
    let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Derives an address from a SEC1-encoded public key, compressed (33 bytes)
/// or uncompressed (65 bytes).
pub fn address_from_sec1_bytes(pubkey: &[u8]) -> Result<Address, SignError> {
    let key = VerifyingKey::from_sec1_bytes(pubkey)
        .map_err(|e| SignError::InvalidPublicKey(format!("not a secp256k1 point: {e}")))?;
    Ok(address_from_verifying_key(&key))
}

/// Parses a 0x-prefixed address string.
///
/// All-lowercase and all-uppercase inputs carry no checksum and are accepted
/// as-is. Mixed-case input must match its EIP-55 checksum.
pub fn parse_address(address: &str) -> Result<Address, SignError> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| SignError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(SignError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SignError::InvalidAddress(
            "address contains non-hex characters".into(),
        ));
    }

    let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());

    if is_all_lower || is_all_upper {
        return Address::from_str(hex_part)
            .map_err(|e| SignError::InvalidAddress(format!("invalid hex: {e}")));
    }

    let normalized = format!("0x{hex_part}");
    Address::parse_checksummed(&normalized, None)
        .map_err(|_| SignError::InvalidAddress(format!("bad EIP-55 checksum: {address}")))
}

/// Renders an address with its EIP-55 mixed-case checksum.
pub fn to_checksum_address(address: &Address) -> String {
    address.to_checksum(None)
}

/// Returns `true` when `address` is exactly the EIP-55 rendering of itself.
pub fn is_checksum_address(address: &str) -> bool {
    match parse_address(address) {
        Ok(parsed) => to_checksum_address(&parsed) == address,
        Err(_) => false,
    }
}
