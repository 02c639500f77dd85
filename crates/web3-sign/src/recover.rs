//! Signer recovery.
//!
//! Two entry points exist and must not be merged: [`ec_recover`] runs
//! recovery against the digest exactly as given, [`personal_ec_recover`]
//! applies the personal-message prefix first. A signature produced over a raw
//! hash only recovers through the former.

use alloy_primitives::{Address, B256};
use k256::ecdsa::VerifyingKey;

use crate::address::address_from_verifying_key;
use crate::error::SignError;
use crate::prefix::prefixed_hash;
use crate::signature::EthSignature;

/// Recovers the public key that produced `signature` over `digest`.
pub fn recover_verifying_key(
    digest: &B256,
    signature: &EthSignature,
) -> Result<VerifyingKey, SignError> {
    let (k_sig, recovery_id) = signature.encode_for_recovery()?;
    VerifyingKey::recover_from_prehash(digest.as_slice(), &k_sig, recovery_id)
        .map_err(|e| SignError::RecoveryError(format!("no public key for signature: {e}")))
}

/// Recovers the signer of `digest` with no implicit prefixing.
///
/// If the signature was made over a personal message, the caller must pass
/// the prefixed hash.
pub fn ec_recover(digest: &B256, signature: &[u8]) -> Result<Address, SignError> {
    ec_recover_signature(digest, &EthSignature::decode(signature)?)
}

/// [`ec_recover`] for a signature that is already decoded.
pub fn ec_recover_signature(
    digest: &B256,
    signature: &EthSignature,
) -> Result<Address, SignError> {
    let key = recover_verifying_key(digest, signature)?;
    let address = address_from_verifying_key(&key);
    tracing::debug!(%digest, %address, "recovered signer");
    Ok(address)
}

/// Recovers the signer of a personal-message signature over `digest`.
pub fn personal_ec_recover(digest: &B256, signature: &[u8]) -> Result<Address, SignError> {
    personal_ec_recover_signature(digest, &EthSignature::decode(signature)?)
}

/// [`personal_ec_recover`] for a signature that is already decoded.
pub fn personal_ec_recover_signature(
    digest: &B256,
    signature: &EthSignature,
) -> Result<Address, SignError> {
    ec_recover_signature(&prefixed_hash(digest), signature)
}

/// Recovers the signer, prefixing `digest` unless `already_prefixed` is set.
pub fn recover(
    digest: &B256,
    signature: &[u8],
    already_prefixed: bool,
) -> Result<Address, SignError> {
    if already_prefixed {
        ec_recover(digest, signature)
    } else {
        personal_ec_recover(digest, signature)
    }
}

/// Checks that a personal-message signature over `digest` came from `expected`.
pub fn verify_signer(
    digest: &B256,
    signature: &[u8],
    expected: &Address,
) -> Result<bool, SignError> {
    Ok(personal_ec_recover(digest, signature)? == *expected)
}
