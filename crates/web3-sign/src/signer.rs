use std::fmt;

use alloy_primitives::{Address, B256};
use k256::ecdsa::SigningKey;
use rand_core::OsRng;
use zeroize::{Zeroize, Zeroizing};

use crate::address::address_from_verifying_key;
use crate::error::SignError;
use crate::prefix::{hash_personal_message, prefixed_hash};
use crate::signature::EthSignature;

/// A capability that signs 32-byte digests on behalf of one address.
///
/// Implementations may hold a key in memory, or forward to a node or a
/// hardware device. The digest handed to `sign_prehash` is signed as-is.
pub trait Credential {
    /// Address whose key produces the signatures.
    fn address(&self) -> Address;

    /// Signs `digest` without any further hashing or prefixing.
    fn sign_prehash(&self, digest: &B256) -> Result<EthSignature, SignError>;
}

/// An in-memory secp256k1 key. The scalar is zeroized on drop.
pub struct LocalCredential {
    signing_key: SigningKey,
    address: Address,
}

impl LocalCredential {
    /// Builds a credential from a raw 32-byte private key.
    pub fn from_bytes(private_key: &[u8; 32]) -> Result<Self, SignError> {
        let mut key_bytes = *private_key;
        let signing_key = SigningKey::from_bytes((&key_bytes).into())
            .map_err(|e| SignError::InvalidPrivateKey(e.to_string()));
        key_bytes.zeroize();
        Ok(Self::from_signing_key(signing_key?))
    }

    /// Builds a credential from a hex private key, with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self, SignError> {
        let digits = private_key
            .strip_prefix("0x")
            .or_else(|| private_key.strip_prefix("0X"))
            .unwrap_or(private_key);
        let bytes = Zeroizing::new(
            hex::decode(digits)
                .map_err(|e| SignError::InvalidPrivateKey(format!("invalid hex: {e}")))?,
        );
        let key: Zeroizing<[u8; 32]> = Zeroizing::new(bytes.as_slice().try_into().map_err(|_| {
            SignError::InvalidPrivateKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?);
        Self::from_bytes(&key)
    }

    /// Generates a fresh key from the operating system RNG.
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = address_from_verifying_key(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }
}

impl Credential for LocalCredential {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_prehash(&self, digest: &B256) -> Result<EthSignature, SignError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|e| SignError::SigningError(e.to_string()))?;
        EthSignature::from_k256(&signature, recovery_id)
    }
}

impl fmt::Debug for LocalCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCredential")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Signs a 32-byte digest under the personal-message prefix.
///
/// The credential signs `prefixed_hash(digest)`, so the result verifies with
/// `personal_ec_recover(digest, ..)` or `ec_recover(prefixed_hash(digest), ..)`.
pub fn sign_hash<C>(digest: &B256, credential: &C) -> Result<EthSignature, SignError>
where
    C: Credential + ?Sized,
{
    tracing::debug!(signer = %credential.address(), %digest, "signing personal digest");
    credential.sign_prehash(&prefixed_hash(digest))
}

/// Signs arbitrary message bytes under the personal-message prefix.
pub fn sign_message<C>(message: &[u8], credential: &C) -> Result<EthSignature, SignError>
where
    C: Credential + ?Sized,
{
    tracing::debug!(
        signer = %credential.address(),
        len = message.len(),
        "signing personal message"
    );
    credential.sign_prehash(&hash_personal_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::to_checksum_address;

    /// Well-known test private key (DO NOT use on mainnet).
    const TEST_PRIVKEY: [u8; 32] = {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    };

    #[test]
    fn credential_address_matches_known_vector() {
        let cred = LocalCredential::from_bytes(&TEST_PRIVKEY).unwrap();
        assert_eq!(
            to_checksum_address(&cred.address()),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn from_hex_matches_from_bytes() {
        let hex_key = format!("0x{}", hex::encode(TEST_PRIVKEY));
        let a = LocalCredential::from_hex(&hex_key).unwrap();
        let b = LocalCredential::from_bytes(&TEST_PRIVKEY).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn zero_key_is_rejected() {
        assert!(matches!(
            LocalCredential::from_bytes(&[0u8; 32]),
            Err(SignError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn short_hex_key_is_rejected() {
        assert!(matches!(
            LocalCredential::from_hex("0xdeadbeef"),
            Err(SignError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn sign_hash_is_deterministic() {
        let cred = LocalCredential::from_bytes(&TEST_PRIVKEY).unwrap();
        let digest = B256::repeat_byte(0x5a);

        let a = sign_hash(&digest, &cred).unwrap();
        let b = sign_hash(&digest, &cred).unwrap();
        assert_eq!(a, b);
        assert!(a.v() == 27 || a.v() == 28);
    }

    #[test]
    fn sign_hash_signs_the_prefixed_digest() {
        let cred = LocalCredential::from_bytes(&TEST_PRIVKEY).unwrap();
        let digest = B256::repeat_byte(0x5a);

        let personal = sign_hash(&digest, &cred).unwrap();
        let direct = cred.sign_prehash(&prefixed_hash(&digest)).unwrap();
        assert_eq!(personal, direct);
    }

    #[test]
    fn sign_message_of_digest_bytes_matches_sign_hash() {
        let cred = LocalCredential::from_bytes(&TEST_PRIVKEY).unwrap();
        let digest = B256::repeat_byte(0x07);

        assert_eq!(
            sign_message(digest.as_slice(), &cred).unwrap(),
            sign_hash(&digest, &cred).unwrap()
        );
    }

    #[test]
    fn signatures_are_low_s() {
        let cred = LocalCredential::random();
        let sig = sign_hash(&B256::repeat_byte(0x99), &cred).unwrap();
        let (k_sig, _) = sig.encode_for_recovery().unwrap();
        assert_eq!(
            k_sig.s().to_bytes().as_slice(),
            sig.s().to_be_bytes::<32>().as_slice()
        );
    }

    #[test]
    fn debug_does_not_leak_key() {
        let cred = LocalCredential::from_bytes(&TEST_PRIVKEY).unwrap();
        let debug = format!("{cred:?}");
        assert!(debug.contains("LocalCredential"));
        assert!(!debug.contains(&hex::encode(TEST_PRIVKEY)));
    }
}
