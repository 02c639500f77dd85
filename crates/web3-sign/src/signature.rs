//! Encoding and decoding of recoverable ECDSA signatures.
//!
//! On the wire a signature is 65 bytes, `r(32) || s(32) || v(1)`, with `v` in
//! {27, 28}. Internally the recovery id is always kept in {0, 1}; the offset
//! is applied only when writing the wire form and removed when reading it.

use std::fmt;

use alloy_primitives::U256;
use k256::ecdsa::{RecoveryId, Signature};

use crate::error::SignError;

/// Length of the flat `r || s || v` encoding.
pub const SIGNATURE_LENGTH: usize = 65;

/// Offset Ethereum adds to the raw recovery id on the wire.
pub const LEGACY_V_OFFSET: u8 = 27;

/// Order `n` of the secp256k1 group, big-endian.
const SECP256K1_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Maps a wire `v` onto the raw recovery id.
///
/// 27 and 28 become 0 and 1; 0 and 1 pass through unchanged. Any other value
/// (including EIP-155 chain-encoded `v`) is rejected.
pub fn normalize_recovery_id(v: u8) -> Result<u8, SignError> {
    match v {
        0 | 1 => Ok(v),
        27 | 28 => Ok(v - LEGACY_V_OFFSET),
        other => Err(SignError::InvalidRecoveryId(other)),
    }
}

/// A recoverable secp256k1 signature: `(recovery_id, r, s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthSignature {
    recovery_id: u8,
    r: U256,
    s: U256,
}

impl EthSignature {
    /// Builds a signature from its components.
    ///
    /// `recovery_id` may be given in either convention. `r` and `s` must be
    /// nonzero and below the curve order.
    pub fn new(recovery_id: u8, r: U256, s: U256) -> Result<Self, SignError> {
        let recovery_id = normalize_recovery_id(recovery_id)?;
        let order = U256::from_be_bytes(SECP256K1_ORDER);

        for (name, value) in [("r", r), ("s", s)] {
            if value.is_zero() || value >= order {
                return Err(SignError::MalformedSignature(format!(
                    "{name} must be in [1, n)"
                )));
            }
        }

        Ok(Self { recovery_id, r, s })
    }

    /// Splits a 65-byte `r || s || v` string.
    ///
    /// `r` and `s` are not range-checked here; an out-of-range value surfaces
    /// as a recovery error later.
    pub fn decode(raw: &[u8]) -> Result<Self, SignError> {
        if raw.len() != SIGNATURE_LENGTH {
            return Err(SignError::MalformedSignature(format!(
                "expected {SIGNATURE_LENGTH} bytes, got {}",
                raw.len()
            )));
        }

        let r = U256::from_be_slice(&raw[..32]);
        let s = U256::from_be_slice(&raw[32..64]);
        let recovery_id = normalize_recovery_id(raw[64])?;

        Ok(Self { recovery_id, r, s })
    }

    /// Decodes a hex signature, with or without the `0x` prefix.
    pub fn from_hex(signature: &str) -> Result<Self, SignError> {
        let digits = signature
            .strip_prefix("0x")
            .or_else(|| signature.strip_prefix("0X"))
            .unwrap_or(signature);
        let raw = hex::decode(digits)
            .map_err(|e| SignError::MalformedSignature(format!("invalid hex: {e}")))?;
        Self::decode(&raw)
    }

    /// Converts a k256 signature and its recovery id.
    pub fn from_k256(signature: &Signature, recovery_id: RecoveryId) -> Result<Self, SignError> {
        // An x-reduced R cannot be expressed in a single parity bit.
        if recovery_id.is_x_reduced() {
            return Err(SignError::SigningError(
                "signature R point has a reduced x-coordinate".into(),
            ));
        }

        Ok(Self {
            recovery_id: u8::from(recovery_id.is_y_odd()),
            r: U256::from_be_slice(&signature.r().to_bytes()),
            s: U256::from_be_slice(&signature.s().to_bytes()),
        })
    }

    /// Recovery id in {0, 1}.
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Wire `v` in {27, 28}.
    pub fn v(&self) -> u8 {
        self.recovery_id + LEGACY_V_OFFSET
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    /// The 65-byte wire form, `r || s || v` with `v` in {27, 28}.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        out[32..64].copy_from_slice(&self.s.to_be_bytes::<32>());
        out[64] = self.v();
        out
    }

    /// `0x`-prefixed lowercase hex of the wire form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Packages the signature for `VerifyingKey::recover_from_prehash`.
    ///
    /// k256 wants the raw {0, 1} parity and a low-S signature. A high-S input
    /// is folded to `n - s` with the parity flipped, which recovers the same
    /// public key.
    pub fn encode_for_recovery(&self) -> Result<(Signature, RecoveryId), SignError> {
        let r_bytes = self.r.to_be_bytes::<32>();
        let s_bytes = self.s.to_be_bytes::<32>();

        let signature = Signature::from_scalars(
            *k256::FieldBytes::from_slice(&r_bytes),
            *k256::FieldBytes::from_slice(&s_bytes),
        )
        .map_err(|e| SignError::RecoveryError(format!("r or s out of range: {e}")))?;

        let is_y_odd = self.recovery_id == 1;
        let (signature, is_y_odd) = match signature.normalize_s() {
            Some(low_s) => (low_s, !is_y_odd),
            None => (signature, is_y_odd),
        };

        Ok((signature, RecoveryId::new(is_y_odd, false)))
    }
}

impl fmt::Display for EthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
