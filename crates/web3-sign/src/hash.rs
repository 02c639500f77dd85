//! Deterministic multi-value hashing.
//!
//! Values are packed back to back (Solidity `abi.encodePacked` layout, no
//! length prefixes) and the concatenation is hashed with Keccak-256. The
//! result is a content identifier, so both sides must agree on the type
//! sequence out of band.

use alloy_primitives::{Address, B256, U256};
use sha3::{Digest, Keccak256};

use crate::address::parse_address;
use crate::error::SignError;

/// A single value tagged with the type that fixes its packed width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// 20 raw address bytes.
    Address(Address),
    /// Unsigned integer packed big-endian into `bits / 8` bytes.
    Uint { bits: u16, value: U256 },
    /// Dynamic `bytes`, packed as-is.
    Bytes(Vec<u8>),
    /// `bytesN`; the vector length is the declared width.
    FixedBytes(Vec<u8>),
    /// One byte, 0x00 or 0x01.
    Bool(bool),
    /// UTF-8 bytes, packed as-is.
    String(String),
}

impl TypedValue {
    /// Shorthand for a `uint256` value.
    pub fn uint256(value: U256) -> Self {
        TypedValue::Uint { bits: 256, value }
    }

    /// Parses a value from its Solidity type name and a textual value.
    ///
    /// Integers accept decimal or 0x-prefixed hex, byte types accept hex with
    /// or without the 0x prefix, booleans accept `true`/`false`/`1`/`0`, and
    /// mixed-case addresses must carry a valid EIP-55 checksum. Surrounding
    /// whitespace is ignored for every type except `string`, which is packed
    /// exactly as given.
    pub fn parse(ty: &str, value: &str) -> Result<Self, SignError> {
        let ty = ty.trim();

        match ty {
            "string" => Ok(TypedValue::String(value.to_string())),
            "address" => {
                let addr = parse_address(value.trim()).map_err(|e| {
                    SignError::EncodingError(format!("invalid address {value:?}: {e}"))
                })?;
                Ok(TypedValue::Address(addr))
            }
            "bool" => match value.trim() {
                "true" | "1" => Ok(TypedValue::Bool(true)),
                "false" | "0" => Ok(TypedValue::Bool(false)),
                other => Err(SignError::EncodingError(format!("invalid bool {other:?}"))),
            },
            "bytes" => Ok(TypedValue::Bytes(decode_hex(value.trim())?)),
            "uint" => Ok(TypedValue::Uint {
                bits: 256,
                value: parse_uint(value.trim())?,
            }),
            _ => {
                if let Some(width) = ty.strip_prefix("uint") {
                    let bits = parse_width(ty, width)?;
                    return Ok(TypedValue::Uint {
                        bits,
                        value: parse_uint(value.trim())?,
                    });
                }
                if let Some(width) = ty.strip_prefix("bytes") {
                    let len = parse_width(ty, width)?;
                    let bytes = decode_hex(value.trim())?;
                    if bytes.len() != usize::from(len) {
                        return Err(SignError::EncodingError(format!(
                            "{ty} expects {len} bytes, got {}",
                            bytes.len()
                        )));
                    }
                    return Ok(TypedValue::FixedBytes(bytes));
                }
                Err(SignError::EncodingError(format!("unsupported type {ty:?}")))
            }
        }
    }

    /// Appends this value's packed encoding to `out`.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), SignError> {
        match self {
            TypedValue::Address(addr) => out.extend_from_slice(addr.as_slice()),
            TypedValue::Uint { bits, value } => {
                if *bits == 0 || *bits > 256 || *bits % 8 != 0 {
                    return Err(SignError::EncodingError(format!(
                        "uint{bits} is not a valid integer width"
                    )));
                }
                if value.bit_len() > usize::from(*bits) {
                    return Err(SignError::EncodingError(format!(
                        "{value} does not fit in uint{bits}"
                    )));
                }
                let word = value.to_be_bytes::<32>();
                let width = usize::from(*bits / 8);
                out.extend_from_slice(&word[32 - width..]);
            }
            TypedValue::Bytes(bytes) => out.extend_from_slice(bytes),
            TypedValue::FixedBytes(bytes) => {
                if bytes.is_empty() || bytes.len() > 32 {
                    return Err(SignError::EncodingError(format!(
                        "bytes{} is not a valid fixed width",
                        bytes.len()
                    )));
                }
                out.extend_from_slice(bytes);
            }
            TypedValue::Bool(flag) => out.push(u8::from(*flag)),
            TypedValue::String(s) => out.extend_from_slice(s.as_bytes()),
        }
        Ok(())
    }
}

/// Packs `values` in order without padding between them.
pub fn encode_packed(values: &[TypedValue]) -> Result<Vec<u8>, SignError> {
    let mut out = Vec::with_capacity(values.len() * 32);
    for value in values {
        value.encode_into(&mut out)?;
    }
    Ok(out)
}

/// Keccak-256 of the packed encoding of `values`.
pub fn multi_value_hash(values: &[TypedValue]) -> Result<B256, SignError> {
    let packed = encode_packed(values)?;
    Ok(B256::from_slice(&Keccak256::digest(&packed)))
}

/// Parses parallel `types`/`values` lists and hashes them.
pub fn multi_value_hash_from_strs(types: &[&str], values: &[&str]) -> Result<B256, SignError> {
    if types.len() != values.len() {
        return Err(SignError::EncodingError(format!(
            "{} types but {} values",
            types.len(),
            values.len()
        )));
    }

    let typed = types
        .iter()
        .zip(values)
        .map(|(ty, value)| TypedValue::parse(ty, value))
        .collect::<Result<Vec<_>, _>>()?;

    multi_value_hash(&typed)
}

fn parse_width(ty: &str, width: &str) -> Result<u16, SignError> {
    let n: u16 = width
        .parse()
        .map_err(|_| SignError::EncodingError(format!("unsupported type {ty:?}")))?;
    // Canonical spelling only: no sign, no leading zeros.
    if n.to_string() != width {
        return Err(SignError::EncodingError(format!("unsupported type {ty:?}")));
    }
    let valid = if ty.starts_with("uint") {
        n > 0 && n <= 256 && n % 8 == 0
    } else {
        (1..=32).contains(&n)
    };
    if !valid {
        return Err(SignError::EncodingError(format!("unsupported type {ty:?}")));
    }
    Ok(n)
}

fn parse_uint(value: &str) -> Result<U256, SignError> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex_digits) => (hex_digits, 16),
        None => (value, 10),
    };
    if digits.is_empty() {
        return Err(SignError::EncodingError(format!(
            "invalid integer {value:?}: no digits"
        )));
    }
    let parsed = U256::from_str_radix(digits, radix);
    parsed.map_err(|e| SignError::EncodingError(format!("invalid integer {value:?}: {e}")))
}

fn decode_hex(value: &str) -> Result<Vec<u8>, SignError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    hex::decode(digits).map_err(|e| SignError::EncodingError(format!("invalid hex: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    fn aa_address() -> Address {
        Address::from([0xAA; 20])
    }

    #[test]
    fn address_then_uint256_golden_vector() {
        let digest = multi_value_hash(&[
            TypedValue::Address(aa_address()),
            TypedValue::uint256(U256::from(ONE_ETHER)),
        ])
        .unwrap();

        assert_eq!(
            hex::encode(digest),
            "6d2403f9c8988b8e02c45c9785cce20e092168ad0bbb77582b060f652d9a65c2"
        );
    }

    #[test]
    fn reordering_changes_digest() {
        let forward = multi_value_hash(&[
            TypedValue::Address(aa_address()),
            TypedValue::uint256(U256::from(ONE_ETHER)),
        ])
        .unwrap();
        let reversed = multi_value_hash(&[
            TypedValue::uint256(U256::from(ONE_ETHER)),
            TypedValue::Address(aa_address()),
        ])
        .unwrap();

        assert_ne!(forward, reversed);
        assert_eq!(
            hex::encode(reversed),
            "4d51c473fad834185757a1abcce2f94ded0329fd4a2eea6b2b73f262d6982b3d"
        );
    }

    #[test]
    fn mixed_types_pack_without_padding() {
        let values = [
            TypedValue::Address(aa_address()),
            TypedValue::Uint {
                bits: 8,
                value: U256::from(255u8),
            },
            TypedValue::Bool(true),
            TypedValue::String("ocean".into()),
            TypedValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
        ];

        let packed = encode_packed(&values).unwrap();
        assert_eq!(packed.len(), 20 + 1 + 1 + 5 + 4);
        assert_eq!(packed[20], 0xff);
        assert_eq!(packed[21], 0x01);

        assert_eq!(
            hex::encode(multi_value_hash(&values).unwrap()),
            "352be50f6d051ddb6322679b9aa24faeaec266fa20f5fadaacab78e874f5f889"
        );
    }

    #[test]
    fn uint_is_padded_to_declared_width() {
        let packed = encode_packed(&[TypedValue::Uint {
            bits: 64,
            value: U256::from(1u8),
        }])
        .unwrap();
        assert_eq!(packed, vec![0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn uint_overflow_is_rejected() {
        let result = encode_packed(&[TypedValue::Uint {
            bits: 8,
            value: U256::from(256u16),
        }]);
        assert!(matches!(result, Err(SignError::EncodingError(_))));
    }

    #[test]
    fn uint_bad_width_is_rejected() {
        let result = encode_packed(&[TypedValue::Uint {
            bits: 12,
            value: U256::ZERO,
        }]);
        assert!(matches!(result, Err(SignError::EncodingError(_))));
    }

    #[test]
    fn empty_sequence_hashes_empty_input() {
        assert_eq!(
            hex::encode(multi_value_hash(&[]).unwrap()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn string_form_matches_typed_form() {
        let from_strs = multi_value_hash_from_strs(
            &["address", "uint256"],
            &["0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "1000000000000000000"],
        )
        .unwrap();
        let typed = multi_value_hash(&[
            TypedValue::Address(aa_address()),
            TypedValue::uint256(U256::from(ONE_ETHER)),
        ])
        .unwrap();
        assert_eq!(from_strs, typed);
    }

    #[test]
    fn parse_hex_uint() {
        let value = TypedValue::parse("uint256", "0xde0b6b3a7640000").unwrap();
        assert_eq!(value, TypedValue::uint256(U256::from(ONE_ETHER)));
    }

    #[test]
    fn parse_fixed_bytes_checks_length() {
        assert!(TypedValue::parse("bytes4", "0xdeadbeef").is_ok());
        assert!(TypedValue::parse("bytes4", "0xdead").is_err());
        assert!(TypedValue::parse("bytes33", "0x00").is_err());
    }

    #[test]
    fn parse_rejects_unknown_type() {
        assert!(matches!(
            TypedValue::parse("int256", "1"),
            Err(SignError::EncodingError(_))
        ));
        assert!(TypedValue::parse("uint7", "1").is_err());
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(TypedValue::parse("bool", "true").unwrap(), TypedValue::Bool(true));
        assert_eq!(TypedValue::parse("bool", "0").unwrap(), TypedValue::Bool(false));
        assert!(TypedValue::parse("bool", "yes").is_err());
    }

    #[test]
    fn mismatched_lists_are_rejected() {
        let result = multi_value_hash_from_strs(&["address", "uint256"], &["0x00"]);
        assert!(matches!(result, Err(SignError::EncodingError(_))));
    }

    #[test]
    fn string_value_is_packed_verbatim() {
        let from_strs = multi_value_hash_from_strs(&["string"], &[" ocean "]).unwrap();
        let typed = multi_value_hash(&[TypedValue::String(" ocean ".into())]).unwrap();
        assert_eq!(from_strs, typed);
        assert_ne!(
            from_strs,
            multi_value_hash(&[TypedValue::String("ocean".into())]).unwrap()
        );
    }

    #[test]
    fn numeric_values_tolerate_surrounding_whitespace() {
        assert_eq!(
            TypedValue::parse("uint256", " 1000000000000000000 ").unwrap(),
            TypedValue::uint256(U256::from(ONE_ETHER))
        );
        assert_eq!(TypedValue::parse("bool", " true\n").unwrap(), TypedValue::Bool(true));
    }

    #[test]
    fn empty_integer_is_rejected() {
        for value in ["", "0x", "0X", "  "] {
            assert!(
                matches!(
                    TypedValue::parse("uint256", value),
                    Err(SignError::EncodingError(_))
                ),
                "{value:?} should not parse as uint256"
            );
        }
    }

    #[test]
    fn address_with_bad_checksum_is_rejected() {
        assert!(matches!(
            TypedValue::parse("address", "0x5AAEB6053F3E94C9b9A09f33669435E7Ef1BeAed"),
            Err(SignError::EncodingError(_))
        ));
        for valid in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert!(TypedValue::parse("address", valid).is_ok(), "{valid}");
        }
    }

    #[test]
    fn address_without_prefix_is_rejected() {
        assert!(TypedValue::parse("address", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").is_err());
    }

    #[test]
    fn non_canonical_widths_are_rejected() {
        for ty in ["uint08", "uint0256", "bytes04", "bytes+4", "uint+8"] {
            assert!(
                matches!(TypedValue::parse(ty, "0x00"), Err(SignError::EncodingError(_))),
                "{ty} should be rejected"
            );
        }
        assert!(TypedValue::parse("uint8", "0x00").is_ok());
    }
}
