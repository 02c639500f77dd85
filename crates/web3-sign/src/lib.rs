//! Ethereum-style message signing primitives.
//!
//! This crate provides:
//! - Deterministic packed hashing of typed values (content identifiers)
//! - The EIP-191 personal-message prefix
//! - 65-byte `r || s || v` signature encoding with recovery id normalization
//! - Signing through a [`signer::Credential`] capability
//! - Signer address recovery, raw and personal
//!
//! Every function here is pure; nothing holds shared mutable state.

pub mod address;
pub mod error;
pub mod hash;
pub mod prefix;
pub mod recover;
pub mod signature;
pub mod signer;

pub use alloy_primitives::{Address, B256, U256};
pub use error::SignError;
pub use hash::{multi_value_hash, TypedValue};
pub use prefix::prefixed_hash;
pub use recover::{
    ec_recover, ec_recover_signature, personal_ec_recover, personal_ec_recover_signature, recover,
};
pub use signature::{normalize_recovery_id, EthSignature};
pub use signer::{sign_hash, Credential, LocalCredential};
