use thiserror::Error;

/// Errors raised by hashing, signing and signature recovery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("recovery error: {0}")]
    RecoveryError(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
