use thiserror::Error;

use web3_sign::SignError;

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("RPC call failed: {0}")]
    Rpc(String),

    #[error("Unit conversion failed: {0}")]
    UnitConversion(String),

    #[error("Account locked: {0}")]
    AccountLocked(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Sign(SignError),
}

impl From<SignError> for HelperError {
    fn from(e: SignError) -> Self {
        HelperError::Sign(e)
    }
}

impl From<serde_json::Error> for HelperError {
    fn from(e: serde_json::Error) -> Self {
        HelperError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_error_is_wrapped_transparently() {
        let err: HelperError = SignError::InvalidRecoveryId(29).into();
        assert_eq!(err.to_string(), "invalid recovery id: 29");
        assert!(matches!(err, HelperError::Sign(SignError::InvalidRecoveryId(29))));
    }

    #[test]
    fn display_rpc_error() {
        let err = HelperError::Rpc("connection refused".into());
        assert_eq!(err.to_string(), "RPC call failed: connection refused");
    }
}
