use alloy_primitives::Address;
use secrecy::SecretString;
use web3_sign::{Credential, LocalCredential};

use crate::error::HelperError;

/// An account the helpers can sign for.
///
/// With a local key the account signs in-process. Without one, signing is
/// delegated to the node, which may need `password` to unlock the account
/// first. Neither the key nor the password is ever persisted.
#[derive(Debug)]
pub struct Account {
    address: Address,
    key: Option<LocalCredential>,
    password: Option<SecretString>,
}

impl Account {
    /// An account backed by an in-memory key.
    pub fn local(key: LocalCredential) -> Self {
        Self {
            address: key.address(),
            key: Some(key),
            password: None,
        }
    }

    /// An account backed by a hex private key.
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, HelperError> {
        Ok(Self::local(LocalCredential::from_hex(private_key)?))
    }

    /// An account whose key is held by the node.
    pub fn remote(address: Address) -> Self {
        Self {
            address,
            key: None,
            password: None,
        }
    }

    /// Attaches the node-side unlock password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::from(password));
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn local_key(&self) -> Option<&LocalCredential> {
        self.key.as_ref()
    }

    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }
}
