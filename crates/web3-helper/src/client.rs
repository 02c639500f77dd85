use alloy_primitives::{Address, B256, U256};
use secrecy::SecretString;
use web3_sign::{Credential, EthSignature, SignError};

use crate::error::HelperError;

/// The RPC operations the helpers need from a node.
///
/// Implementations wrap a concrete transport (HTTP, IPC, an in-process test
/// chain). Calls are synchronous and are not retried by callers in this crate.
pub trait ChainClient: Send + Sync {
    /// `net_version`.
    fn network_id(&self) -> Result<u64, HelperError>;

    /// `eth_getBalance` at the latest block.
    fn balance(&self, address: &Address) -> Result<U256, HelperError>;

    /// `personal_unlockAccount`. Returns whether the node unlocked it.
    fn unlock_account(
        &self,
        address: &Address,
        password: &SecretString,
    ) -> Result<bool, HelperError>;

    /// Asks the node to sign `digest` as-is with the key it holds for
    /// `address`, returning the 65-byte `r || s || v` signature.
    ///
    /// A locked account must be reported as [`HelperError::AccountLocked`].
    fn sign_prehash(&self, address: &Address, digest: &B256) -> Result<Vec<u8>, HelperError>;
}

/// A credential whose key lives in the node behind a [`ChainClient`].
#[derive(Debug)]
pub struct RemoteCredential<'a, C: ?Sized> {
    client: &'a C,
    address: Address,
}

impl<'a, C: ChainClient + ?Sized> RemoteCredential<'a, C> {
    pub fn new(client: &'a C, address: Address) -> Self {
        Self { client, address }
    }
}

impl<C: ChainClient + ?Sized> Credential for RemoteCredential<'_, C> {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_prehash(&self, digest: &B256) -> Result<EthSignature, SignError> {
        let raw = self
            .client
            .sign_prehash(&self.address, digest)
            .map_err(|e| SignError::SigningError(e.to_string()))?;
        EthSignature::decode(&raw)
    }
}
