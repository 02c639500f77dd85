use alloy_primitives::{Address, B256, U256};
use web3_sign::hash::multi_value_hash_from_strs;
use web3_sign::recover::{ec_recover_signature, personal_ec_recover_signature};
use web3_sign::{sign_hash, EthSignature};

use crate::account::Account;
use crate::client::{ChainClient, RemoteCredential};
use crate::error::HelperError;
use crate::network;

/// Web3 helper operations bound to one chain client.
///
/// The client is passed in explicitly; nothing here reads a process-wide
/// provider.
#[derive(Debug, Clone)]
pub struct Web3Helper<C> {
    client: C,
}

impl<C: ChainClient> Web3Helper<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Network id reported by the node.
    pub fn get_network_id(&self) -> Result<u64, HelperError> {
        self.client.network_id()
    }

    /// Name of `network_id`, or of the node's network when `None` or zero.
    pub fn get_network_name(&self, network_id: Option<u64>) -> Result<&'static str, HelperError> {
        let network_id = match network_id {
            Some(id) if id != 0 => id,
            _ => self.get_network_id()?,
        };
        Ok(network::network_name(network_id))
    }

    /// Personal-signs `digest` for `account` and returns the hex signature.
    ///
    /// Accounts with a local key sign in-process. Otherwise the node signs;
    /// if the account carries a password it is unlocked first.
    pub fn sign_hash(&self, digest: &B256, account: &Account) -> Result<String, HelperError> {
        let signature = match account.local_key() {
            Some(key) => sign_hash(digest, key)?,
            None => {
                if account.password().is_some() && !self.unlock_account(account)? {
                    return Err(HelperError::AccountLocked(format!(
                        "node refused to unlock {}",
                        account.address()
                    )));
                }
                let remote = RemoteCredential::new(&self.client, account.address());
                sign_hash(digest, &remote)?
            }
        };
        Ok(signature.to_hex())
    }

    /// `personal_unlockAccount` with the account's password.
    pub fn unlock_account(&self, account: &Account) -> Result<bool, HelperError> {
        let password = account.password().ok_or_else(|| {
            HelperError::AccountLocked(format!("no password for {}", account.address()))
        })?;
        let unlocked = self.client.unlock_account(&account.address(), password)?;
        tracing::debug!(address = %account.address(), unlocked, "unlock account");
        Ok(unlocked)
    }

    /// Balance of `address` in wei at the latest block.
    pub fn get_ether_balance(&self, address: &Address) -> Result<U256, HelperError> {
        self.client.balance(address)
    }
}

/// Recovers the signer of a hex signature over `digest` with no prefixing.
///
/// Signatures made with [`Web3Helper::sign_hash`] need the prefixed hash
/// here, or [`personal_ec_recover`] instead.
pub fn ec_recover(digest: &B256, signature: &str) -> Result<Address, HelperError> {
    let signature = EthSignature::from_hex(signature)?;
    Ok(ec_recover_signature(digest, &signature)?)
}

/// Recovers the signer of a hex personal-message signature over `digest`.
pub fn personal_ec_recover(digest: &B256, signature: &str) -> Result<Address, HelperError> {
    let signature = EthSignature::from_hex(signature)?;
    Ok(personal_ec_recover_signature(digest, &signature)?)
}

/// Packed Keccak-256 of parallel Solidity `types` and textual `values`.
pub fn generate_multi_value_hash(types: &[&str], values: &[&str]) -> Result<B256, HelperError> {
    Ok(multi_value_hash_from_strs(types, values)?)
}
