//! Helpers over an Ethereum RPC client.
//!
//! Network names, balances, ether/wei conversion and account unlocking go
//! through a [`client::ChainClient`]. Signing, recovery and multi-value
//! hashing come from `web3-sign`.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod helper;
pub mod logging;
pub mod network;
pub mod units;

pub use account::Account;
pub use client::{ChainClient, RemoteCredential};
pub use error::HelperError;
pub use helper::{ec_recover, generate_multi_value_hash, personal_ec_recover, Web3Helper};
pub use network::{network_name, DEFAULT_NETWORK_NAME};
pub use units::{from_wei, to_wei};
