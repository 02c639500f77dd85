use serde::Serialize;

/// Name reported for any network id without an entry.
pub const DEFAULT_NETWORK_NAME: &str = "development";

/// A named Ethereum network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub network_id: u64,
    pub name: &'static str,
}

pub const MAIN: Network = Network {
    network_id: 1,
    name: "Main",
};

pub const MORDEN: Network = Network {
    network_id: 2,
    name: "Morden",
};

pub const ROPSTEN: Network = Network {
    network_id: 3,
    name: "Ropsten",
};

pub const RINKEBY: Network = Network {
    network_id: 4,
    name: "Rinkeby",
};

pub const KOVAN: Network = Network {
    network_id: 42,
    name: "Kovan",
};

pub const XDAI: Network = Network {
    network_id: 100,
    name: "xDai",
};

const ALL_NETWORKS: &[&Network] = &[&MAIN, &MORDEN, &ROPSTEN, &RINKEBY, &KOVAN, &XDAI];

/// Returns the network with the given id, or `None` if it is not named.
pub fn get_network(network_id: u64) -> Option<&'static Network> {
    ALL_NETWORKS
        .iter()
        .find(|n| n.network_id == network_id)
        .copied()
}

/// Human-readable name for `network_id`, `"development"` when unknown.
pub fn network_name(network_id: u64) -> &'static str {
    get_network(network_id)
        .map(|n| n.name)
        .unwrap_or(DEFAULT_NETWORK_NAME)
}

/// All named networks.
pub fn known_networks() -> Vec<&'static Network> {
    ALL_NETWORKS.to_vec()
}
