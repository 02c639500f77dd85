use alloy_primitives::utils::{format_ether, parse_ether};
use alloy_primitives::U256;

use crate::error::HelperError;

/// Converts a decimal ether amount (e.g. `"1.5"`) to wei.
pub fn to_wei(ether: &str) -> Result<U256, HelperError> {
    parse_ether(ether.trim())
        .map_err(|e| HelperError::UnitConversion(format!("invalid ether amount {ether:?}: {e}")))
}

/// Converts wei to a decimal ether string with trailing zeros removed.
pub fn from_wei(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted,
    }
}
