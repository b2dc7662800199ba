use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;

use crate::errors::{FundMeError, Result};

pub const NOT_CONNECTED: &str = "Not connected";

/// `0x1234567890...5678` style display: first 5 characters, an ellipsis,
/// then the last 4.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(5).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn display_address(address: Option<&str>) -> String {
    match address {
        Some(address) if !address.is_empty() => shorten_address(address),
        _ => NOT_CONNECTED.to_string(),
    }
}

/// Decimal ETH amount (e.g. `"0.1"`) to wei.
pub fn parse_eth_amount(amount: &str) -> Result<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(FundMeError::InvalidAmount {
            amount: amount.to_string(),
            reason: "amount is empty".to_string(),
        });
    }
    if trimmed.starts_with('-') {
        return Err(FundMeError::InvalidAmount {
            amount: amount.to_string(),
            reason: "amount must not be negative".to_string(),
        });
    }
    parse_ether(trimmed).map_err(|e| FundMeError::InvalidAmount {
        amount: amount.to_string(),
        reason: e.to_string(),
    })
}

pub fn format_eth(wei: U256) -> String {
    format_ether(wei)
}
