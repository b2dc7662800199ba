use anyhow::{Context, Result};
use regex::Regex;
use std::env;
use std::time::Duration;

use alloy::primitives::Address;

use crate::services::chain_connection::DEFAULT_POLL_INTERVAL;
use crate::utils::format::parse_eth_amount;

pub const DEFAULT_ETH_AMOUNT: &str = "0.1";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10000;

#[derive(Debug, Clone)]
pub struct Env {
    pub rpc_url: String,
    pub contract_address: Address,
    pub private_key: Option<String>,
    pub eth_amount: String,
    pub receipt_poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub confirmation_timeout_secs: Option<u64>,
    pub log_dir: String,
}

impl Env {
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }
}

fn is_valid_ethereum_address(address: &str) -> bool {
    let re = Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("static regex");
    re.is_match(address)
}

fn is_valid_private_key(key: &str) -> bool {
    let re = Regex::new(r"^(0x)?[a-fA-F0-9]{64}$").expect("static regex");
    re.is_match(key)
}

fn validate_required_env<F>(lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let required = ["RPC_URL", "CONTRACT_ADDRESS"];
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| lookup(*key).map_or(true, |v| v.trim().is_empty()))
        .collect();

    if !missing.is_empty() {
        eprintln!("\n❌ Configuration Error: Missing required environment variables\n");
        eprintln!("Missing variables: {}\n", missing.join(", "));
        eprintln!("🔧 Quick fix: create a .env file with RPC_URL and CONTRACT_ADDRESS\n");
        anyhow::bail!("Missing required environment variables: {}", missing.join(", "));
    }

    Ok(())
}

fn validate_addresses<F>(lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(contract) = lookup("CONTRACT_ADDRESS") {
        if !is_valid_ethereum_address(contract.trim()) {
            eprintln!("\n❌ Invalid Contract Address\n");
            eprintln!("Your CONTRACT_ADDRESS: {}", contract);
            eprintln!("Expected format:       0x followed by 40 hexadecimal characters\n");
            anyhow::bail!("Invalid CONTRACT_ADDRESS format: {}", contract);
        }
    }

    if let Some(key) = lookup("PRIVATE_KEY") {
        if !key.trim().is_empty() && !is_valid_private_key(key.trim()) {
            eprintln!("\n❌ Invalid Private Key\n");
            eprintln!("Expected format: 64 hexadecimal characters, optionally 0x-prefixed\n");
            anyhow::bail!("Invalid PRIVATE_KEY format");
        }
    }

    Ok(())
}

fn validate_urls<F>(lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(rpc_url) = lookup("RPC_URL") {
        if !rpc_url.starts_with("http") {
            eprintln!("\n❌ Invalid RPC_URL\n");
            eprintln!("Current value: {}", rpc_url);
            eprintln!("Must start with: http:// or https://\n");
            anyhow::bail!("Invalid RPC_URL: must be a valid HTTP/HTTPS URL");
        }
    }

    Ok(())
}

fn parse_numeric_config<F>(lookup: &F) -> Result<(u64, u64, Option<u64>)>
where
    F: Fn(&str) -> Option<String>,
{
    let poll_interval = lookup("RECEIPT_POLL_INTERVAL_MS")
        .unwrap_or_else(|| DEFAULT_POLL_INTERVAL.as_millis().to_string())
        .parse::<u64>()
        .context("Invalid RECEIPT_POLL_INTERVAL_MS")?;
    if poll_interval < 100 {
        anyhow::bail!("Invalid RECEIPT_POLL_INTERVAL_MS: must be at least 100ms");
    }

    let request_timeout = lookup("REQUEST_TIMEOUT_MS")
        .unwrap_or_else(|| DEFAULT_REQUEST_TIMEOUT_MS.to_string())
        .parse::<u64>()
        .context("Invalid REQUEST_TIMEOUT_MS")?;
    if request_timeout < 1000 {
        anyhow::bail!("Invalid REQUEST_TIMEOUT_MS: must be at least 1000ms");
    }

    let confirmation_timeout = match lookup("CONFIRMATION_TIMEOUT_SECS") {
        Some(raw) if !raw.trim().is_empty() => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .context("Invalid CONFIRMATION_TIMEOUT_SECS")?;
            if secs == 0 {
                anyhow::bail!("Invalid CONFIRMATION_TIMEOUT_SECS: must be positive");
            }
            Some(secs)
        }
        _ => None,
    };

    Ok((poll_interval, request_timeout, confirmation_timeout))
}

/// Builds the configuration from a key lookup. `load_env` passes the process
/// environment; tests pass a map.
pub fn parse_env<F>(lookup: F) -> Result<Env>
where
    F: Fn(&str) -> Option<String>,
{
    validate_required_env(&lookup)?;
    validate_addresses(&lookup)?;
    validate_urls(&lookup)?;
    let (receipt_poll_interval_ms, request_timeout_ms, confirmation_timeout_secs) =
        parse_numeric_config(&lookup)?;

    let eth_amount = lookup("ETH_AMOUNT")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ETH_AMOUNT.to_string());
    parse_eth_amount(&eth_amount).context("Invalid ETH_AMOUNT")?;

    let contract_address = lookup("CONTRACT_ADDRESS")
        .context("CONTRACT_ADDRESS is required")?
        .trim()
        .parse::<Address>()
        .context("Invalid CONTRACT_ADDRESS")?;

    Ok(Env {
        rpc_url: lookup("RPC_URL").context("RPC_URL is required")?,
        contract_address,
        private_key: lookup("PRIVATE_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()),
        eth_amount,
        receipt_poll_interval_ms,
        request_timeout_ms,
        confirmation_timeout_secs,
        log_dir: lookup("LOG_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "logs".to_string()),
    })
}

pub fn load_env() -> Result<Env> {
    dotenvy::dotenv().ok(); // Load .env file if it exists
    parse_env(|key| env::var(key).ok())
}
