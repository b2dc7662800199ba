use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::signers::local::PrivateKeySigner;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::{FundMeError, Result};
use crate::interfaces::{JsonRpcRequest, JsonRpcResponse};

/// Brokers account access and raw JSON-RPC for the user's wallet.
pub trait WalletProvider: Send + Sync {
    fn request(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send;
}

/// Wallet backed by a local private key. Account methods are answered from
/// the key; everything else is forwarded to the node.
pub struct LocalWalletProvider {
    signer: PrivateKeySigner,
    rpc_url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl LocalWalletProvider {
    pub fn new(private_key: &str, rpc_url: &str, request_timeout: Duration) -> Result<Self> {
        let private_key = if private_key.starts_with("0x") {
            private_key.to_string()
        } else {
            format!("0x{}", private_key)
        };
        let signer = PrivateKeySigner::from_str(&private_key)
            .map_err(|e| FundMeError::Config(format!("invalid PRIVATE_KEY: {}", e)))?;
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            signer,
            rpc_url: rpc_url.to_string(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    pub fn address(&self) -> String {
        self.signer.address().to_checksum(None)
    }

    async fn forward(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = JsonRpcRequest::new(id, method, params);
        debug!(method, id, "Forwarding wallet request");

        let response: JsonRpcResponse = self
            .client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(FundMeError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| FundMeError::MalformedResponse(format!("no result for {}", method)))
    }
}

impl WalletProvider for LocalWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        match method {
            "eth_requestAccounts" | "eth_accounts" => Ok(json!([self.address()])),
            _ => self.forward(method, params).await,
        }
    }
}

/// First account of an `eth_requestAccounts` / `eth_accounts` result.
pub fn first_account(accounts: &Value) -> Result<Option<String>> {
    let list = accounts.as_array().ok_or_else(|| {
        FundMeError::MalformedResponse(format!("expected account list, got {}", accounts))
    })?;
    Ok(list.first().and_then(Value::as_str).map(str::to_string))
}
