use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A submitted, not yet confirmed transaction. The hash is the correlation
/// key used to match its receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHandle {
    hash: String,
}

impl TransactionHandle {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Delivered once by the connection when the transaction is mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub confirmations: u64,
    pub status: bool,
}

impl Receipt {
    pub fn confirmed(transaction_hash: impl Into<String>, confirmations: u64) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            block_number: None,
            confirmations,
            status: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    pub id: u64,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}
