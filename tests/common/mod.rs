//! Common test utilities and helpers
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use fund_me_client::interfaces::TransactionHandle;
use fund_me_client::services::{FundMeApp, FundMeContract, InMemoryConnection, WalletProvider};
use fund_me_client::{FundMeError, Result};
use serde_json::{json, Value};

pub const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";
pub const FUND_HASH: &str = "0x00000000000000000000000000000000000000000000000000000000000000f1";
pub const WITHDRAW_HASH: &str = "0x00000000000000000000000000000000000000000000000000000000000000f2";

pub fn contract_address() -> Address {
    Address::repeat_byte(0xc0)
}

/// Wallet that answers account requests from a fixed list or rejects them.
#[derive(Default)]
pub struct MockWallet {
    pub accounts: Vec<String>,
    pub reject: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockWallet {
    pub fn with_account(account: &str) -> Self {
        Self {
            accounts: vec![account.to_string()],
            ..Default::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    /// Shared handle to the request log, usable after the wallet moves into an app.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl WalletProvider for MockWallet {
    async fn request(&self, method: &str, _params: Value) -> Result<Value> {
        self.calls.lock().unwrap().push(method.to_string());
        if self.reject {
            return Err(FundMeError::Rpc {
                code: 4001,
                message: "User rejected the request.".to_string(),
            });
        }
        Ok(json!(self.accounts))
    }
}

/// Contract proxy that records calls and hands out fixed transaction hashes.
#[derive(Default)]
pub struct MockContract {
    pub funded: Arc<Mutex<Vec<U256>>>,
    pub fail: bool,
    pub deployed_at: Option<Address>,
}

impl MockContract {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn at(address: Address) -> Self {
        Self {
            deployed_at: Some(address),
            ..Default::default()
        }
    }

    pub fn funded_log(&self) -> Arc<Mutex<Vec<U256>>> {
        Arc::clone(&self.funded)
    }
}

impl FundMeContract for MockContract {
    async fn fund(&self, amount: U256) -> Result<TransactionHandle> {
        if self.fail {
            return Err(FundMeError::Rpc {
                code: -32000,
                message: "insufficient funds".to_string(),
            });
        }
        self.funded.lock().unwrap().push(amount);
        Ok(TransactionHandle::new(FUND_HASH))
    }

    async fn withdraw(&self) -> Result<TransactionHandle> {
        if self.fail {
            return Err(FundMeError::Rpc {
                code: -32000,
                message: "execution reverted".to_string(),
            });
        }
        Ok(TransactionHandle::new(WITHDRAW_HASH))
    }

    fn address(&self) -> Address {
        self.deployed_at.unwrap_or_else(contract_address)
    }
}

pub type TestApp = FundMeApp<MockWallet, InMemoryConnection, MockContract>;

pub fn app_with(wallet: MockWallet, contract: MockContract) -> (TestApp, Arc<InMemoryConnection>) {
    let connection = Arc::new(InMemoryConnection::new());
    let app = FundMeApp::new(Arc::clone(&connection)).with_wallet(wallet, contract);
    (app, connection)
}

pub fn app_without_wallet() -> (TestApp, Arc<InMemoryConnection>) {
    let connection = Arc::new(InMemoryConnection::new());
    (FundMeApp::new(Arc::clone(&connection)), connection)
}

/// Yields until `condition` holds, bounded so a broken test fails instead of hanging.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
