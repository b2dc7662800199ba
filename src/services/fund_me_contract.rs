use std::future::Future;

use alloy::network::TransactionBuilder;
use alloy::primitives::{keccak256, Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use tracing::debug;

use crate::errors::{FundMeError, Result};
use crate::interfaces::TransactionHandle;

pub const FUND_SIGNATURE: &str = "fund()";
pub const WITHDRAW_SIGNATURE: &str = "withdraw()";

/// Remote calls exposed by the deployed Fund Me contract.
pub trait FundMeContract: Send + Sync {
    /// Sends `amount` wei to the contract's payable `fund()`.
    fn fund(&self, amount: U256) -> impl Future<Output = Result<TransactionHandle>> + Send;

    fn withdraw(&self) -> impl Future<Output = Result<TransactionHandle>> + Send;

    fn address(&self) -> Address;
}

/// 4-byte function selector for a Solidity signature such as `fund()`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub struct RpcFundMeContract {
    provider: DynProvider,
    address: Address,
}

impl RpcFundMeContract {
    pub fn new(rpc_url: &str, address: Address, signer: PrivateKeySigner) -> Result<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| FundMeError::Config(format!("invalid RPC_URL {}: {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().wallet(signer).connect_http(url).erased();
        Ok(Self { provider, address })
    }

    async fn send_call(&self, signature: &str, value: U256) -> Result<TransactionHandle> {
        let mut tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(Bytes::copy_from_slice(&selector(signature)));
        if !value.is_zero() {
            tx = tx.with_value(value);
        }

        let pending = self.provider.send_transaction(tx).await?;
        let hash = format!("{:#x}", pending.tx_hash());
        debug!(call = signature, %hash, "Transaction submitted");
        Ok(TransactionHandle::new(hash))
    }
}

impl FundMeContract for RpcFundMeContract {
    async fn fund(&self, amount: U256) -> Result<TransactionHandle> {
        self.send_call(FUND_SIGNATURE, amount).await
    }

    async fn withdraw(&self) -> Result<TransactionHandle> {
        self.send_call(WITHDRAW_SIGNATURE, U256::ZERO).await
    }

    fn address(&self) -> Address {
        self.address
    }
}
