use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::errors::{FundMeError, Result};
use crate::interfaces::Receipt;
use crate::services::event_registry::{EventRegistry, ReceiptCallback};

/// Default receipt polling cadence, matching common JSON-RPC client defaults.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(4000);

/// The active channel to the chain backend.
pub trait ChainConnection: Send + Sync {
    /// Registers a callback fired once when the transaction `event_key` is mined.
    fn once(&self, event_key: &str, callback: ReceiptCallback) -> Result<()>;

    fn get_balance(&self, address: Address) -> impl Future<Output = Result<U256>> + Send;
}

/// Confirmations of a receipt mined in `mined_block` when the chain head is `latest`.
pub fn confirmations_at(latest: u64, mined_block: u64) -> u64 {
    latest.saturating_sub(mined_block).saturating_add(1)
}

/// JSON-RPC backed connection. Each watched hash gets one polling task that
/// stops after delivering its receipt.
#[derive(Clone)]
pub struct RpcConnection {
    provider: DynProvider,
    registry: Arc<EventRegistry>,
    poll_interval: Duration,
}

impl RpcConnection {
    pub fn connect_http(rpc_url: &str, poll_interval: Duration) -> Result<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| FundMeError::Config(format!("invalid RPC_URL {}: {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self::new(provider, poll_interval))
    }

    pub fn new(provider: DynProvider, poll_interval: Duration) -> Self {
        Self {
            provider,
            registry: Arc::new(EventRegistry::new()),
            poll_interval,
        }
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }
}

impl ChainConnection for RpcConnection {
    fn once(&self, event_key: &str, callback: ReceiptCallback) -> Result<()> {
        let hash = TxHash::from_str(event_key)
            .map_err(|_| FundMeError::InvalidTransactionHash(event_key.to_string()))?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| FundMeError::NoRuntime)?;

        if self.registry.register(event_key, callback) {
            debug!(hash = %event_key, "Polling for receipt");
            runtime.spawn(poll_for_receipt(
                self.provider.clone(),
                Arc::clone(&self.registry),
                event_key.to_string(),
                hash,
                self.poll_interval,
            ));
        }
        Ok(())
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }
}

async fn poll_for_receipt(
    provider: DynProvider,
    registry: Arc<EventRegistry>,
    key: String,
    hash: TxHash,
    poll_interval: Duration,
) {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let receipt = match provider.get_transaction_receipt(hash).await {
            Ok(Some(receipt)) => receipt,
            Ok(None) => continue,
            Err(e) => {
                warn!(hash = %key, error = %e, "Receipt lookup failed, retrying");
                continue;
            }
        };
        // Pending-block receipts carry no block number yet.
        let Some(mined_block) = receipt.block_number else {
            continue;
        };
        let latest = match provider.get_block_number().await {
            Ok(latest) => latest,
            Err(e) => {
                warn!(hash = %key, error = %e, "Block number lookup failed, assuming head");
                mined_block
            }
        };

        let delivered = Receipt {
            transaction_hash: key.clone(),
            block_number: Some(mined_block),
            confirmations: confirmations_at(latest, mined_block),
            status: receipt.status(),
        };
        let fired = registry.emit(&key, &delivered);
        debug!(hash = %key, listeners = fired, "Receipt delivered");
        return;
    }
}

/// Connection to a local, in-process chain. Receipts are delivered explicitly
/// with [`InMemoryConnection::deliver`].
#[derive(Debug, Default)]
pub struct InMemoryConnection {
    registry: EventRegistry,
    balances: Mutex<HashMap<Address, U256>>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, address: Address, balance: U256) {
        self.balances
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(address, balance);
    }

    /// Fires every listener registered for `hash`; returns how many fired.
    pub fn deliver(&self, hash: &str, receipt: Receipt) -> usize {
        self.registry.emit(hash, &receipt)
    }

    pub fn subscription_count(&self, hash: &str) -> usize {
        self.registry.listener_count(hash)
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }
}

impl ChainConnection for InMemoryConnection {
    fn once(&self, event_key: &str, callback: ReceiptCallback) -> Result<()> {
        self.registry.register(event_key, callback);
        Ok(())
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        let balances = self.balances.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(balances.get(&address).copied().unwrap_or(U256::ZERO))
    }
}
