use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_ETH_AMOUNT;
use crate::errors::{FundMeError, Result};
use crate::interfaces::{Receipt, TransactionHandle};
use crate::services::chain_connection::ChainConnection;
use crate::services::confirmation_watcher::watch;
use crate::services::fund_me_contract::FundMeContract;
use crate::services::wallet_provider::{first_account, WalletProvider};
use crate::utils::format::{display_address, format_eth, parse_eth_amount};

/// The user's wallet together with the contract proxy signed by it.
pub struct WalletSession<W, K> {
    pub provider: W,
    pub contract: K,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub connected: bool,
    pub connected_address: Option<String>,
    pub eth_amount: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            connected: false,
            connected_address: None,
            eth_amount: DEFAULT_ETH_AMOUNT.to_string(),
        }
    }
}

/// Handler entry points for connecting, checking the balance, funding and
/// withdrawing.
///
/// The plain handlers never fail: errors are logged and reported as `None` or
/// `false`. The `try_*` variants return them.
pub struct FundMeApp<W, C, K> {
    wallet: Option<WalletSession<W, K>>,
    connection: Arc<C>,
    confirmation_timeout: Option<Duration>,
    state: AppState,
}

impl<W, C, K> FundMeApp<W, C, K>
where
    W: WalletProvider,
    C: ChainConnection,
    K: FundMeContract,
{
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            wallet: None,
            connection,
            confirmation_timeout: None,
            state: AppState::default(),
        }
    }

    pub fn with_wallet(mut self, provider: W, contract: K) -> Self {
        self.wallet = Some(WalletSession { provider, contract });
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    pub fn connected_address(&self) -> Option<&str> {
        self.state.connected_address.as_deref()
    }

    pub fn eth_amount(&self) -> &str {
        &self.state.eth_amount
    }

    pub fn set_eth_amount(&mut self, amount: impl Into<String>) {
        self.state.eth_amount = amount.into();
    }

    pub fn display_address(&self) -> String {
        display_address(self.connected_address())
    }

    fn session(&self) -> Result<&WalletSession<W, K>> {
        self.wallet.as_ref().ok_or(FundMeError::WalletUnavailable)
    }

    pub async fn try_connect(&self) -> Result<Option<String>> {
        let wallet = self.session()?;
        let accounts = wallet
            .provider
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| FundMeError::AccountRequest(e.to_string()))?;
        first_account(&accounts)
    }

    pub async fn connect(&mut self) -> bool {
        if self.wallet.is_none() {
            warn!("Require install wallet");
            return false;
        }

        match self.try_connect().await {
            Ok(address) => {
                self.state.connected_address = address;
                self.state.connected = true;
            }
            Err(e) => {
                info!(error = %e, "Connect issue");
                self.state.connected = false;
                self.state.connected_address = None;
            }
        }

        debug!("Connected");
        if let Ok(wallet) = self.session() {
            match wallet.provider.request("eth_accounts", json!([])).await {
                Ok(accounts) => debug!(%accounts, "accs"),
                Err(e) => debug!(error = %e, "eth_accounts failed"),
            }
        }
        self.state.connected
    }

    pub async fn try_get_balance(&self) -> Result<String> {
        let wallet = self.session()?;
        let balance = self.connection.get_balance(wallet.contract.address()).await?;
        Ok(format_eth(balance))
    }

    pub async fn get_balance(&self) -> Option<String> {
        if self.wallet.is_none() {
            warn!("Require install wallet");
            return None;
        }
        match self.try_get_balance().await {
            Ok(balance) => {
                debug!("Balance is {}", balance);
                Some(balance)
            }
            Err(e) => {
                info!(error = %e, "Get balance issue");
                None
            }
        }
    }

    pub async fn try_fund(&self) -> Result<Receipt> {
        let wallet = self.session()?;
        debug!("Funding with {}...", self.state.eth_amount);

        let value = parse_eth_amount(&self.state.eth_amount)?;
        info!(wei = %value, "Parsed value to abi fund method");
        let transaction = wallet.contract.fund(value).await?;
        debug!(hash = transaction.hash(), "transactionResponse");

        self.wait_for_mine(&transaction).await
    }

    pub async fn fund(&self) -> Option<Receipt> {
        if self.wallet.is_none() {
            debug!("Require install wallet");
            return None;
        }
        self.try_fund()
            .await
            .map_err(|e| info!(error = %e, "Fund issue"))
            .ok()
    }

    pub async fn try_withdraw(&self) -> Result<Receipt> {
        let wallet = self.session()?;
        wallet
            .provider
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| FundMeError::AccountRequest(e.to_string()))?;

        let transaction = wallet.contract.withdraw().await?;
        self.wait_for_mine(&transaction).await
    }

    pub async fn withdraw(&self) -> Option<Receipt> {
        info!("Withdrawing...");
        if self.wallet.is_none() {
            warn!("Require install wallet");
            return None;
        }
        self.try_withdraw()
            .await
            .map_err(|e| info!(error = %e, "Withdraw issue"))
            .ok()
    }

    /// Waits for the mined receipt, which may carry a failed `status`.
    async fn wait_for_mine(&self, transaction: &TransactionHandle) -> Result<Receipt> {
        let pending = watch(transaction, self.connection.as_ref())?;
        match self.confirmation_timeout {
            None => pending.await,
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| FundMeError::ConfirmationTimeout {
                    hash: transaction.hash().to_string(),
                    secs: limit.as_secs(),
                })?,
        }
    }
}
