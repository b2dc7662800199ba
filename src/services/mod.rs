pub mod chain_connection;
pub mod confirmation_watcher;
pub mod event_registry;
pub mod fund_me_app;
pub mod fund_me_contract;
pub mod wallet_provider;

pub use chain_connection::{ChainConnection, InMemoryConnection, RpcConnection};
pub use confirmation_watcher::{listen_for_transaction_mine, watch, ConfirmationWatch, WatchState};
pub use event_registry::{EventRegistry, ReceiptCallback};
pub use fund_me_app::{AppState, FundMeApp, WalletSession};
pub use fund_me_contract::{FundMeContract, RpcFundMeContract};
pub use wallet_provider::{LocalWalletProvider, WalletProvider};
