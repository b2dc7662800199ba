use thiserror::Error;

#[derive(Debug, Error)]
pub enum FundMeError {
    #[error("no wallet provider available")]
    WalletUnavailable,

    #[error("account request failed: {0}")]
    AccountRequest(String),

    #[error("invalid ETH amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("transaction handle has an empty hash")]
    EmptyTransactionHash,

    #[error("invalid transaction hash: {0}")]
    InvalidTransactionHash(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed RPC response: {0}")]
    MalformedResponse(String),

    /// The connection discarded the listener for this hash without firing it.
    #[error("listener for {0} was dropped before a receipt arrived")]
    ListenerDropped(String),

    #[error("a tokio runtime is required to poll for receipts")]
    NoRuntime,

    #[error("no confirmation for {hash} within {secs}s")]
    ConfirmationTimeout { hash: String, secs: u64 },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FundMeError {
    fn from(e: reqwest::Error) -> Self {
        FundMeError::Transport(e.to_string())
    }
}

impl From<alloy::transports::TransportError> for FundMeError {
    fn from(e: alloy::transports::TransportError) -> Self {
        match e.as_error_resp() {
            Some(payload) => FundMeError::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            None => FundMeError::Transport(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FundMeError>;
