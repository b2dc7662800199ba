//! Waits for a submitted transaction to be mined.
//!
//! A watch registers one single-fire listener on the connection, keyed by the
//! transaction hash, and resolves when that listener receives a receipt. It
//! never times out and never retries; wrap it in `tokio::time::timeout` when a
//! deadline is needed.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::errors::{FundMeError, Result};
use crate::interfaces::{Receipt, TransactionHandle};
use crate::services::chain_connection::ChainConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Pending,
    Confirmed,
}

/// Pending confirmation of one transaction.
#[derive(Debug)]
pub struct ConfirmationWatch {
    hash: String,
    receiver: oneshot::Receiver<Receipt>,
    state: WatchState,
}

impl ConfirmationWatch {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn state(&self) -> WatchState {
        self.state
    }
}

impl Future for ConfirmationWatch {
    type Output = Result<Receipt>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(receipt)) => {
                this.state = WatchState::Confirmed;
                Poll::Ready(Ok(receipt))
            }
            Poll::Ready(Err(_)) => {
                Poll::Ready(Err(FundMeError::ListenerDropped(this.hash.clone())))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Registers the listener right away and returns the pending watch.
pub fn watch<C>(transaction: &TransactionHandle, connection: &C) -> Result<ConfirmationWatch>
where
    C: ChainConnection,
{
    let hash = transaction.hash();
    if hash.is_empty() {
        return Err(FundMeError::EmptyTransactionHash);
    }
    debug!("Mining {}", hash);

    let (sender, receiver) = oneshot::channel();
    connection.once(
        hash,
        Box::new(move |receipt: Receipt| {
            info!("Completed with {} confirmations.", receipt.confirmations);
            // The watch may have been dropped by its caller.
            let _ = sender.send(receipt);
        }),
    )?;

    Ok(ConfirmationWatch {
        hash: hash.to_string(),
        receiver,
        state: WatchState::Pending,
    })
}

/// Resolves once the connection reports `transaction` as mined.
pub async fn listen_for_transaction_mine<C>(
    transaction: &TransactionHandle,
    connection: &C,
) -> Result<()>
where
    C: ChainConnection,
{
    watch(transaction, connection)?.await.map(|_| ())
}
