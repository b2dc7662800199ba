//! Confirmation watcher behaviour against an in-memory connection

use std::time::Duration;

use fund_me_client::interfaces::{Receipt, TransactionHandle};
use fund_me_client::services::{listen_for_transaction_mine, watch, InMemoryConnection, WatchState};
use fund_me_client::FundMeError;
use tokio::time::timeout;

const BOUNDED_WAIT: Duration = Duration::from_millis(50);

#[tokio::test]
async fn registers_exactly_one_subscription_per_watch() {
    let conn = InMemoryConnection::new();
    let _pending = watch(&TransactionHandle::new("0xabc"), &conn).unwrap();

    assert_eq!(conn.subscription_count("0xabc"), 1);
    assert_eq!(conn.registry().pending_keys(), vec!["0xabc"]);
}

#[tokio::test]
async fn resolves_when_matching_receipt_arrives() {
    let conn = InMemoryConnection::new();
    let tx = TransactionHandle::new("0xabc");
    let pending = watch(&tx, &conn).unwrap();

    assert_eq!(conn.deliver("0xabc", Receipt::confirmed("0xabc", 1)), 1);

    let receipt = timeout(BOUNDED_WAIT, pending).await.unwrap().unwrap();
    assert_eq!(receipt.confirmations, 1);
    assert_eq!(conn.subscription_count("0xabc"), 0);
}

#[tokio::test]
async fn listen_completes_without_value() {
    let conn = InMemoryConnection::new();
    let tx = TransactionHandle::new("0xabc");

    let (result, fired) = tokio::join!(listen_for_transaction_mine(&tx, &conn), async {
        tokio::task::yield_now().await;
        conn.deliver("0xabc", Receipt::confirmed("0xabc", 1))
    });

    assert_eq!(fired, 1);
    assert!(result.is_ok());
}

#[tokio::test]
async fn stays_pending_without_receipt() {
    let conn = InMemoryConnection::new();
    let pending = watch(&TransactionHandle::new("0xabc"), &conn).unwrap();

    assert!(timeout(BOUNDED_WAIT, pending).await.is_err());
    // Still registered: nothing times out on its own.
    assert_eq!(conn.subscription_count("0xabc"), 1);
}

#[tokio::test]
async fn receipt_for_other_hash_does_not_resolve() {
    let conn = InMemoryConnection::new();
    let mut pending = watch(&TransactionHandle::new("0xabc"), &conn).unwrap();

    assert_eq!(conn.deliver("0xdef", Receipt::confirmed("0xdef", 1)), 0);

    assert!(timeout(BOUNDED_WAIT, &mut pending).await.is_err());
    assert_eq!(pending.state(), WatchState::Pending);
    assert_eq!(conn.subscription_count("0xabc"), 1);
}

#[tokio::test]
async fn repeated_watches_are_independent() {
    let conn = InMemoryConnection::new();
    let tx = TransactionHandle::new("0xabc");
    let first = watch(&tx, &conn).unwrap();
    let second = watch(&tx, &conn).unwrap();
    assert_eq!(conn.subscription_count("0xabc"), 2);

    assert_eq!(conn.deliver("0xabc", Receipt::confirmed("0xabc", 2)), 2);

    let (a, b) = tokio::join!(timeout(BOUNDED_WAIT, first), timeout(BOUNDED_WAIT, second));
    assert_eq!(a.unwrap().unwrap().confirmations, 2);
    assert_eq!(b.unwrap().unwrap().confirmations, 2);
}

#[tokio::test]
async fn dropping_one_watch_leaves_the_other_intact() {
    let conn = InMemoryConnection::new();
    let tx = TransactionHandle::new("0xabc");
    let abandoned = watch(&tx, &conn).unwrap();
    let kept = watch(&tx, &conn).unwrap();
    drop(abandoned);

    conn.deliver("0xabc", Receipt::confirmed("0xabc", 1));
    assert!(timeout(BOUNDED_WAIT, kept).await.unwrap().is_ok());
}

#[tokio::test]
async fn empty_hash_is_rejected() {
    let conn = InMemoryConnection::new();
    let err = listen_for_transaction_mine(&TransactionHandle::new(""), &conn)
        .await
        .unwrap_err();

    assert!(matches!(err, FundMeError::EmptyTransactionHash));
    assert!(conn.registry().is_empty());
}

#[tokio::test]
async fn torn_down_connection_reports_dropped_listener() {
    let conn = InMemoryConnection::new();
    let pending = watch(&TransactionHandle::new("0xabc"), &conn).unwrap();
    drop(conn);

    let err = timeout(BOUNDED_WAIT, pending).await.unwrap().unwrap_err();
    assert!(matches!(err, FundMeError::ListenerDropped(hash) if hash == "0xabc"));
}
