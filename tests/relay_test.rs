use std::time::Duration;

use spoctl::management::{
    handshake, relay,
    store::{CredentialStore, KEY_AUTH_CODE, KEY_AUTH_PENDING, KEY_CSRF_STATE},
};

fn test_store(name: &str) -> CredentialStore {
    let root = std::env::temp_dir().join(format!(
        "spoctl-relay-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    CredentialStore::at(root)
}

#[tokio::test]
async fn test_code_delivered_and_consumed_once() {
    let store = test_store("consume-once");
    store.put(KEY_AUTH_PENDING, "true").await.unwrap();

    let (handle, mut code_relay) = relay::channel(&store);

    // Delivery goes through both channels: the durable key and the
    // direct message.
    handle.deliver("auth-code-1").await;

    let code = code_relay.recv(Duration::from_secs(2)).await;
    assert_eq!(code.as_deref(), Some("auth-code-1"));

    // Consumption deletes the envelope
    assert_eq!(store.get(KEY_AUTH_CODE).await, None);

    // The exchange that follows a consumed code clears the pending flag;
    // after that, whichever redundant channel fires late is dropped and
    // no second exchange can happen.
    store.remove(KEY_AUTH_PENDING).await.unwrap();
    let second = code_relay.recv(Duration::from_millis(200)).await;
    assert_eq!(second, None);
}

#[tokio::test]
async fn test_fallback_channel_alone_delivers() {
    let store = test_store("fallback-only");
    store.put(KEY_AUTH_PENDING, "true").await.unwrap();

    let (_handle, mut code_relay) = relay::channel(&store);

    // Simulate a callback served by another process: only the durable
    // key is written, no direct message arrives.
    store.put(KEY_AUTH_CODE, "auth-code-2").await.unwrap();

    let code = code_relay.recv(Duration::from_secs(3)).await;
    assert_eq!(code.as_deref(), Some("auth-code-2"));
    assert_eq!(store.get(KEY_AUTH_CODE).await, None);
}

#[tokio::test]
async fn test_code_dropped_when_no_login_pending() {
    let store = test_store("not-pending");

    let (handle, mut code_relay) = relay::channel(&store);

    // No pending flag: a stale code from a previous attempt arrives.
    handle.deliver("stale-code").await;

    let code = code_relay.recv(Duration::from_millis(300)).await;
    assert_eq!(code, None);

    // The stale envelope is cleaned up rather than left behind.
    assert_eq!(store.get(KEY_AUTH_CODE).await, None);
}

#[tokio::test]
async fn test_recv_times_out_without_delivery() {
    let store = test_store("timeout");
    store.put(KEY_AUTH_PENDING, "true").await.unwrap();

    let (_handle, mut code_relay) = relay::channel(&store);

    let code = code_relay.recv(Duration::from_millis(200)).await;
    assert_eq!(code, None);
}

#[tokio::test]
async fn test_csrf_state_validation() {
    let store = test_store("csrf");
    store.put(KEY_CSRF_STATE, "expected-state").await.unwrap();

    let (handle, _code_relay) = relay::channel(&store);

    assert!(handle.csrf_matches("expected-state").await);
    assert!(!handle.csrf_matches("forged-state").await);
}

#[tokio::test]
async fn test_complete_login_ignores_code_when_not_pending() {
    let store = test_store("complete-not-pending");

    // No handshake artifact exists; the code must be ignored before any
    // exchange is attempted (this would otherwise hit the network).
    let result = handshake::complete_login(&store, "late-code").await.unwrap();
    assert!(result.is_none());
}
