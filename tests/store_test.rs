use spoctl::management::store::{
    CredentialStore, KEY_ACCESS_TOKEN, KEY_AUTH_PENDING, KEY_CODE_VERIFIER,
};

// Each test gets its own store root so runs never interfere.
fn test_store(name: &str) -> CredentialStore {
    let root = std::env::temp_dir().join(format!(
        "spoctl-store-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    CredentialStore::at(root)
}

#[tokio::test]
async fn test_put_get_roundtrip() {
    let store = test_store("roundtrip");

    store.put(KEY_ACCESS_TOKEN, "token-value").await.unwrap();

    assert_eq!(
        store.get(KEY_ACCESS_TOKEN).await.as_deref(),
        Some("token-value")
    );
}

#[tokio::test]
async fn test_get_missing_key() {
    let store = test_store("missing");

    // Absent keys read as None, not as an error
    assert_eq!(store.get(KEY_CODE_VERIFIER).await, None);
    assert!(!store.has(KEY_CODE_VERIFIER).await);
}

#[tokio::test]
async fn test_put_overwrites() {
    let store = test_store("overwrite");

    store.put(KEY_AUTH_PENDING, "true").await.unwrap();
    store.put(KEY_AUTH_PENDING, "false").await.unwrap();

    assert_eq!(store.get(KEY_AUTH_PENDING).await.as_deref(), Some("false"));
}

#[tokio::test]
async fn test_remove() {
    let store = test_store("remove");

    store.put(KEY_ACCESS_TOKEN, "token-value").await.unwrap();
    store.remove(KEY_ACCESS_TOKEN).await.unwrap();

    assert_eq!(store.get(KEY_ACCESS_TOKEN).await, None);
}

#[tokio::test]
async fn test_remove_missing_is_ok() {
    let store = test_store("remove-missing");

    // Removing a key that was never written must not fail
    assert!(store.remove(KEY_ACCESS_TOKEN).await.is_ok());
}

#[tokio::test]
async fn test_keys_are_independent() {
    let store = test_store("independent");

    store.put(KEY_ACCESS_TOKEN, "token").await.unwrap();
    store.put(KEY_CODE_VERIFIER, "verifier").await.unwrap();
    store.remove(KEY_ACCESS_TOKEN).await.unwrap();

    // Removing one key leaves the other untouched
    assert_eq!(store.get(KEY_ACCESS_TOKEN).await, None);
    assert_eq!(store.get(KEY_CODE_VERIFIER).await.as_deref(), Some("verifier"));
}
