use spoctl::management::{
    Session, SessionPhase,
    store::{
        CredentialStore, KEY_ACCESS_TOKEN, KEY_AUTH_CODE, KEY_AUTH_PENDING, KEY_CODE_VERIFIER,
        KEY_CSRF_STATE, KEY_REFRESH_TOKEN,
    },
};

fn test_store(name: &str) -> CredentialStore {
    let root = std::env::temp_dir().join(format!(
        "spoctl-session-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    CredentialStore::at(root)
}

#[tokio::test]
async fn test_restore_authenticated_from_stored_token() {
    let store = test_store("restore");
    store.put(KEY_ACCESS_TOKEN, "stored-token").await.unwrap();

    // A durable token restores the session optimistically; validity is
    // only confirmed by the first real call.
    let session = Session::with_store(store).await;
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.access_token(), Some("stored-token"));
}

#[tokio::test]
async fn test_restore_anonymous_without_token() {
    let store = test_store("anonymous");

    let session = Session::with_store(store).await;
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(session.access_token().is_none());
}

#[tokio::test]
async fn test_logout_clears_credentials_and_view() {
    let store = test_store("logout");
    store.put(KEY_ACCESS_TOKEN, "stored-token").await.unwrap();
    store.put(KEY_REFRESH_TOKEN, "refresh-token").await.unwrap();
    // Leftovers of a half-finished login attempt
    store.put(KEY_CODE_VERIFIER, "verifier").await.unwrap();
    store.put(KEY_CSRF_STATE, "state").await.unwrap();
    store.put(KEY_AUTH_PENDING, "true").await.unwrap();
    store.put(KEY_AUTH_CODE, "unconsumed-code").await.unwrap();

    let mut session = Session::with_store(store).await;
    session.reconciler().apply_volume(80).await;

    session.logout().await;

    // Phase and in-memory state reset
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(session.access_token().is_none());

    // Every durable key is gone, including the handshake artifact and
    // the relayed-code envelope
    let store = session.store();
    assert_eq!(store.get(KEY_ACCESS_TOKEN).await, None);
    assert_eq!(store.get(KEY_REFRESH_TOKEN).await, None);
    assert_eq!(store.get(KEY_CODE_VERIFIER).await, None);
    assert_eq!(store.get(KEY_CSRF_STATE).await, None);
    assert_eq!(store.get(KEY_AUTH_PENDING).await, None);
    assert_eq!(store.get(KEY_AUTH_CODE).await, None);

    // The playback view is cleared as well
    let view = session.reconciler().snapshot().await;
    assert!(view.current_track.is_none());
    assert_eq!(view.volume, 0);
}

#[tokio::test]
async fn test_expire_is_a_full_teardown() {
    let store = test_store("expire");
    store.put(KEY_ACCESS_TOKEN, "stored-token").await.unwrap();

    let mut session = Session::with_store(store).await;
    assert!(session.is_authenticated());

    // Forced expiry (the 401 path) behaves like logout
    session.expire().await;

    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert_eq!(session.store().get(KEY_ACCESS_TOKEN).await, None);
}
