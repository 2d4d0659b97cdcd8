use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{Instant, interval, sleep_until},
};

use crate::management::store::{CredentialStore, KEY_AUTH_CODE, KEY_AUTH_PENDING, KEY_CSRF_STATE};

/// How often the fallback storage key is checked while waiting for a code.
const FALLBACK_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Creates the two halves of the authorization-code relay.
///
/// The [`RelayHandle`] goes to the callback server, the [`CodeRelay`] stays
/// with the login waiter. Both share the credential store so delivery works
/// even when the direct channel has no receiver (e.g. the callback was
/// served by a later process invocation).
pub fn channel(store: &CredentialStore) -> (RelayHandle, CodeRelay) {
    let (tx, rx) = mpsc::channel(4);
    (
        RelayHandle {
            tx,
            store: store.clone(),
        },
        CodeRelay {
            rx,
            store: store.clone(),
        },
    )
}

/// Sending side of the relay, held by the callback handler.
///
/// Delivery is at-least-once across two redundant channels: the durable
/// storage key (fallback) and the in-process message channel (direct). The
/// consuming side makes the combined delivery exactly-once.
#[derive(Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<String>,
    store: CredentialStore,
}

impl RelayHandle {
    /// Validates the CSRF `state` query parameter against the stored value.
    pub async fn csrf_matches(&self, state: &str) -> bool {
        self.store.get(KEY_CSRF_STATE).await.as_deref() == Some(state)
    }

    /// Delivers an authorization code through both channels.
    ///
    /// The fallback key is written first so a waiter that misses the direct
    /// message still finds the code on its next poll tick. A full or closed
    /// direct channel is not an error.
    pub async fn deliver(&self, code: &str) {
        let _ = self.store.put(KEY_AUTH_CODE, code).await;
        let _ = self.tx.try_send(code.to_string());
    }
}

/// Receiving side of the relay, held by the login waiter.
pub struct CodeRelay {
    rx: mpsc::Receiver<String>,
    store: CredentialStore,
}

impl CodeRelay {
    /// Waits for an authorization code on either channel.
    ///
    /// Listens on the direct message channel and polls the fallback storage
    /// key once per second, whichever fires first. Every candidate passes
    /// through the consumption rule before it is returned; a candidate that
    /// is dropped (no pending login) does not end the wait. Returns `None`
    /// when the timeout elapses without a consumable code.
    pub async fn recv(&mut self, timeout: Duration) -> Option<String> {
        let deadline = Instant::now() + timeout;
        let mut tick = interval(FALLBACK_POLL_INTERVAL);
        let mut direct_open = true;

        loop {
            tokio::select! {
                _ = sleep_until(deadline) => {
                    return None;
                }
                msg = self.rx.recv(), if direct_open => {
                    match msg {
                        Some(code) => {
                            if let Some(code) = self.consume(code).await {
                                return Some(code);
                            }
                        }
                        // Sender gone; rely on the fallback poll alone.
                        None => direct_open = false,
                    }
                }
                _ = tick.tick() => {
                    if let Some(code) = self.store.get(KEY_AUTH_CODE).await {
                        if let Some(code) = self.consume(code).await {
                            return Some(code);
                        }
                    }
                }
            }
        }
    }

    /// Applies the consumption rule to a delivered code.
    ///
    /// The pending flag is checked first: a code arriving without an
    /// in-flight login (cancelled, already completed, or superseded) is
    /// dropped. The envelope key is removed in both cases, so the second
    /// delivery of the same code finds nothing and the overall effect is
    /// exactly-once.
    async fn consume(&self, code: String) -> Option<String> {
        let pending = self.store.has(KEY_AUTH_PENDING).await;
        let _ = self.store.remove(KEY_AUTH_CODE).await;
        if pending { Some(code) } else { None }
    }
}
