use crate::{
    config,
    management::store::{
        CredentialStore, KEY_ACCESS_TOKEN, KEY_AUTH_CODE, KEY_AUTH_PENDING, KEY_CODE_VERIFIER,
        KEY_CSRF_STATE, KEY_REFRESH_TOKEN, StoreError,
    },
    spotify,
    types::Token,
    utils, warning,
};

#[derive(Debug)]
pub enum HandshakeError {
    Store(StoreError),
    Exchange(String),
    Timeout,
}

impl From<StoreError> for HandshakeError {
    fn from(err: StoreError) -> Self {
        HandshakeError::Store(err)
    }
}

impl std::fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandshakeError::Store(e) => write!(f, "{}", e),
            HandshakeError::Exchange(e) => write!(f, "token exchange failed: {}", e),
            HandshakeError::Timeout => write!(f, "authentication timed out"),
        }
    }
}

impl std::error::Error for HandshakeError {}

/// Starts a new login attempt.
///
/// Generates the PKCE code verifier and challenge plus a CSRF state token,
/// persists the handshake artifact (verifier, state, pending flag) to the
/// credential store and opens the provider's authorization page in the
/// user's browser. A new attempt overwrites whatever artifact a previous
/// attempt left behind; at most one is valid at a time.
///
/// Returns the authorization URL so callers can print it when the browser
/// could not be opened automatically.
pub async fn begin_login(store: &CredentialStore) -> Result<String, HandshakeError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let csrf_state = utils::generate_state_token();

    // The artifact must be durable before the redirect happens: the
    // callback may be served by a different process invocation.
    store.put(KEY_CODE_VERIFIER, &code_verifier).await?;
    store.put(KEY_CSRF_STATE, &csrf_state).await?;
    store.put(KEY_AUTH_PENDING, "true").await?;

    let auth_url = format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&code_challenge_method=S256&code_challenge={code_challenge}&state={state}&show_dialog=false",
        auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        scope = config::spotify_scope().replace(' ', "%20"),
        code_challenge = code_challenge,
        state = csrf_state,
    );

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    Ok(auth_url)
}

/// Exchanges a relayed authorization code for a token and stores it.
///
/// Returns `Ok(None)` when no login is pending: stale or duplicate codes
/// arrive after a cancellation, a finished attempt or a second login, and
/// must be ignored rather than exchanged. On success the access token (and
/// refresh token, if the provider issued one) is written to the store and
/// the handshake artifact is destroyed. On failure the pending flag is
/// cleared and the attempt is abandoned; nothing is retried automatically.
pub async fn complete_login(
    store: &CredentialStore,
    code: &str,
) -> Result<Option<Token>, HandshakeError> {
    if !store.has(KEY_AUTH_PENDING).await {
        return Ok(None);
    }

    let Some(verifier) = store.get(KEY_CODE_VERIFIER).await else {
        abandon(store).await;
        return Err(HandshakeError::Exchange(
            "code verifier missing from store".to_string(),
        ));
    };

    match spotify::auth::exchange_code_pkce(code, &verifier).await {
        Ok(token) => {
            store.put(KEY_ACCESS_TOKEN, &token.access_token).await?;
            if let Some(refresh) = &token.refresh_token {
                store.put(KEY_REFRESH_TOKEN, refresh).await?;
            }
            clear_artifact(store).await;
            Ok(Some(token))
        }
        Err(e) => {
            let _ = store.remove(KEY_AUTH_PENDING).await;
            Err(HandshakeError::Exchange(e))
        }
    }
}

/// Destroys the verifier/state/pending triple of the current attempt.
pub async fn clear_artifact(store: &CredentialStore) {
    let _ = store.remove(KEY_CODE_VERIFIER).await;
    let _ = store.remove(KEY_CSRF_STATE).await;
    let _ = store.remove(KEY_AUTH_PENDING).await;
}

/// Abandons an in-flight attempt, also dropping any relayed code that was
/// never consumed.
pub async fn abandon(store: &CredentialStore) {
    clear_artifact(store).await;
    let _ = store.remove(KEY_AUTH_CODE).await;
}
