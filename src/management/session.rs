use std::time::Duration;

use crate::{
    config, info,
    management::{
        handshake::{self, HandshakeError},
        relay,
        store::{CredentialStore, KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN},
    },
    player::{EngineBridge, Reconciler, engine},
    server,
    spotify::{
        self,
        player::{ControlError, PollOutcome},
    },
    types::UserProfile,
    warning,
};

/// Fixed cadence of the remote poll producer.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Delay before the authoritative refresh that follows a control call.
pub const CONTROL_REFRESH_DELAY: Duration = Duration::from_millis(500);

/// How long a login attempt waits for the browser roundtrip.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Result of one session-driven poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTick {
    /// A snapshot was applied to the view.
    Updated,
    /// No active playback; the view was cleared.
    Cleared,
    /// Transient problem or ambiguous response; previous view retained.
    Skipped,
    /// The token was rejected and the session has been torn down.
    Expired,
}

/// Owner of the authenticated session and everything attached to it.
///
/// The session holds the credential store, the playback reconciler and the
/// optional engine bridge, and is the only component that mutates the
/// stored credentials. Phases move `Anonymous → Authenticating →
/// Authenticated` and back to `Anonymous` on logout, handshake failure or a
/// detected `401`. Construction restores a stored token optimistically; its
/// validity is confirmed lazily by the first authenticated call.
pub struct Session {
    store: CredentialStore,
    phase: SessionPhase,
    access_token: Option<String>,
    profile: Option<UserProfile>,
    reconciler: Reconciler,
    engine: Option<EngineBridge>,
}

impl Session {
    /// Opens a session backed by the default credential store.
    pub async fn open() -> Self {
        Self::with_store(CredentialStore::new()).await
    }

    /// Opens a session backed by an explicit store (tests, alternative
    /// credential namespaces).
    pub async fn with_store(store: CredentialStore) -> Self {
        let access_token = store.get(KEY_ACCESS_TOKEN).await;
        let phase = if access_token.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };

        Session {
            store,
            phase,
            access_token,
            profile: None,
            reconciler: Reconciler::new(),
            engine: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Handle to the shared playback view.
    pub fn reconciler(&self) -> Reconciler {
        self.reconciler.clone()
    }

    /// Runs the complete login flow: starts the callback server, begins the
    /// PKCE handshake (which opens the browser), waits for the relayed
    /// authorization code and exchanges it. Any failure abandons the
    /// attempt and returns the session to `Anonymous`; nothing is retried
    /// automatically.
    pub async fn login(&mut self) -> Result<(), HandshakeError> {
        self.phase = SessionPhase::Authenticating;

        let (handle, mut code_relay) = relay::channel(&self.store);
        tokio::spawn(server::start_callback_server(handle));

        if let Err(e) = handshake::begin_login(&self.store).await {
            self.phase = SessionPhase::Anonymous;
            return Err(e);
        }

        info!("Waiting for the browser login to complete...");

        let Some(code) = code_relay.recv(LOGIN_TIMEOUT).await else {
            handshake::abandon(&self.store).await;
            self.phase = SessionPhase::Anonymous;
            return Err(HandshakeError::Timeout);
        };

        match handshake::complete_login(&self.store, &code).await {
            Ok(Some(token)) => {
                self.access_token = Some(token.access_token);
                self.phase = SessionPhase::Authenticated;
                self.load_profile().await;
                Ok(())
            }
            Ok(None) => {
                // The pending flag vanished between relay and exchange
                // (cancelled or superseded attempt).
                self.phase = SessionPhase::Anonymous;
                Err(HandshakeError::Exchange(
                    "login attempt was cancelled".to_string(),
                ))
            }
            Err(e) => {
                self.phase = SessionPhase::Anonymous;
                Err(e)
            }
        }
    }

    /// Exchanges the stored refresh token for a fresh access token. This is
    /// an explicit user operation; a rejected token never refreshes itself.
    pub async fn refresh(&mut self) -> Result<(), String> {
        let Some(refresh) = self.store.get(KEY_REFRESH_TOKEN).await else {
            return Err("no refresh token stored, run a full login".to_string());
        };

        let token = spotify::auth::refresh_token(&refresh).await?;

        self.store
            .put(KEY_ACCESS_TOKEN, &token.access_token)
            .await
            .map_err(|e| e.to_string())?;
        // The provider may rotate the refresh token; keep the old one when
        // the response omits it.
        if let Some(new_refresh) = &token.refresh_token {
            self.store
                .put(KEY_REFRESH_TOKEN, new_refresh)
                .await
                .map_err(|e| e.to_string())?;
        }

        self.access_token = Some(token.access_token);
        self.phase = SessionPhase::Authenticated;
        Ok(())
    }

    /// Attaches the local engine push producer when a bridge is configured.
    /// Absence of the bridge is not an error; the remote poll carries the
    /// view alone.
    pub async fn connect_engine(&mut self) {
        let Some(addr) = config::engine_bridge_addr() else {
            return;
        };

        match engine::connect(&addr, self.reconciler.clone()).await {
            Ok(bridge) => {
                self.engine = Some(bridge);
                info!("Local playback engine connected");
            }
            Err(e) => warning!("Local playback engine unavailable: {}", e),
        }
    }

    /// One tick of the remote poll producer.
    pub async fn poll_once(&mut self) -> PollTick {
        let Some(token) = self.access_token.clone() else {
            return PollTick::Skipped;
        };

        match spotify::player::get_playback_state(&token).await {
            Ok(PollOutcome::Snapshot(state)) => {
                self.reconciler.apply_remote(&state).await;
                PollTick::Updated
            }
            Ok(PollOutcome::NoActivePlayback) => {
                self.reconciler.apply_no_playback().await;
                PollTick::Cleared
            }
            Ok(PollOutcome::Unauthorized) => {
                self.expire().await;
                PollTick::Expired
            }
            Ok(PollOutcome::Ignored(_)) => PollTick::Skipped,
            Err(e) => {
                warning!("Playback state fetch failed: {}", e);
                PollTick::Skipped
            }
        }
    }

    /// Refreshes the device list into the view.
    pub async fn refresh_devices(&mut self) {
        let Some(token) = self.access_token.clone() else {
            return;
        };

        match spotify::player::get_devices(&token).await {
            Ok(devices) => self.reconciler.apply_devices(devices).await,
            Err(ControlError::Unauthorized) => self.expire().await,
            Err(e) => warning!("Device list fetch failed: {}", e),
        }
    }

    /// Returns the user profile, fetching it on first use.
    pub async fn profile(&mut self) -> Option<UserProfile> {
        if self.profile.is_none() {
            self.load_profile().await;
        }
        self.profile.clone()
    }

    async fn load_profile(&mut self) {
        let Some(token) = self.access_token.clone() else {
            return;
        };

        match spotify::profile::get_profile(&token).await {
            Ok(profile) => {
                self.profile = Some(profile);
            }
            Err(ControlError::Unauthorized) => self.expire().await,
            Err(e) => warning!("Failed to fetch user profile: {}", e),
        }
    }

    /// Maps a control-call error onto the session policy: `401` tears the
    /// session down, a missing device produces its distinct notice, other
    /// errors are reported and swallowed.
    pub async fn handle_control_error(&mut self, err: &ControlError) {
        match err {
            ControlError::Unauthorized => self.expire().await,
            ControlError::NoActiveDevice => {
                warning!("No active device. Start playback on a Spotify device first.");
            }
            other => warning!("Playback control failed: {}", other),
        }
    }

    /// Forced teardown after a detected `401`.
    pub async fn expire(&mut self) {
        warning!("Session expired. Run `spoctl auth` to sign in again.");
        self.teardown().await;
    }

    /// Explicit logout: same teardown, user-initiated.
    pub async fn logout(&mut self) {
        self.teardown().await;
    }

    async fn teardown(&mut self) {
        self.phase = SessionPhase::Anonymous;
        self.access_token = None;
        self.profile = None;

        if let Some(engine) = self.engine.take() {
            engine.disconnect();
        }

        let _ = self.store.remove(KEY_ACCESS_TOKEN).await;
        let _ = self.store.remove(KEY_REFRESH_TOKEN).await;
        handshake::abandon(&self.store).await;

        self.reconciler.clear().await;
    }
}
