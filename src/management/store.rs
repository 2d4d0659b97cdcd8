use std::{io::Error, io::ErrorKind, path::PathBuf};

/// Logical key names of the durable credential store. The callback server
/// and the CLI process share these through the local data directory.
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const KEY_CODE_VERIFIER: &str = "code_verifier";
pub const KEY_CSRF_STATE: &str = "csrf_state";
pub const KEY_AUTH_PENDING: &str = "auth_pending";
pub const KEY_AUTH_CODE: &str = "auth_code";

#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "credential store I/O error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Durable key/value storage for tokens and transient handshake artifacts.
///
/// One file per logical key under the local data directory, written with
/// plain string contents. The store carries no expiry logic; ownership of
/// the keys lies with the session lifecycle (`management::Session`).
#[derive(Debug, Clone)]
pub struct CredentialStore {
    root: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("spoctl/credentials");
        Self { root }
    }

    /// Store rooted at an explicit directory. Used by tests and by callers
    /// that need an isolated credential namespace.
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;
        async_fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        async_fs::read_to_string(self.path_for(key)).await.ok()
    }

    pub async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Removes a key. Removing an absent key is not an error, so callers
    /// can tear down half-written state unconditionally.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match async_fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}
