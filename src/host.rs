//! Integration with an embedding mini-app host.
//!
//! A host that wraps this client hands over a ready/context signal and an
//! optional user identity (numeric id plus display name). Only those two
//! fields are read here; once initialization finishes the client signals
//! readiness back by announcing the context. Without a host the context is
//! still marked ready so the client runs standalone.

use crate::{config, info};

#[derive(Debug, Clone)]
pub struct HostUser {
    pub id: u64,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HostContext {
    ready: bool,
    user: Option<HostUser>,
}

impl HostContext {
    /// Reads the host-provided identity from the environment and marks the
    /// context ready.
    pub fn init() -> Self {
        let user = config::host_user_id().map(|id| HostUser {
            id,
            username: config::host_username(),
        });

        HostContext { ready: true, user }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn user(&self) -> Option<&HostUser> {
        self.user.as_ref()
    }

    /// Signals back that the client finished initializing.
    pub fn announce(&self) {
        if let Some(user) = &self.user {
            match &user.username {
                Some(name) => info!("Mini-app host user: {} (id {})", name, user.id),
                None => info!("Mini-app host user id: {}", user.id),
            }
        }
    }
}
