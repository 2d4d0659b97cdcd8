//! # API Module
//!
//! HTTP endpoints for the local callback server.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles OAuth callback requests from the authorization
//!   server: CSRF state validation and relaying of the authorization code to
//!   the waiting login attempt.
//! - [`health`] - Health check returning application status and version.
//!
//! Built on [Axum](https://docs.rs/axum); each endpoint is an async function
//! wired into the router in `crate::server`.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
