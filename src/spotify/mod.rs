//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API: token exchange and refresh, the
//! playback status/control surface, and the thin request/response wrappers
//! for search, playlists, library and profile data.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Session)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE token exchange/refresh)
//!     ├── Playback (status poll, control calls, devices, queue)
//!     ├── Search (tracks, albums, artists, playlists)
//!     ├── Playlists (list, create, add/remove tracks)
//!     ├── Library (saved tracks, recently played, top tracks/artists)
//!     └── Profile (current user)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Status handling follows one policy across the module:
//!
//! - `401` is surfaced as its own variant everywhere ([`player::PollOutcome::Unauthorized`],
//!   [`player::ControlError::Unauthorized`]) so the session lifecycle can
//!   tear the session down on any authenticated call.
//! - `404` on control calls means "no active device" and gets a distinct
//!   variant with an actionable message.
//! - Other non-success statuses are plain errors for user actions and
//!   ignorable for the polling loop; nothing in this module retries or
//!   backs off.
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 PKCE exchanges. The code verifier
//! binds the authorization code to this client without a stored client
//! secret; generation of the verifier/challenge pair and the browser-facing
//! part of the flow live in `management::handshake`.

pub mod auth;
pub mod library;
pub mod player;
pub mod playlist;
pub mod profile;
pub mod search;
