//! # CLI Module
//!
//! User-facing command implementations. Each command opens the session,
//! delegates to the management and API layers and renders the outcome with
//! the shared output macros and tables.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - OAuth 2.0 PKCE login through the browser and local callback
//!   server
//! - [`refresh`] - Explicit access-token refresh from the stored refresh
//!   token
//! - [`logout`] - Session teardown and credential cleanup
//!
//! ### Playback
//!
//! - [`status`] - Current playback view, optionally watching continuously
//! - [`play`], [`pause`], [`next`], [`previous`] - Transport controls
//! - [`seek`], [`volume`], [`shuffle`], [`repeat`] - Controls with an
//!   optimistic view patch and a delayed authoritative refresh
//! - [`devices`], [`transfer`], [`queue`] - Device and queue handling
//!
//! ### Catalog and Library
//!
//! - [`search`] - Catalog search across tracks, albums, artists, playlists
//! - [`playlist_list`], [`playlist_create`], [`playlist_add`],
//!   [`playlist_remove`] - Playlist management
//! - [`saved`], [`recent`], [`top_tracks`], [`top_artists`], [`save`],
//!   [`unsave`], [`contains`] - Library views and liked-song toggling
//!
//! ## Error Presentation
//!
//! Control-call errors route through the session's policy: a rejected token
//! tears the session down with a visible notice, a missing active device
//! produces its own actionable message, and transient failures are reported
//! without aborting the command where partial output is still useful.

mod auth;
mod controls;
mod library;
mod playlist;
mod search;
mod status;

pub use auth::auth;
pub use auth::logout;
pub use auth::refresh;
pub use controls::devices;
pub use controls::next;
pub use controls::pause;
pub use controls::play;
pub use controls::previous;
pub use controls::queue;
pub use controls::repeat;
pub use controls::seek;
pub use controls::shuffle;
pub use controls::transfer;
pub use controls::volume;
pub use library::contains;
pub use library::recent;
pub use library::save;
pub use library::saved;
pub use library::top_artists;
pub use library::top_tracks;
pub use library::unsave;
pub use playlist::playlist_add;
pub use playlist::playlist_create;
pub use playlist::playlist_list;
pub use playlist::playlist_remove;
pub use search::search;
pub use status::status;

use crate::{error, management::Session};

/// Opens the session and insists on an authenticated phase. Exits with a
/// hint towards `spoctl auth` otherwise.
pub(crate) async fn require_session() -> Session {
    let session = Session::open().await;
    if !session.is_authenticated() {
        error!("Not authenticated. Run `spoctl auth` first.");
    }
    session
}
