use crate::{
    cli::require_session,
    error, info, spotify, success,
    types::PlaylistTableRow,
};

pub async fn playlist_list() {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::playlist::get_user_playlists(&token, 50).await {
        Ok(playlists) => {
            if playlists.is_empty() {
                info!("No playlists yet.");
                return;
            }

            let rows: Vec<PlaylistTableRow> = playlists
                .iter()
                .map(|playlist| PlaylistTableRow {
                    name: playlist.name.clone(),
                    tracks: playlist
                        .tracks
                        .as_ref()
                        .map(|t| t.total.to_string())
                        .unwrap_or_default(),
                    owner: playlist
                        .owner
                        .as_ref()
                        .and_then(|o| o.display_name.clone())
                        .unwrap_or_default(),
                    id: playlist.id.clone(),
                })
                .collect();

            println!("{}", tabled::Table::new(rows));
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn playlist_create(name: String, description: Option<String>, public: bool) {
    let mut session = require_session().await;

    // Playlist creation addresses the owner by user id.
    let Some(profile) = session.profile().await else {
        error!("Could not resolve the user profile; try again after `spoctl auth`.");
    };

    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::playlist::create(
        &token,
        &profile.id,
        name,
        description.unwrap_or_default(),
        public,
    )
    .await
    {
        Ok(playlist) => success!("Created playlist {} ({}).", playlist.name, playlist.id),
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn playlist_add(playlist_id: String, uris: Vec<String>) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    // The tracks endpoint accepts at most 100 URIs per request.
    for chunk in uris.chunks(100) {
        match spotify::playlist::add_tracks(&token, &playlist_id, chunk.to_vec()).await {
            Ok(_) => success!("Added {} track(s).", chunk.len()),
            Err(e) => {
                session.handle_control_error(&e).await;
                return;
            }
        }
    }
}

pub async fn playlist_remove(playlist_id: String, uris: Vec<String>) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    for chunk in uris.chunks(100) {
        match spotify::playlist::remove_tracks(&token, &playlist_id, chunk.to_vec()).await {
            Ok(_) => success!("Removed {} track(s).", chunk.len()),
            Err(e) => {
                session.handle_control_error(&e).await;
                return;
            }
        }
    }
}
