use reqwest::{Client, StatusCode};

use crate::{
    config,
    spotify::player::ControlError,
    types::{
        AddTracksRequest, CreatePlaylistRequest, Paging, Playlist, RemoveTracksRequest,
        SnapshotResponse, TrackUri,
    },
};

pub async fn get_user_playlists(token: &str, limit: u32) -> Result<Vec<Playlist>, ControlError> {
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = limit
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => {
            let page = response.json::<Paging<Playlist>>().await?;
            Ok(page.items)
        }
        status => Err(ControlError::Api(status)),
    }
}

/// Creates a playlist owned by the given user.
///
/// Collaborative playlists are not exposed on the CLI surface, so the flag
/// is always off here.
pub async fn create(
    token: &str,
    user_id: &str,
    name: String,
    description: String,
    public: bool,
) -> Result<Playlist, ControlError> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );

    let request = CreatePlaylistRequest {
        name,
        description,
        public,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<Playlist>().await?),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn add_tracks(
    token: &str,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<SnapshotResponse, ControlError> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let request = AddTracksRequest { uris };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<SnapshotResponse>().await?),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn remove_tracks(
    token: &str,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<SnapshotResponse, ControlError> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let request = RemoveTracksRequest {
        tracks: uris.into_iter().map(|uri| TrackUri { uri }).collect(),
    };

    let client = Client::new();
    let response = client
        .delete(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<SnapshotResponse>().await?),
        status => Err(ControlError::Api(status)),
    }
}
