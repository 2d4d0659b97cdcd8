use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::{
    config,
    types::{Device, DevicesResponse, PlayerStateResponse, QueueResponse, RepeatMode},
};

/// Outcome of one poll of the player-state endpoint.
///
/// The poll producer never treats a bad tick as fatal except for `401`:
/// an unauthorized response means the token is no longer valid and the
/// session must be torn down. Everything else either updates the view
/// (`Snapshot`), clears it (`NoActivePlayback`) or is skipped until the
/// next tick (`Ignored`).
#[derive(Debug)]
pub enum PollOutcome {
    Snapshot(PlayerStateResponse),
    NoActivePlayback,
    Unauthorized,
    Ignored(StatusCode),
}

/// Fetches the current playback snapshot.
///
/// Maps the provider's status codes onto [`PollOutcome`]: `204` and `404`
/// mean no active playback, `401` means the token expired, any other
/// non-success status is reported as ignorable. A `200` body without a
/// current item is also reported as `Ignored` - the view keeps its previous
/// state, matching the polling loop's retain-on-ambiguity behavior.
pub async fn get_playback_state(token: &str) -> Result<PollOutcome, reqwest::Error> {
    let api_url = format!("{uri}/me/player", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(PollOutcome::NoActivePlayback),
        StatusCode::UNAUTHORIZED => Ok(PollOutcome::Unauthorized),
        status if status.is_success() => {
            let state = response.json::<PlayerStateResponse>().await?;
            if state.item.is_some() {
                Ok(PollOutcome::Snapshot(state))
            } else {
                Ok(PollOutcome::Ignored(status))
            }
        }
        status => Ok(PollOutcome::Ignored(status)),
    }
}

/// Errors of the fire-and-forget control calls.
///
/// `NoActiveDevice` (`404`) gets its own variant so the CLI can tell the
/// user to start playback on a device instead of showing a generic failure.
/// `Unauthorized` forces session teardown at the call site.
#[derive(Debug)]
pub enum ControlError {
    NoActiveDevice,
    Unauthorized,
    Api(StatusCode),
    Network(reqwest::Error),
}

impl From<reqwest::Error> for ControlError {
    fn from(err: reqwest::Error) -> Self {
        ControlError::Network(err)
    }
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlError::NoActiveDevice => write!(f, "no active playback device"),
            ControlError::Unauthorized => write!(f, "access token was rejected"),
            ControlError::Api(status) => write!(f, "control call failed with status {}", status),
            ControlError::Network(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ControlError {}

async fn send_control(request: reqwest::RequestBuilder) -> Result<(), ControlError> {
    let response = request.send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ControlError::NoActiveDevice),
        status if status.is_success() => Ok(()),
        status => Err(ControlError::Api(status)),
    }
}

/// Starts or resumes playback.
///
/// Without arguments the current context resumes; a context URI plays an
/// album/artist/playlist; explicit track URIs play those tracks. Context
/// and track URIs are mutually exclusive on the provider side, the context
/// wins here when both are given.
pub async fn play(
    token: &str,
    context_uri: Option<&str>,
    uris: &[String],
) -> Result<(), ControlError> {
    let api_url = format!("{uri}/me/player/play", uri = &config::spotify_apiurl());

    let body = if let Some(context) = context_uri {
        json!({ "context_uri": context })
    } else if !uris.is_empty() {
        json!({ "uris": uris })
    } else {
        json!({})
    };

    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token).json(&body)).await
}

pub async fn pause(token: &str) -> Result<(), ControlError> {
    let api_url = format!("{uri}/me/player/pause", uri = &config::spotify_apiurl());
    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token)).await
}

pub async fn skip_next(token: &str) -> Result<(), ControlError> {
    let api_url = format!("{uri}/me/player/next", uri = &config::spotify_apiurl());
    let client = Client::new();
    send_control(client.post(&api_url).bearer_auth(token)).await
}

pub async fn skip_previous(token: &str) -> Result<(), ControlError> {
    let api_url = format!("{uri}/me/player/previous", uri = &config::spotify_apiurl());
    let client = Client::new();
    send_control(client.post(&api_url).bearer_auth(token)).await
}

pub async fn seek(token: &str, position_ms: u64) -> Result<(), ControlError> {
    let api_url = format!(
        "{uri}/me/player/seek?position_ms={position}",
        uri = &config::spotify_apiurl(),
        position = position_ms
    );
    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token)).await
}

pub async fn set_volume(token: &str, volume: u8) -> Result<(), ControlError> {
    let api_url = format!(
        "{uri}/me/player/volume?volume_percent={volume}",
        uri = &config::spotify_apiurl(),
        volume = volume.min(100)
    );
    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token)).await
}

pub async fn set_shuffle(token: &str, shuffle: bool) -> Result<(), ControlError> {
    let api_url = format!(
        "{uri}/me/player/shuffle?state={state}",
        uri = &config::spotify_apiurl(),
        state = shuffle
    );
    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token)).await
}

pub async fn set_repeat(token: &str, mode: RepeatMode) -> Result<(), ControlError> {
    let api_url = format!(
        "{uri}/me/player/repeat?state={state}",
        uri = &config::spotify_apiurl(),
        state = mode.as_str()
    );
    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token)).await
}

/// Transfers playback to another device. `play` keeps the music going on
/// the target instead of transferring in a paused state.
pub async fn transfer_playback(token: &str, device_id: &str, play: bool) -> Result<(), ControlError> {
    let api_url = format!("{uri}/me/player", uri = &config::spotify_apiurl());

    let body = json!({
        "device_ids": [device_id],
        "play": play,
    });

    let client = Client::new();
    send_control(client.put(&api_url).bearer_auth(token).json(&body)).await
}

pub async fn get_devices(token: &str) -> Result<Vec<Device>, ControlError> {
    let api_url = format!("{uri}/me/player/devices", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => {
            let devices = response.json::<DevicesResponse>().await?;
            Ok(devices.devices)
        }
        status => Err(ControlError::Api(status)),
    }
}

pub async fn get_queue(token: &str) -> Result<QueueResponse, ControlError> {
    let api_url = format!("{uri}/me/player/queue", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<QueueResponse>().await?),
        status => Err(ControlError::Api(status)),
    }
}
