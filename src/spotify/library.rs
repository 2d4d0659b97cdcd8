use reqwest::{Client, StatusCode};

use crate::{
    config,
    spotify::player::ControlError,
    types::{ArtistResult, Paging, RecentlyPlayedItem, SavedTrackItem, Track},
};

/// Affinity window for the top-tracks/top-artists endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" | "short_term" => Ok(TimeRange::Short),
            "medium" | "medium_term" => Ok(TimeRange::Medium),
            "long" | "long_term" => Ok(TimeRange::Long),
            other => Err(format!(
                "invalid time range '{}', expected short, medium or long",
                other
            )),
        }
    }
}

pub async fn get_saved_tracks(
    token: &str,
    limit: u32,
) -> Result<Paging<SavedTrackItem>, ControlError> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = limit
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<Paging<SavedTrackItem>>().await?),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn save_tracks(token: &str, ids: &[String]) -> Result<(), ControlError> {
    let api_url = format!(
        "{uri}/me/tracks?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = ids.join(",")
    );

    let client = Client::new();
    let response = client.put(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(()),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn remove_saved_tracks(token: &str, ids: &[String]) -> Result<(), ControlError> {
    let api_url = format!(
        "{uri}/me/tracks?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = ids.join(",")
    );

    let client = Client::new();
    let response = client.delete(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(()),
        status => Err(ControlError::Api(status)),
    }
}

/// Checks which of the given track ids are in the user's liked songs.
/// The response is a bare JSON array of booleans in input order.
pub async fn check_saved_tracks(token: &str, ids: &[String]) -> Result<Vec<bool>, ControlError> {
    let api_url = format!(
        "{uri}/me/tracks/contains?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = ids.join(",")
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<Vec<bool>>().await?),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn get_recently_played(
    token: &str,
    limit: u32,
) -> Result<Paging<RecentlyPlayedItem>, ControlError> {
    let api_url = format!(
        "{uri}/me/player/recently-played?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = limit
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<Paging<RecentlyPlayedItem>>().await?),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn get_top_tracks(
    token: &str,
    range: TimeRange,
    limit: u32,
) -> Result<Paging<Track>, ControlError> {
    let api_url = format!(
        "{uri}/me/top/tracks?time_range={range}&limit={limit}",
        uri = &config::spotify_apiurl(),
        range = range.as_str(),
        limit = limit
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<Paging<Track>>().await?),
        status => Err(ControlError::Api(status)),
    }
}

pub async fn get_top_artists(
    token: &str,
    range: TimeRange,
    limit: u32,
) -> Result<Paging<ArtistResult>, ControlError> {
    let api_url = format!(
        "{uri}/me/top/artists?time_range={range}&limit={limit}",
        uri = &config::spotify_apiurl(),
        range = range.as_str(),
        limit = limit
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<Paging<ArtistResult>>().await?),
        status => Err(ControlError::Api(status)),
    }
}
