use reqwest::{Client, StatusCode};

use crate::{
    config,
    spotify::player::ControlError,
    types::SearchResponse,
    utils::SearchKinds,
};

/// Searches the catalog for tracks, albums, artists and/or playlists.
///
/// A plain request/response wrapper: no retry, no pagination. The requested
/// result types come from the parsed `--type` flag; the query string is
/// encoded by the HTTP client.
pub async fn search(
    token: &str,
    query: &str,
    kinds: &SearchKinds,
    limit: u32,
) -> Result<SearchResponse, ControlError> {
    let api_url = format!("{uri}/search", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(&[
            ("q", query),
            ("type", &kinds.as_query()),
            ("limit", &limit.to_string()),
        ])
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<SearchResponse>().await?),
        status => Err(ControlError::Api(status)),
    }
}
