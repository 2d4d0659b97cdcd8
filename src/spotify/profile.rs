use reqwest::{Client, StatusCode};

use crate::{config, spotify::player::ControlError, types::UserProfile};

/// Fetches the authenticated user's profile. Done once per session after
/// entering the authenticated state.
pub async fn get_profile(token: &str) -> Result<UserProfile, ControlError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ControlError::Unauthorized),
        status if status.is_success() => Ok(response.json::<UserProfile>().await?),
        status => Err(ControlError::Api(status)),
    }
}
