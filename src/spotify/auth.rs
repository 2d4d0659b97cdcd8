use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{config, types::Token};

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received from the callback for an access token. This is the final step
/// in the authentication process.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
/// * `verifier` - PKCE code verifier that was generated at the start of the flow
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Complete token with access token, optional refresh token
///   and metadata
/// - `Err(String)` - Network failure, a non-success response from the token
///   endpoint, or a response body without an `access_token` field
///
/// # PKCE Security
///
/// The code verifier proves that the same client that initiated the auth
/// flow is completing it, preventing authorization code interception
/// attacks. The verifier must match the challenge that was sent in the
/// initial auth request.
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly (typically 10
/// minutes). The exchange should happen immediately after receiving the
/// code.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        let description = json["error_description"]
            .as_str()
            .unwrap_or("token exchange failed");
        return Err(format!("{} ({})", description, status));
    }

    token_from_response(&json)
}

/// Refreshes an expired access token using a refresh token.
///
/// Exchanges a refresh token for a new access token so the user does not
/// have to re-authorize in the browser. The provider may rotate the refresh
/// token; when the response omits one, the caller should keep using the old
/// refresh token.
///
/// # Arguments
///
/// * `refresh_token` - Valid refresh token obtained from a previous exchange
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - New token with fresh access token and updated expiration
/// - `Err(String)` - Error message describing the failure
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        let description = json["error_description"]
            .as_str()
            .unwrap_or("token refresh failed");
        return Err(format!("{} ({})", description, status));
    }

    token_from_response(&json)
}

fn token_from_response(json: &Value) -> Result<Token, String> {
    let Some(access_token) = json["access_token"].as_str() else {
        return Err("token response missing access_token".to_string());
    };

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"].as_str().map(str::to_string),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
