use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{management::RelayHandle, warning};

/// OAuth callback endpoint.
///
/// This is the "callback page" of the login flow: it validates the CSRF
/// `state` parameter against the stored handshake artifact and, on success,
/// relays the authorization code back to the waiting login attempt through
/// both relay channels. The code is never exchanged here; consumption and
/// the pending-flag guard live with the receiver.
///
/// A `state` mismatch is a hard authentication failure (possible forgery)
/// and the code is not relayed. A provider-reported `error` (e.g. the user
/// denied access) is shown and likewise never relayed. The response is a
/// small HTML page asking the user to close the window either way.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(relay): Extension<RelayHandle>,
) -> Html<String> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was not granted: {}", error);
        return page(&format!("Authorization failed: {}.", error));
    }

    let Some(code) = params.get("code") else {
        return page("Missing authorization code.");
    };

    let Some(state) = params.get("state") else {
        return page("Missing state parameter.");
    };

    if !relay.csrf_matches(state).await {
        warning!("Callback state mismatch, dropping authorization code");
        return page("State mismatch. The login attempt was rejected.");
    }

    relay.deliver(code).await;

    page("Authentication successful. You can close this window.")
}

fn page(message: &str) -> Html<String> {
    Html(format!("<h2>{}</h2>", message))
}
