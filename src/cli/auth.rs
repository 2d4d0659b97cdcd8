use crate::{error, management::Session, success};

pub async fn auth() {
    let mut session = Session::open().await;

    match session.login().await {
        Ok(()) => match session.profile().await {
            Some(profile) => {
                let name = profile.display_name.unwrap_or(profile.id);
                success!("Authentication successful! Signed in as {}.", name);
            }
            None => success!("Authentication successful!"),
        },
        Err(e) => error!("Authentication failed: {}", e),
    }
}

pub async fn refresh() {
    let mut session = Session::open().await;

    match session.refresh().await {
        Ok(()) => success!("Access token refreshed."),
        Err(e) => error!("Token refresh failed: {}", e),
    }
}

pub async fn logout() {
    let mut session = Session::open().await;
    session.logout().await;
    success!("Signed out and cleared stored credentials.");
}
