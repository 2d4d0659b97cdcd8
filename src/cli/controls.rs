use tokio::time::sleep;

use crate::{
    cli::require_session,
    error, info,
    management::{CONTROL_REFRESH_DELAY, PollTick, Session},
    spotify,
    success,
    types::{DeviceTableRow, RepeatMode, TrackTableRow},
    utils,
};

/// Picks up the provider's authoritative state roughly half a second after
/// a control call and prints the result. The control call itself never
/// waits for this.
async fn refresh_after_control(session: &mut Session) {
    sleep(CONTROL_REFRESH_DELAY).await;

    if session.poll_once().await == PollTick::Expired {
        return;
    }

    let view = session.reconciler().snapshot().await;
    match &view.current_track {
        Some(track) => info!(
            "Now: {} - {} [{}]",
            track.artist_names(),
            track.name,
            if view.is_playing { "playing" } else { "paused" }
        ),
        None => info!("No active playback."),
    }
}

pub async fn play(context_uri: Option<String>, tracks: Vec<String>) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::play(&token, context_uri.as_deref(), &tracks).await {
        Ok(()) => refresh_after_control(&mut session).await,
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn pause() {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::pause(&token).await {
        Ok(()) => refresh_after_control(&mut session).await,
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn next() {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::skip_next(&token).await {
        Ok(()) => refresh_after_control(&mut session).await,
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn previous() {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::skip_previous(&token).await {
        Ok(()) => refresh_after_control(&mut session).await,
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn seek(position: String) {
    let position_ms = match utils::parse_position(&position) {
        Ok(p) => p,
        Err(e) => error!("{}", e),
    };

    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::seek(&token, position_ms).await {
        Ok(()) => {
            session.reconciler().apply_seek(position_ms).await;
            refresh_after_control(&mut session).await;
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn volume(level: u8) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::set_volume(&token, level).await {
        Ok(()) => {
            session.reconciler().apply_volume(level).await;
            success!("Volume set to {}%.", level.min(100));
            refresh_after_control(&mut session).await;
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn shuffle(state: bool) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::set_shuffle(&token, state).await {
        Ok(()) => {
            session.reconciler().apply_shuffle(state).await;
            success!("Shuffle {}.", if state { "on" } else { "off" });
            refresh_after_control(&mut session).await;
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn repeat(mode: RepeatMode) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::set_repeat(&token, mode).await {
        Ok(()) => {
            session.reconciler().apply_repeat(mode).await;
            success!("Repeat mode set to {}.", mode);
            refresh_after_control(&mut session).await;
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn transfer(device_id: String, paused: bool) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::transfer_playback(&token, &device_id, !paused).await {
        Ok(()) => {
            success!("Playback transferred.");
            refresh_after_control(&mut session).await;
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn devices() {
    let mut session = require_session().await;
    session.refresh_devices().await;
    if !session.is_authenticated() {
        return;
    }

    let view = session.reconciler().snapshot().await;
    if view.devices.is_empty() {
        info!("No devices available. Open Spotify somewhere first.");
        return;
    }

    let rows: Vec<DeviceTableRow> = view
        .devices
        .iter()
        .map(|device| DeviceTableRow {
            active: if device.is_active { "*".to_string() } else { String::new() },
            name: device.name.clone(),
            kind: device.device_type.clone(),
            volume: device
                .volume_percent
                .map(|v| format!("{}%", v))
                .unwrap_or_default(),
            id: device.id.clone().unwrap_or_default(),
        })
        .collect();

    println!("{}", tabled::Table::new(rows));
    info!("Transfer with `spoctl transfer <device-id>`.");
}

pub async fn queue() {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::player::get_queue(&token).await {
        Ok(queue) => {
            if let Some(track) = &queue.currently_playing {
                info!("Now playing: {} - {}", track.artist_names(), track.name);
            }

            if queue.queue.is_empty() {
                info!("The queue is empty.");
                return;
            }

            let rows: Vec<TrackTableRow> = queue
                .queue
                .iter()
                .map(|track| TrackTableRow {
                    name: track.name.clone(),
                    artists: track.artist_names(),
                    album: track.album.name.clone(),
                    uri: track.uri.clone(),
                })
                .collect();

            println!("{}", tabled::Table::new(rows));
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}
