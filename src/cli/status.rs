use tokio::time::interval;

use crate::{
    cli::require_session,
    info,
    management::{POLL_INTERVAL, PollTick, Session},
    types::{DeviceTableRow, PlaybackView, RepeatMode},
    utils,
};

pub async fn status(watch: bool) {
    let mut session = require_session().await;

    if watch {
        watch_loop(session).await;
        return;
    }

    if session.poll_once().await == PollTick::Expired {
        return;
    }
    session.refresh_devices().await;
    if !session.is_authenticated() {
        return;
    }

    let view = session.reconciler().snapshot().await;
    print_view(&view);
}

/// Continuous reconciliation: connects the local engine when configured and
/// keeps polling on the fixed cadence, printing a line whenever the playing
/// track or transport state changes. Runs until the session expires or the
/// process is interrupted.
async fn watch_loop(mut session: Session) {
    session.connect_engine().await;

    let mut tick = interval(POLL_INTERVAL);
    let mut last_line = String::new();

    loop {
        tick.tick().await;

        if session.poll_once().await == PollTick::Expired {
            return;
        }

        let view = session.reconciler().snapshot().await;
        let line = describe(&view);
        if line != last_line {
            info!("{}", line);
            last_line = line;
        }
    }
}

fn describe(view: &PlaybackView) -> String {
    match &view.current_track {
        Some(track) => format!(
            "{} - {} [{}{}{}]",
            track.artist_names(),
            track.name,
            if view.is_playing { "playing" } else { "paused" },
            if view.shuffle { ", shuffle" } else { "" },
            match view.repeat {
                RepeatMode::Off => "",
                RepeatMode::Context => ", repeat",
                RepeatMode::Track => ", repeat one",
            },
        ),
        None => "No active playback".to_string(),
    }
}

fn print_view(view: &PlaybackView) {
    match &view.current_track {
        Some(track) => {
            let state = if view.is_playing { "Playing" } else { "Paused" };
            info!(
                "{}: {} - {} ({} / {})",
                state,
                track.artist_names(),
                track.name,
                utils::format_duration(view.position_ms),
                utils::format_duration(view.duration_ms)
            );
            info!(
                "Shuffle {} | repeat {} | volume {}%",
                if view.shuffle { "on" } else { "off" },
                view.repeat,
                view.volume
            );
        }
        None => info!("No active playback."),
    }

    if !view.devices.is_empty() {
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
    }
}
