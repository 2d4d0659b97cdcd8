use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    cli::require_session,
    info, spotify,
    spotify::library::TimeRange,
    success,
    types::{ArtistTableRow, RecentTableRow, TrackTableRow},
};

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn track_rows<'a, I: Iterator<Item = &'a crate::types::Track>>(tracks: I) -> Vec<TrackTableRow> {
    tracks
        .map(|track| TrackTableRow {
            name: track.name.clone(),
            artists: track.artist_names(),
            album: track.album.name.clone(),
            uri: track.uri.clone(),
        })
        .collect()
}

pub async fn saved(limit: u32) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    let pb = spinner("Loading liked songs...");
    let result = spotify::library::get_saved_tracks(&token, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(page) => {
            if page.items.is_empty() {
                info!("No liked songs yet.");
                return;
            }
            let rows = track_rows(page.items.iter().map(|item| &item.track));
            println!("{}", tabled::Table::new(rows));
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn recent(limit: u32) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    let pb = spinner("Loading recently played...");
    let result = spotify::library::get_recently_played(&token, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(page) => {
            if page.items.is_empty() {
                info!("No recently played tracks.");
                return;
            }

            let rows: Vec<RecentTableRow> = page
                .items
                .iter()
                .map(|item| RecentTableRow {
                    played_at: item.played_at.clone(),
                    name: item.track.name.clone(),
                    artists: item.track.artist_names(),
                })
                .collect();
            println!("{}", tabled::Table::new(rows));
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn top_tracks(range: TimeRange, limit: u32) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    let pb = spinner("Loading top tracks...");
    let result = spotify::library::get_top_tracks(&token, range, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(page) => {
            if page.items.is_empty() {
                info!("No top tracks for this range yet.");
                return;
            }
            let rows = track_rows(page.items.iter());
            println!("{}", tabled::Table::new(rows));
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn top_artists(range: TimeRange, limit: u32) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    let pb = spinner("Loading top artists...");
    let result = spotify::library::get_top_artists(&token, range, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(page) => {
            if page.items.is_empty() {
                info!("No top artists for this range yet.");
                return;
            }

            let rows: Vec<ArtistTableRow> = page
                .items
                .iter()
                .map(|artist| ArtistTableRow {
                    name: artist.name.clone(),
                    followers: artist
                        .followers
                        .as_ref()
                        .map(|f| f.total.to_string())
                        .unwrap_or_default(),
                    uri: artist.uri.clone(),
                })
                .collect();
            println!("{}", tabled::Table::new(rows));
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn save(ids: Vec<String>) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::library::save_tracks(&token, &ids).await {
        Ok(()) => success!("Added {} track(s) to liked songs.", ids.len()),
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn unsave(ids: Vec<String>) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::library::remove_saved_tracks(&token, &ids).await {
        Ok(()) => success!("Removed {} track(s) from liked songs.", ids.len()),
        Err(e) => session.handle_control_error(&e).await,
    }
}

pub async fn contains(ids: Vec<String>) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    match spotify::library::check_saved_tracks(&token, &ids).await {
        Ok(flags) => {
            for (id, saved) in ids.iter().zip(flags.iter()) {
                info!("{}: {}", id, if *saved { "liked" } else { "not liked" });
            }
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}
