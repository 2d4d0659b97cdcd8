use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    cli::require_session,
    info, spotify,
    types::{AlbumTableRow, ArtistTableRow, PlaylistTableRow, TrackTableRow},
    utils::SearchKinds,
};

pub async fn search(query: String, kinds: SearchKinds, limit: u32) {
    let mut session = require_session().await;
    let token = session.access_token().unwrap_or_default().to_string();

    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let results = spotify::search::search(&token, &query, &kinds, limit).await;
    pb.finish_and_clear();

    match results {
        Ok(results) => {
            let mut printed = false;

            if let Some(tracks) = results.tracks {
                if !tracks.items.is_empty() {
                    info!("Tracks");
                    let rows: Vec<TrackTableRow> = tracks
                        .items
                        .iter()
                        .map(|track| TrackTableRow {
                            name: track.name.clone(),
                            artists: track.artist_names(),
                            album: track.album.name.clone(),
                            uri: track.uri.clone(),
                        })
                        .collect();
                    println!("{}", tabled::Table::new(rows));
                    printed = true;
                }
            }

            if let Some(albums) = results.albums {
                if !albums.items.is_empty() {
                    info!("Albums");
                    let rows: Vec<AlbumTableRow> = albums
                        .items
                        .iter()
                        .map(|album| AlbumTableRow {
                            name: album.name.clone(),
                            artists: album
                                .artists
                                .iter()
                                .map(|a| a.name.as_str())
                                .collect::<Vec<_>>()
                                .join(", "),
                            released: album.release_date.clone(),
                            uri: album.uri.clone(),
                        })
                        .collect();
                    println!("{}", tabled::Table::new(rows));
                    printed = true;
                }
            }

            if let Some(artists) = results.artists {
                if !artists.items.is_empty() {
                    info!("Artists");
                    let rows: Vec<ArtistTableRow> = artists
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
                    printed = true;
                }
            }

            if let Some(playlists) = results.playlists {
                if !playlists.items.is_empty() {
                    info!("Playlists");
                    let rows: Vec<PlaylistTableRow> = playlists
                        .items
                        .iter()
                        .map(|playlist| PlaylistTableRow {
                            name: playlist.name.clone(),
                            tracks: playlist
                                .tracks
                                .as_ref()
                                .map(|t| t.total.to_string())
                                .unwrap_or_default(),
                            owner: playlist
                                .owner
                                .as_ref()
                                .and_then(|o| o.display_name.clone())
                                .unwrap_or_default(),
                            id: playlist.id.clone(),
                        })
                        .collect();
                    println!("{}", tabled::Table::new(rows));
                    printed = true;
                }
            }

            if !printed {
                info!("No results for '{}'.", query);
            }
        }
        Err(e) => session.handle_control_error(&e).await,
    }
}
