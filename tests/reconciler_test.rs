use spoctl::player::{EngineSnapshot, Reconciler};
use spoctl::types::{
    AlbumRef, ArtistRef, Device, PlayerStateResponse, RepeatMode, Track,
};

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, duration_ms: u64) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        name: name.to_string(),
        duration_ms,
        album: AlbumRef {
            name: format!("{} album", name),
            images: Vec::new(),
        },
        artists: vec![ArtistRef {
            name: "Test Artist".to_string(),
        }],
    }
}

// Helper function to create a remote poll snapshot
fn create_test_state(
    track: Option<Track>,
    is_playing: bool,
    progress_ms: Option<u64>,
) -> PlayerStateResponse {
    PlayerStateResponse {
        device: None,
        shuffle_state: false,
        repeat_state: "off".to_string(),
        progress_ms,
        is_playing,
        item: track,
    }
}

// Helper function to create a local engine state event
fn create_engine_snapshot(track: Option<Track>, paused: bool, position_ms: u64) -> EngineSnapshot {
    let duration_ms = track.as_ref().map(|t| t.duration_ms).unwrap_or(0);
    EngineSnapshot {
        track,
        paused,
        position_ms,
        duration_ms,
        shuffle: false,
        repeat_mode: 0,
    }
}

fn create_test_device(id: &str, name: &str, active: bool) -> Device {
    Device {
        id: Some(id.to_string()),
        name: name.to_string(),
        device_type: "Computer".to_string(),
        is_active: active,
        volume_percent: Some(50),
    }
}

#[tokio::test]
async fn test_remote_snapshot_applied() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 180_000);

    reconciler
        .apply_remote(&create_test_state(Some(track), true, Some(42_000)))
        .await;

    let view = reconciler.snapshot().await;
    assert_eq!(view.current_track.as_ref().unwrap().id, "t1");
    assert!(view.is_playing);
    assert_eq!(view.position_ms, 42_000);
    assert_eq!(view.duration_ms, 180_000);
}

#[tokio::test]
async fn test_no_playback_clears_view_even_after_engine_push() {
    let reconciler = Reconciler::new();

    // A local engine event first reports an active track
    let track = create_test_track("t1", "Song One", 180_000);
    reconciler
        .apply_engine(&create_engine_snapshot(Some(track), false, 10_000))
        .await;
    assert!(reconciler.snapshot().await.is_playing);

    // A 204/404 poll result clears the track and stops playback
    reconciler.apply_no_playback().await;

    let view = reconciler.snapshot().await;
    assert!(view.current_track.is_none());
    assert!(!view.is_playing);
    assert_eq!(view.position_ms, 0);
}

#[tokio::test]
async fn test_last_write_wins_between_producers() {
    let reconciler = Reconciler::new();

    let remote_track = create_test_track("remote", "Remote Track", 200_000);
    reconciler
        .apply_remote(&create_test_state(Some(remote_track), true, Some(5_000)))
        .await;

    // The engine push arriving later overwrites wholesale
    let engine_track = create_test_track("local", "Local Track", 120_000);
    reconciler
        .apply_engine(&create_engine_snapshot(Some(engine_track), true, 30_000))
        .await;

    let view = reconciler.snapshot().await;
    assert_eq!(view.current_track.as_ref().unwrap().id, "local");
    assert!(!view.is_playing); // engine reported paused
    assert_eq!(view.position_ms, 30_000);
    assert_eq!(view.duration_ms, 120_000);
}

#[tokio::test]
async fn test_position_clamped_on_remote_update() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 100_000);

    // Remote progress past the track end gets clamped
    reconciler
        .apply_remote(&create_test_state(Some(track), true, Some(250_000)))
        .await;

    let view = reconciler.snapshot().await;
    assert_eq!(view.position_ms, 100_000);
}

#[tokio::test]
async fn test_position_clamped_on_engine_update() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 100_000);

    let mut snapshot = create_engine_snapshot(Some(track), false, 0);
    snapshot.position_ms = 500_000;
    reconciler.apply_engine(&snapshot).await;

    let view = reconciler.snapshot().await;
    assert_eq!(view.position_ms, 100_000);
}

#[tokio::test]
async fn test_absent_track_implies_not_playing() {
    let reconciler = Reconciler::new();

    // An engine event claiming playback without a track must normalize
    // to "not playing"
    let snapshot = create_engine_snapshot(None, false, 10_000);
    reconciler.apply_engine(&snapshot).await;

    let view = reconciler.snapshot().await;
    assert!(view.current_track.is_none());
    assert!(!view.is_playing);
    assert_eq!(view.position_ms, 0);
    assert_eq!(view.duration_ms, 0);
}

#[tokio::test]
async fn test_optimistic_volume_patch() {
    let reconciler = Reconciler::new();

    reconciler.apply_volume(40).await;
    assert_eq!(reconciler.snapshot().await.volume, 40);

    // Values above the provider range clamp to 100
    reconciler.apply_volume(250).await;
    assert_eq!(reconciler.snapshot().await.volume, 100);
}

#[tokio::test]
async fn test_optimistic_seek_patch_is_clamped() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 90_000);

    reconciler
        .apply_remote(&create_test_state(Some(track), true, Some(0)))
        .await;

    reconciler.apply_seek(30_000).await;
    assert_eq!(reconciler.snapshot().await.position_ms, 30_000);

    reconciler.apply_seek(120_000).await;
    assert_eq!(reconciler.snapshot().await.position_ms, 90_000);
}

#[tokio::test]
async fn test_optimistic_shuffle_and_repeat_patches() {
    let reconciler = Reconciler::new();

    reconciler.apply_shuffle(true).await;
    reconciler.apply_repeat(RepeatMode::Track).await;

    let view = reconciler.snapshot().await;
    assert!(view.shuffle);
    assert_eq!(view.repeat, RepeatMode::Track);
}

#[tokio::test]
async fn test_devices_survive_remote_updates() {
    let reconciler = Reconciler::new();

    reconciler
        .apply_devices(vec![
            create_test_device("d1", "Desk speaker", true),
            create_test_device("d2", "Phone", false),
        ])
        .await;

    let track = create_test_track("t1", "Song One", 180_000);
    reconciler
        .apply_remote(&create_test_state(Some(track), true, Some(1_000)))
        .await;

    // The device list is owned by the devices producer, not the poll
    let view = reconciler.snapshot().await;
    assert_eq!(view.devices.len(), 2);
    assert_eq!(view.devices[0].name, "Desk speaker");
}

#[tokio::test]
async fn test_volume_follows_active_device_on_poll() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 180_000);

    let mut state = create_test_state(Some(track), true, Some(0));
    state.device = Some(Device {
        id: Some("d1".to_string()),
        name: "Desk speaker".to_string(),
        device_type: "Computer".to_string(),
        is_active: true,
        volume_percent: Some(73),
    });

    reconciler.apply_remote(&state).await;
    assert_eq!(reconciler.snapshot().await.volume, 73);
}

#[tokio::test]
async fn test_repeat_and_shuffle_follow_poll() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 180_000);

    let mut state = create_test_state(Some(track), true, Some(0));
    state.shuffle_state = true;
    state.repeat_state = "context".to_string();

    reconciler.apply_remote(&state).await;

    let view = reconciler.snapshot().await;
    assert!(view.shuffle);
    assert_eq!(view.repeat, RepeatMode::Context);
}

#[tokio::test]
async fn test_clear_resets_everything() {
    let reconciler = Reconciler::new();
    let track = create_test_track("t1", "Song One", 180_000);

    reconciler
        .apply_remote(&create_test_state(Some(track), true, Some(1_000)))
        .await;
    reconciler.apply_volume(80).await;
    reconciler
        .apply_devices(vec![create_test_device("d1", "Desk speaker", true)])
        .await;

    reconciler.clear().await;

    let view = reconciler.snapshot().await;
    assert!(view.current_track.is_none());
    assert!(!view.is_playing);
    assert_eq!(view.volume, 0);
    assert!(view.devices.is_empty());
}
