use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    player::engine::EngineSnapshot,
    types::{Device, PlaybackView, PlayerStateResponse, RepeatMode},
    utils,
};

/// Merges the two producers of playback state into one view model.
///
/// The remote polling loop and the local engine push events both write the
/// same [`PlaybackView`]; whichever update arrives last wins wholesale.
/// There is no arbitration and no merging of partial fields across
/// producers: both describe the same physical playback session, the poll
/// producer is authoritative while playback happens elsewhere and the local
/// engine is authoritative while it is the active output device. Updates
/// are not tagged by source, so two producers firing within the same tick
/// resolve in lock-acquisition order.
///
/// Every update re-establishes the view invariants: the position never
/// exceeds the duration, and an absent track implies paused playback.
#[derive(Clone)]
pub struct Reconciler {
    view: Arc<Mutex<PlaybackView>>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(PlaybackView::default())),
        }
    }

    /// Applies a successful remote poll snapshot.
    ///
    /// Track, play state, position, duration, shuffle, repeat and (when the
    /// response names an active device) volume are overwritten. The device
    /// list is owned by [`apply_devices`](Self::apply_devices) and left
    /// untouched here.
    pub async fn apply_remote(&self, state: &PlayerStateResponse) {
        let mut view = self.view.lock().await;
        view.current_track = state.item.clone();
        view.is_playing = state.is_playing;
        view.position_ms = state.progress_ms.unwrap_or(0);
        view.duration_ms = state.item.as_ref().map(|t| t.duration_ms).unwrap_or(0);
        view.shuffle = state.shuffle_state;
        view.repeat = RepeatMode::from_api(&state.repeat_state);
        if let Some(volume) = state.device.as_ref().and_then(|d| d.volume_percent) {
            view.volume = volume.min(100);
        }
        normalize(&mut view);
    }

    /// Applies a "no active playback" poll result (204/404 from the status
    /// endpoint): the track is cleared and playback stops, regardless of
    /// what a local engine event reported before.
    pub async fn apply_no_playback(&self) {
        let mut view = self.view.lock().await;
        view.current_track = None;
        view.is_playing = false;
        normalize(&mut view);
    }

    /// Applies a state-changed event pushed by the local engine.
    ///
    /// The fields the engine carries overwrite the view; volume is not part
    /// of engine state events and keeps its last value.
    pub async fn apply_engine(&self, snapshot: &EngineSnapshot) {
        let mut view = self.view.lock().await;
        view.current_track = snapshot.track.clone();
        view.is_playing = !snapshot.paused;
        view.position_ms = snapshot.position_ms;
        view.duration_ms = snapshot.duration_ms;
        view.shuffle = snapshot.shuffle;
        view.repeat = snapshot.repeat();
        normalize(&mut view);
    }

    pub async fn apply_devices(&self, devices: Vec<Device>) {
        let mut view = self.view.lock().await;
        view.devices = devices;
    }

    /// Optimistic patch after a seek control call.
    pub async fn apply_seek(&self, position_ms: u64) {
        let mut view = self.view.lock().await;
        view.position_ms = position_ms;
        normalize(&mut view);
    }

    /// Optimistic patch after a volume control call.
    pub async fn apply_volume(&self, volume: u8) {
        let mut view = self.view.lock().await;
        view.volume = volume.min(100);
    }

    /// Optimistic patch after a shuffle control call.
    pub async fn apply_shuffle(&self, shuffle: bool) {
        let mut view = self.view.lock().await;
        view.shuffle = shuffle;
    }

    /// Optimistic patch after a repeat control call.
    pub async fn apply_repeat(&self, repeat: RepeatMode) {
        let mut view = self.view.lock().await;
        view.repeat = repeat;
    }

    /// Resets the view to its empty state (logout, session expiry).
    pub async fn clear(&self) {
        let mut view = self.view.lock().await;
        *view = PlaybackView::default();
    }

    pub async fn snapshot(&self) -> PlaybackView {
        self.view.lock().await.clone()
    }
}

/// Re-establishes the view invariants after an update.
fn normalize(view: &mut PlaybackView) {
    if view.current_track.is_none() {
        view.is_playing = false;
        view.position_ms = 0;
        view.duration_ms = 0;
    } else {
        view.position_ms = utils::clamp_position(view.position_ms, view.duration_ms);
    }
}
