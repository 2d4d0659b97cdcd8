use serde::Deserialize;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpStream,
    task::JoinHandle,
};

use crate::{info, player::reconciler::Reconciler, types::{RepeatMode, Track}, warning};

/// Snapshot pushed by a local playback engine on every state change.
///
/// Mirrors the event payload of an in-process player: the repeat mode comes
/// over the wire as `0|1|2` (off/context/track).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSnapshot {
    pub track: Option<Track>,
    pub paused: bool,
    #[serde(default)]
    pub position_ms: u64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub repeat_mode: u8,
}

impl EngineSnapshot {
    pub fn repeat(&self) -> RepeatMode {
        match self.repeat_mode {
            1 => RepeatMode::Context,
            2 => RepeatMode::Track,
            _ => RepeatMode::Off,
        }
    }
}

/// Events emitted by a local engine bridge, one JSON object per line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    Ready { device_id: String },
    NotReady { device_id: String },
    StateChanged { state: Option<EngineSnapshot> },
}

/// Connection to a local playback engine bridge.
///
/// The bridge is an external process (the embedded player) that streams its
/// state changes as newline-delimited JSON over a localhost socket. When no
/// bridge address is configured or the connection fails, the session simply
/// runs without the push producer and the remote poll remains the only
/// source of state.
pub struct EngineBridge {
    task: JoinHandle<()>,
}

/// Connects to the bridge and starts forwarding its events into the
/// reconciler. Returns an error when the bridge is not reachable.
pub async fn connect(addr: &str, reconciler: Reconciler) -> std::io::Result<EngineBridge> {
    let stream = TcpStream::connect(addr).await?;
    let task = tokio::spawn(read_events(stream, reconciler));
    Ok(EngineBridge { task })
}

impl EngineBridge {
    /// Stops forwarding engine events. Called on logout and session expiry
    /// so no background work outlives the session.
    pub fn disconnect(self) {
        self.task.abort();
    }
}

async fn read_events(stream: TcpStream, reconciler: Reconciler) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<EngineEvent>(&line) {
                    Ok(EngineEvent::StateChanged { state: Some(snapshot) }) => {
                        reconciler.apply_engine(&snapshot).await;
                    }
                    // A null state means the engine lost its playback
                    // session; the remote poll keeps the view current.
                    Ok(EngineEvent::StateChanged { state: None }) => {}
                    Ok(EngineEvent::Ready { device_id }) => {
                        info!("Local playback engine ready (device {})", device_id);
                    }
                    Ok(EngineEvent::NotReady { device_id }) => {
                        warning!("Local playback engine went offline (device {})", device_id);
                    }
                    Err(e) => {
                        warning!("Ignoring malformed engine event: {}", e);
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warning!("Engine bridge connection lost: {}", e);
                break;
            }
        }
    }
}
