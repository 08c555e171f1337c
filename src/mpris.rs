//! MPRIS "now playing" publisher.
//!
//! Desktop widgets and `playerctl` can see what is playing. Transport calls
//! are accepted but do nothing; only `Quit` is honoured.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use tracing::{debug, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::app::Presenter;
use crate::catalog::TrackDescriptor;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const NO_TRACK: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
}

#[derive(Debug, Default)]
struct SharedState {
    track: Option<TrackDescriptor>,
    /// Bumped per track so each one gets its own `mpris:trackid`.
    track_number: u64,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_track(&self, track: Option<&TrackDescriptor>) {
        if let Ok(mut s) = self.state.lock() {
            if track.is_some() {
                s.track_number += 1;
            }
            s.track = track.cloned();
        }
    }
}

impl Presenter for MprisHandle {
    fn render_current(&mut self, track: Option<&TrackDescriptor>) {
        self.set_track(track);
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "encore"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        debug!("MPRIS Next ignored");
    }

    fn previous(&self) {
        debug!("MPRIS Previous ignored");
    }

    fn play(&self) {
        debug!("MPRIS Play ignored");
    }

    fn pause(&self) {
        debug!("MPRIS Pause ignored");
    }

    fn play_pause(&self) {
        debug!("MPRIS PlayPause ignored");
    }

    fn stop(&self) {
        debug!("MPRIS Stop ignored");
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        if s.track.is_some() { "Playing" } else { "Stopped" }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let track_id = match &s.track {
            Some(_) => format!("{OBJECT_PATH}/track/{}", s.track_number),
            None => NO_TRACK.to_string(),
        };
        if let Ok(path) = ObjectPath::try_from(track_id) {
            insert(&mut map, "mpris:trackid", Value::from(path));
        }

        if let Some(track) = &s.track {
            insert(&mut map, "xesam:title", Value::from(track.title.clone()));
            insert(&mut map, "xesam:artist", Value::from(vec![track.artist.clone()]));
            if !track.artwork_ref.is_empty() {
                insert(&mut map, "mpris:artUrl", Value::from(track.artwork_ref.clone()));
            }
            if !track.preview_source_ref.is_empty() {
                insert(
                    &mut map,
                    "xesam:url",
                    Value::from(track.preview_source_ref.clone()),
                );
            }
        }
        map
    }
}

fn insert(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
    if let Ok(v) = OwnedValue::try_from(value) {
        map.insert(key.to_string(), v);
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    let spawned = std::thread::Builder::new()
        .name("encore-mpris".to_string())
        .spawn(move || {
            block_on(async move {
                let connection = match Connection::session().await {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(error = %e, "MPRIS: failed to connect to session bus");
                        return;
                    }
                };

                if let Err(e) = connection
                    .request_name("org.mpris.MediaPlayer2.encore")
                    .await
                {
                    warn!(error = %e, "MPRIS: failed to acquire name");
                    return;
                }

                let object_server = connection.object_server();

                if let Err(e) = object_server.at(OBJECT_PATH, RootIface { tx }).await {
                    warn!(error = %e, "MPRIS: failed to register root iface");
                    return;
                }

                if let Err(e) = object_server
                    .at(
                        OBJECT_PATH,
                        PlayerIface {
                            state: state_for_thread,
                        },
                    )
                    .await
                {
                    warn!(error = %e, "MPRIS: failed to register player iface");
                    return;
                }

                // Keep the service alive.
                loop {
                    Timer::after(std::time::Duration::from_secs(3600)).await;
                }
            });
        });

    if let Err(e) = spawned {
        warn!(error = %e, "MPRIS: could not start thread");
    }

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
