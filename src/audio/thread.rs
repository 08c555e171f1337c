use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::config::AudioSettings;
use crate::playback::AudioError;

use super::sink::{create_sink, fetch_preview, format_hint};
use super::types::{AudioCmd, AudioEvent};

/// The sink currently bound to the output, with the token it was loaded under.
struct Loaded {
    sink: Sink,
    token: u64,
    duration: Option<Duration>,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    audio_settings: AudioSettings,
    user_agent: String,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("encore-audio".to_string())
        .spawn(move || {
            // Without a device the thread keeps running and rejects every load.
            let stream = match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    // rodio logs to stderr when OutputStream is dropped; noisy for a TUI app.
                    stream.log_on_drop(false);
                    Ok(stream)
                }
                Err(e) => {
                    error!(error = %e, "no audio output device");
                    Err(AudioError::NoOutputDevice(e.to_string()))
                }
            };

            let client = Client::builder()
                .user_agent(user_agent)
                .build()
                .map_err(|e| AudioError::Fetch(e.to_string()));

            let tick = Duration::from_millis(audio_settings.progress_interval_ms.max(10));
            let mut current: Option<Loaded> = None;

            loop {
                match rx.recv_timeout(tick) {
                    Ok(AudioCmd::Load { source_ref, token }) => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }

                        let loaded = match (&stream, &client) {
                            (Ok(stream), Ok(client)) => load(stream, client, &source_ref),
                            (Err(e), _) | (_, Err(e)) => Err(e.clone()),
                        };

                        match loaded {
                            Ok((sink, duration)) => {
                                info!(token, source = %source_ref, ?duration, "playback started");
                                sink.play();
                                current = Some(Loaded {
                                    sink,
                                    token,
                                    duration,
                                });
                            }
                            Err(e) => {
                                warn!(token, source = %source_ref, error = %e, "could not start preview");
                                let _ = events.send(AudioEvent::StartRejected {
                                    token,
                                    reason: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(AudioCmd::Stop) => {
                        if let Some(old) = current.take() {
                            debug!(token = old.token, "playback stopped");
                            old.sink.stop();
                        }
                    }

                    Ok(AudioCmd::Quit { fade_out_ms }) => {
                        if let Some(old) = current.take() {
                            // Fade out gently before stopping.
                            fade_out_sink(&old.sink, fade_out_ms);
                            old.sink.stop();
                        }
                        break;
                    }

                    Err(RecvTimeoutError::Timeout) => {
                        // periodic check for completion + progress
                        let finished = match current.as_ref() {
                            Some(loaded) if loaded.sink.empty() => true,
                            Some(loaded) => {
                                let _ = events.send(AudioEvent::Progress {
                                    token: loaded.token,
                                    position: loaded.sink.get_pos(),
                                    duration: loaded.duration,
                                });
                                false
                            }
                            None => false,
                        };

                        if finished {
                            if let Some(done) = current.take() {
                                debug!(token = done.token, "playback ended");
                                let _ = events.send(AudioEvent::Ended { token: done.token });
                            }
                        }
                    }

                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        })
}

fn load(
    stream: &OutputStream,
    client: &Client,
    source_ref: &str,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let bytes = fetch_preview(client, source_ref)?;
    debug!(source = %source_ref, bytes = bytes.len(), "preview fetched");
    create_sink(stream, bytes, format_hint(source_ref))
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
