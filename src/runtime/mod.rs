use std::sync::{Arc, mpsc};

use tracing::{info, warn};

use crate::app::App;
use crate::audio::{AudioEvent, AudioPlayer, RodioOutput};
use crate::catalog::{ItunesCatalog, SearchResponse, SearchWorker};
use crate::logging;
use crate::mpris::ControlCmd;
use crate::playback::PlaybackController;

mod event_loop;
mod settings;
mod terminal;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    // Dropping the guard flushes the log file, so it lives until `run` returns.
    let _log_guard = logging::init(&settings.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if let Some(reason) = fallback {
        warn!("{reason}");
    }

    let (audio_tx, audio_rx) = mpsc::channel::<AudioEvent>();
    let player = AudioPlayer::new(
        settings.audio.clone(),
        settings.catalog.user_agent.clone(),
        audio_tx,
    )?;
    let mut controller = PlaybackController::new(RodioOutput::new(player))
        .with_skip_unplayable(settings.playback.skip_unplayable);

    let (search_tx, search_rx) = mpsc::channel::<SearchResponse>();
    let catalog = ItunesCatalog::new(&settings.catalog)?;
    let worker = SearchWorker::new(Arc::new(catalog), search_tx);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mut mpris = settings
        .mpris
        .enabled
        .then(|| crate::mpris::spawn_mpris(control_tx));

    let mut app = App::new();
    let mut state = event_loop::EventLoopState::new(&settings.search);

    let run_result = match terminal::TerminalSession::enter() {
        Ok(mut session) => event_loop::run(
            &mut session.terminal,
            &settings,
            &mut app,
            &mut controller,
            &worker,
            event_loop::Inbox {
                search: &search_rx,
                audio: &audio_rx,
                control: &control_rx,
            },
            mpris.as_mut(),
            &mut state,
        ),
        Err(e) => Err(e.into()),
    };
    // The terminal is restored by now; the audio thread still has to go.
    let run_result = event_loop::finish(run_result, &controller, &settings.audio);

    info!("bye");
    run_result
}
