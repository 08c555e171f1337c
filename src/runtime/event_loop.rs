use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info};

use crate::app::{App, Presenter, dispatch};
use crate::audio::{AudioEvent, RodioOutput};
use crate::catalog::{SearchRequest, SearchResponse, SearchWorker};
use crate::config::{self, AudioSettings, SearchSettings};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playback::{AudioOutput, EnqueueOutcome, PlaybackController, PlaybackNotice};
use crate::search::{DebounceOutcome, Debouncer, SearchSequencer};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    pub debouncer: Debouncer,
    pub sequencer: SearchSequencer,
}

impl EventLoopState {
    pub fn new(search: &SearchSettings) -> Self {
        Self {
            debouncer: Debouncer::new(Duration::from_millis(search.debounce_ms)),
            sequencer: SearchSequencer::new(search.discard_stale_responses),
        }
    }
}

/// Channels the loop drains every iteration.
pub struct Inbox<'a> {
    pub search: &'a Receiver<SearchResponse>,
    pub audio: &'a Receiver<AudioEvent>,
    pub control: &'a Receiver<ControlCmd>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop. Every state change happens on this thread;
/// searches and audio only talk back through the inbox channels.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<RodioOutput>,
    worker: &SearchWorker,
    inbox: Inbox<'_>,
    mut mpris: Option<&mut MprisHandle>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();

        if let Some(request) = poll_search(app, state, now) {
            worker.submit(request);
        }

        while let Ok(response) = inbox.search.try_recv() {
            apply_search_response(app, state, response);
        }

        while let Ok(event) = inbox.audio.try_recv() {
            handle_audio_event(controller, event);
        }

        broadcast(&controller.take_notices(), app, mpris.as_deref_mut());

        app.tick(now);
        terminal.draw(|f| ui::draw(f, app, &settings.ui, now))?;

        while let Ok(cmd) = inbox.control.try_recv() {
            match cmd {
                ControlCmd::Quit => {
                    info!("quit requested over MPRIS");
                    return Ok(());
                }
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let flow = handle_key(key, app, controller, state, Instant::now());
                broadcast(&controller.take_notices(), app, mpris.as_deref_mut());
                if flow == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Stop the audio thread however the loop ended, and pass its result on.
pub(super) fn finish(
    result: Result<(), Box<dyn std::error::Error>>,
    controller: &PlaybackController<RodioOutput>,
    audio: &AudioSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    info!(state = ?controller.state(), queued = controller.queue_len(), "shutting down");
    controller
        .output()
        .player()
        .quit_softly(Duration::from_millis(audio.quit_fade_out_ms));
    result
}

/// Feed controller notices to the TUI and, when running, to MPRIS.
pub(super) fn broadcast(
    notices: &[PlaybackNotice],
    app: &mut App,
    mpris: Option<&mut MprisHandle>,
) {
    if notices.is_empty() {
        return;
    }
    let mut presenters: Vec<&mut dyn Presenter> = Vec::with_capacity(2);
    presenters.push(app);
    if let Some(m) = mpris {
        presenters.push(m);
    }
    for notice in notices {
        for presenter in presenters.iter_mut() {
            dispatch(notice, &mut **presenter);
        }
    }
}

/// Turn a quiet input into a search request, or back into the prompt.
pub(super) fn poll_search(
    app: &mut App,
    state: &mut EventLoopState,
    now: Instant,
) -> Option<SearchRequest> {
    match state.debouncer.poll(now)? {
        DebounceOutcome::Search(term) => {
            let seq = state.sequencer.issue();
            debug!(seq, term = %term, "issuing search");
            app.set_searching(true);
            Some(SearchRequest { seq, term })
        }
        DebounceOutcome::Cleared => {
            state.sequencer.invalidate();
            app.render_search_prompt();
            None
        }
    }
}

pub(super) fn apply_search_response(
    app: &mut App,
    state: &mut EventLoopState,
    response: SearchResponse,
) {
    if !state.sequencer.accept(response.seq) {
        debug!(seq = response.seq, term = %response.term, "dropping stale search response");
        return;
    }
    match response.outcome {
        Ok(results) => {
            info!(term = %response.term, count = results.len(), "search results");
            app.render_search_results(&results);
        }
        Err(e) => app.render_search_error(&e),
    }
}

pub(super) fn handle_audio_event(
    controller: &mut PlaybackController<RodioOutput>,
    event: AudioEvent,
) {
    if !controller.output().is_current(&event) {
        return;
    }
    match event {
        AudioEvent::Ended { .. } => controller.on_ended(),
        AudioEvent::Progress {
            position, duration, ..
        } => controller.on_progress(position, duration),
        AudioEvent::StartRejected { reason, .. } => controller.on_start_rejected(&reason),
    }
}

pub(super) fn handle_key<O: AudioOutput>(
    key: KeyEvent,
    app: &mut App,
    controller: &mut PlaybackController<O>,
    state: &mut EventLoopState,
    now: Instant,
) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Flow::Quit,
            KeyCode::Char('n') | KeyCode::Char('j') => app.next(),
            KeyCode::Char('p') | KeyCode::Char('k') => app.prev(),
            _ => {}
        }
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char(c) => {
            app.push_char(c);
            state.debouncer.input_changed(&app.input, now);
        }
        KeyCode::Backspace => {
            app.pop_char();
            state.debouncer.input_changed(&app.input, now);
        }
        KeyCode::Down => app.next(),
        KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if let Some(track) = app.selected_result().cloned() {
                let index = app.selected;
                match controller.enqueue(track) {
                    EnqueueOutcome::Started => debug!("result added, playback started"),
                    EnqueueOutcome::Queued { position } => debug!(position, "result queued"),
                }
                app.mark_added(index, now);
            }
        }
        KeyCode::Esc => {
            if app.input.is_empty() {
                return Flow::Quit;
            }
            app.clear_input();
            state.debouncer.input_changed(&app.input, now);
        }
        _ => {}
    }

    Flow::Continue
}
