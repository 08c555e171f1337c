use super::*;
use crate::catalog::{CatalogError, TrackDescriptor};
use crate::playback::PlaybackNotice;
use std::time::{Duration, Instant};

fn hit(title: &str) -> TrackDescriptor {
    TrackDescriptor::new(title, "Artist", format!("u/{title}"), "art")
}

#[test]
fn starts_with_prompt_and_idle_panel() {
    let app = App::new();
    assert_eq!(app.search, SearchView::Prompt);
    assert_eq!(app.now_playing_lines(), (IDLE_TITLE, IDLE_SUBTITLE));
    assert_eq!(app.queue_label(), "0 tracks");
    assert!(!app.spinning);
    assert_eq!(app.spinner(), "○");
}

#[test]
fn empty_results_render_no_results_not_error() {
    let mut app = App::new();
    app.set_searching(true);
    app.render_search_results(&[]);
    assert_eq!(app.search, SearchView::NoResults);
    assert!(!app.searching);
}

#[test]
fn search_error_clears_previous_results() {
    let mut app = App::new();
    app.render_search_results(&[hit("A"), hit("B")]);
    app.next();
    assert_eq!(app.selected, 1);

    app.render_search_error(&CatalogError::Network("offline".into()));
    assert_eq!(
        app.search,
        SearchView::Error(SEARCH_ERROR_MESSAGE.to_string())
    );
    assert!(app.results().is_empty());
    assert!(app.selected_result().is_none());
    assert_eq!(app.selected, 0);
}

#[test]
fn selection_wraps_and_resets_on_new_results() {
    let mut app = App::new();
    app.render_search_results(&[hit("A"), hit("B"), hit("C")]);
    app.prev();
    assert_eq!(app.selected_result().unwrap().title, "C");
    app.next();
    assert_eq!(app.selected_result().unwrap().title, "A");
    app.next();
    app.render_search_results(&[hit("D")]);
    assert_eq!(app.selected, 0);

    // No results: moving is a no-op.
    app.render_search_prompt();
    app.next();
    app.prev();
    assert_eq!(app.selected, 0);
}

#[test]
fn notices_drive_queue_and_now_playing() {
    let mut app = App::new();
    let a = TrackDescriptor::new("A", "X", "u1", "art");
    let b = TrackDescriptor::new("B", "X", "u2", "art");

    for notice in [
        PlaybackNotice::QueueChanged(vec![b.clone()]),
        PlaybackNotice::NowPlaying(Some(a.clone())),
        PlaybackNotice::Progress(42.0),
    ] {
        dispatch(&notice, &mut app);
    }
    assert_eq!(app.queue, vec![b]);
    assert_eq!(app.queue_label(), "1 tracks");
    assert_eq!(app.now_playing_lines(), ("A", "X"));
    assert!(app.spinning);
    assert_eq!(app.progress, 42.0);

    dispatch(&PlaybackNotice::NowPlaying(None), &mut app);
    assert_eq!(app.now_playing_lines(), (IDLE_TITLE, IDLE_SUBTITLE));
    assert!(!app.spinning);
    assert_eq!(app.progress, 0.0);
}

#[test]
fn progress_is_clamped() {
    let mut app = App::new();
    app.render_progress(140.0);
    assert_eq!(app.progress, 100.0);
    app.render_progress(-3.0);
    assert_eq!(app.progress, 0.0);
}

#[test]
fn added_mark_expires_after_a_second() {
    let now = Instant::now();
    let mut app = App::new();
    app.render_search_results(&[hit("A"), hit("B")]);
    app.mark_added(1, now);
    assert_eq!(app.added_index(now + Duration::from_millis(999)), Some(1));
    assert_eq!(app.added_index(now + Duration::from_secs(1)), None);

    app.tick(now + Duration::from_secs(2));
    assert_eq!(app.added_index(now), None);
}

#[test]
fn spinner_only_moves_while_playing() {
    let now = Instant::now();
    let mut app = App::new();
    app.tick(now);
    assert_eq!(app.spinner(), "○");

    app.render_current(Some(&TrackDescriptor::new("A", "X", "u1", "art")));
    app.tick(now);
    let first = app.spinner();
    app.tick(now + Duration::from_millis(10));
    assert_eq!(app.spinner(), first);
    app.tick(now + Duration::from_millis(200));
    assert_ne!(app.spinner(), first);
}

#[test]
fn input_editing() {
    let mut app = App::new();
    for c in "abc".chars() {
        app.push_char(c);
    }
    app.pop_char();
    assert_eq!(app.input, "ab");
    app.clear_input();
    assert!(app.input.is_empty());
}

#[derive(Default)]
struct RecordingPresenter {
    calls: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn render_queue(&mut self, queue: &[TrackDescriptor]) {
        self.calls.push(format!("queue {}", queue.len()));
    }

    fn render_current(&mut self, track: Option<&TrackDescriptor>) {
        let title = track.map(|t| t.title.as_str()).unwrap_or("-");
        self.calls.push(format!("current {title}"));
    }

    fn render_progress(&mut self, percent: f64) {
        self.calls.push(format!("progress {percent}"));
    }
}

struct SilentOutput;

impl crate::playback::AudioOutput for SilentOutput {
    fn play(&mut self, _source_ref: &str) -> Result<(), crate::playback::AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}
}

#[test]
fn controller_notices_reach_a_presenter_in_order() {
    let mut controller = crate::playback::PlaybackController::new(SilentOutput);
    let mut presenter = RecordingPresenter::default();

    controller.enqueue(TrackDescriptor::new("A", "X", "u1", "art"));
    controller.enqueue(TrackDescriptor::new("B", "X", "u2", "art"));
    controller.on_ended();
    controller.on_ended();

    for notice in controller.take_notices() {
        dispatch(&notice, &mut presenter);
    }
    assert_eq!(
        presenter.calls,
        vec![
            "queue 1",
            "queue 0",
            "current A",
            "progress 0",
            "queue 1",
            "queue 0",
            "current B",
            "progress 0",
            "current -",
            "progress 0",
        ]
    );
}
