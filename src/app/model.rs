//! Application model types: `App` and `SearchView`.
//!
//! The `App` struct holds the search input, the result list, a snapshot of
//! the queue and the now-playing panel. It is only written through the
//! `Presenter` trait and a few input helpers.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::catalog::{CatalogError, TrackDescriptor};

use super::presenter::Presenter;

pub const PROMPT_MESSAGE: &str = "Type to find your favorite tracks...";
pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const SEARCH_ERROR_MESSAGE: &str = "Error searching tracks. Try again.";
pub const EMPTY_QUEUE_MESSAGE: &str = "Queue is empty. Add some songs!";
pub const IDLE_TITLE: &str = "Not Playing";
pub const IDLE_SUBTITLE: &str = "Waiting for selection...";

/// How long the "added" mark stays on a result row.
pub const ADDED_MARK_DURATION: Duration = Duration::from_secs(1);

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const SPINNER_STEP: Duration = Duration::from_millis(150);

/// What the results panel is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchView {
    #[default]
    Prompt,
    Results(Vec<TrackDescriptor>),
    NoResults,
    Error(String),
}

/// The main application model.
pub struct App {
    pub input: String,
    pub search: SearchView,
    pub selected: usize,
    pub searching: bool,

    pub queue: Vec<TrackDescriptor>,
    pub now_playing: Option<TrackDescriptor>,
    /// The record icon spins while a track is current.
    pub spinning: bool,
    pub progress: f64,

    added_mark: Option<(usize, Instant)>,
    spinner_frame: usize,
    last_spin: Option<Instant>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            search: SearchView::Prompt,
            selected: 0,
            searching: false,

            queue: Vec::new(),
            now_playing: None,
            spinning: false,
            progress: 0.0,

            added_mark: None,
            spinner_frame: 0,
            last_spin: None,
        }
    }

    /// Append a character to the search input.
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character from the search input.
    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn set_searching(&mut self, searching: bool) {
        self.searching = searching;
    }

    pub fn results(&self) -> &[TrackDescriptor] {
        match &self.search {
            SearchView::Results(results) => results,
            _ => &[],
        }
    }

    pub fn selected_result(&self) -> Option<&TrackDescriptor> {
        self.results().get(self.selected)
    }

    /// Move selection to the next result, wrapping around.
    pub fn next(&mut self) {
        let len = self.results().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous result, wrapping around.
    pub fn prev(&mut self) {
        let len = self.results().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Flag the result at `index` as just added.
    pub fn mark_added(&mut self, index: usize, now: Instant) {
        self.added_mark = Some((index, now));
    }

    /// Index of the row currently showing the "added" mark, if any.
    pub fn added_index(&self, now: Instant) -> Option<usize> {
        match self.added_mark {
            Some((index, at)) if now.duration_since(at) < ADDED_MARK_DURATION => Some(index),
            _ => None,
        }
    }

    /// `"N tracks"` label for the queue panel.
    pub fn queue_label(&self) -> String {
        format!("{} tracks", self.queue.len())
    }

    /// Title and subtitle lines for the now-playing panel.
    pub fn now_playing_lines(&self) -> (&str, &str) {
        match &self.now_playing {
            Some(track) => (track.title.as_str(), track.artist.as_str()),
            None => (IDLE_TITLE, IDLE_SUBTITLE),
        }
    }

    pub fn spinner(&self) -> &'static str {
        if self.spinning {
            SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
        } else {
            "○"
        }
    }

    /// Advance time-based decorations (spinner, expired marks).
    pub fn tick(&mut self, now: Instant) {
        if self.added_index(now).is_none() {
            self.added_mark = None;
        }

        if !self.spinning {
            self.last_spin = None;
            return;
        }
        match self.last_spin {
            Some(at) if now.duration_since(at) < SPINNER_STEP => {}
            _ => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                self.last_spin = Some(now);
            }
        }
    }

    fn set_search_view(&mut self, view: SearchView) {
        self.search = view;
        self.selected = 0;
        self.added_mark = None;
    }
}

impl Presenter for App {
    fn render_queue(&mut self, queue: &[TrackDescriptor]) {
        self.queue = queue.to_vec();
    }

    fn render_current(&mut self, track: Option<&TrackDescriptor>) {
        self.now_playing = track.cloned();
        self.spinning = track.is_some();
        if track.is_none() {
            self.progress = 0.0;
        }
    }

    fn render_progress(&mut self, percent: f64) {
        self.progress = percent.clamp(0.0, 100.0);
    }

    fn render_search_results(&mut self, results: &[TrackDescriptor]) {
        self.searching = false;
        if results.is_empty() {
            self.set_search_view(SearchView::NoResults);
        } else {
            self.set_search_view(SearchView::Results(results.to_vec()));
        }
    }

    fn render_search_error(&mut self, error: &CatalogError) {
        debug!(error = %error, "showing search error");
        self.searching = false;
        self.set_search_view(SearchView::Error(SEARCH_ERROR_MESSAGE.to_string()));
    }

    fn render_search_prompt(&mut self) {
        self.searching = false;
        self.set_search_view(SearchView::Prompt);
    }
}
