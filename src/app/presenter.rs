use crate::catalog::{CatalogError, TrackDescriptor};
use crate::playback::PlaybackNotice;

/// A sink for state changes. The core only ever pushes into it and never
/// reads anything back.
///
/// Every method has a no-op default so partial presenters (like the MPRIS
/// publisher) only implement what they show.
pub trait Presenter {
    fn render_queue(&mut self, _queue: &[TrackDescriptor]) {}
    fn render_current(&mut self, _track: Option<&TrackDescriptor>) {}
    fn render_progress(&mut self, _percent: f64) {}
    fn render_search_results(&mut self, _results: &[TrackDescriptor]) {}
    fn render_search_error(&mut self, _error: &CatalogError) {}
    /// Input is blank: invite the user to type.
    fn render_search_prompt(&mut self) {}
}

/// Route a controller notice to the matching presenter call.
pub fn dispatch(notice: &PlaybackNotice, presenter: &mut dyn Presenter) {
    match notice {
        PlaybackNotice::QueueChanged(queue) => presenter.render_queue(queue),
        PlaybackNotice::NowPlaying(track) => presenter.render_current(track.as_ref()),
        PlaybackNotice::Progress(percent) => presenter.render_progress(*percent),
    }
}
